//! 本地音乐终端播放器
//!
//! UI 线程只读 [`app::AppSnapshot`]；所有状态由 core actor 独占，
//! 音频引擎在独立线程上运行，通过 channel 回报事件。

pub mod app;
pub mod audio_worker;
pub mod core;
pub mod domain;
pub mod error;
pub mod features;
pub mod library;
pub mod logging;
pub mod messages;
pub mod player_state;
pub mod settings;
pub mod ui;
