//! 统一错误处理模块
//!
//! 提供项目中所有模块的结构化错误类型，替代 String 错误。

mod app;
mod audio;
mod library;
mod player_state;

pub use app::{AppError, SettingsError};
pub use audio::AudioError;
pub use library::LibraryError;
pub use player_state::PlayerStateError;
