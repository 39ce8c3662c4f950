// TUI 子模块
mod event_loop;
mod guard;
mod history_view;
mod keyboard;
mod layout;
mod mouse;
mod overlays;
mod player_status;
mod queue_view;
mod styles;
mod toast;
mod utils;
mod views;
mod widgets;

use crate::app::AppSnapshot;
use crate::messages::app::{AppCommand, AppEvent};
use std::io;
use tokio::sync::mpsc;

/// 主 TUI 入口点 - 从 main.rs 调用
pub async fn run_tui(
    app: AppSnapshot,
    tx: mpsc::Sender<AppCommand>,
    rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    event_loop::run_tui_internal(app, tx, rx).await
}
