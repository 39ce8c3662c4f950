use super::layout::split_canvas;
use super::utils::contains;
use crate::app::TABS;
use crate::messages::app::AppCommand;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

/// 鼠标拖动进度条的本地状态；松开前只发送 ScrubberDrag
#[derive(Debug, Default)]
pub(super) struct MouseState {
    dragging: bool,
}

pub(super) async fn handle_mouse(
    area: Rect,
    with_toast: bool,
    help_visible: bool,
    mouse: MouseEvent,
    state: &mut MouseState,
    tx: &mpsc::Sender<AppCommand>,
) {
    if help_visible {
        return;
    }
    if let Some(cmd) = mouse_command(area, with_toast, mouse, state) {
        let _ = tx.send(cmd).await;
    }
}

pub(super) fn mouse_command(
    area: Rect,
    with_toast: bool,
    mouse: MouseEvent,
    state: &mut MouseState,
) -> Option<AppCommand> {
    let layout = split_canvas(area, with_toast);
    let scrubber = layout.transport.scrubber;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(scrubber, mouse.column, mouse.row) {
                state.dragging = true;
                return Some(AppCommand::ScrubberDrag {
                    percent: scrubber_percent(scrubber, mouse.column),
                });
            }
            if contains(layout.tabs, mouse.column, mouse.row) {
                return calculate_tab_index(mouse.column - layout.tabs.x)
                    .map(|index| AppCommand::TabTo { index });
            }
            None
        }
        // 拖出进度条所在行也继续跟随横坐标
        MouseEventKind::Drag(MouseButton::Left) if state.dragging => {
            Some(AppCommand::ScrubberDrag {
                percent: scrubber_percent(scrubber, mouse.column),
            })
        }
        MouseEventKind::Up(MouseButton::Left) if state.dragging => {
            state.dragging = false;
            Some(AppCommand::ScrubberRelease)
        }
        _ => None,
    }
}

/// 进度条上的横坐标换算为 0..=100
pub(super) fn scrubber_percent(bar: Rect, column: u16) -> u8 {
    if bar.width <= 1 {
        return 0;
    }
    let offset = column.saturating_sub(bar.x).min(bar.width - 1);
    (u32::from(offset) * 100 / u32::from(bar.width - 1)) as u8
}

pub(super) fn calculate_tab_index(column: u16) -> Option<usize> {
    const DIVIDER_WIDTH: u16 = 1;
    const PADDING_LEFT_WIDTH: u16 = 1;
    const PADDING_RIGHT_WIDTH: u16 = 1;

    let mut x = 0u16;

    for (i, cfg) in TABS.iter().enumerate() {
        let title_width = cfg.title.width() as u16;
        let divider_width = if i < TABS.len() - 1 {
            DIVIDER_WIDTH
        } else {
            0
        };

        let tab_start = x;
        let tab_end = x
            .saturating_add(PADDING_LEFT_WIDTH)
            .saturating_add(title_width)
            .saturating_add(PADDING_RIGHT_WIDTH);

        if column >= tab_start && column < tab_end {
            return Some(i);
        }

        x = tab_end.saturating_add(divider_width);
    }

    None
}
