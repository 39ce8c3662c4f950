use crate::app::{Toast, ToastLevel};
use ratatui::{
    Frame,
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// 绘制 Toast 通知
pub(super) fn draw_toast(f: &mut Frame, area: Rect, toast: &Toast) {
    let (icon, color, close_hint) = match toast.level {
        ToastLevel::Error => ("❌", Color::Red, "[Esc 关闭]"),
        ToastLevel::Warning => ("⚠️ ", Color::Yellow, "[Esc 关闭]"),
        ToastLevel::Info => ("ℹ️ ", Color::Gray, ""),
    };

    let paragraph = Paragraph::new(format!("{} {}  {}", icon, &toast.message, close_hint))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color));

    f.render_widget(paragraph, area);
}

/// UI 侧只保留最新一条；过期的 Info/Warning 自动清除
#[derive(Debug, Default)]
pub(super) struct ToastSlot {
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn show(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&mut self) -> Option<&Toast> {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.as_ref()
    }
}
