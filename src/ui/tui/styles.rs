use crate::app::TransportState;
use ratatui::style::{Color, Modifier, Style};

pub(super) fn tab_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub(super) fn tab_highlight_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub(super) fn list_highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn transport_style(state: TransportState) -> Style {
    match state {
        TransportState::Playing => Style::default().fg(Color::Green),
        TransportState::Paused => Style::default().fg(Color::Yellow),
        TransportState::Stopped => Style::default().fg(Color::Gray),
    }
}

/// 拖动进度条时换色，提示当前显示的是拖动值
pub(super) fn scrubber_style(scrubbing: bool) -> Style {
    if scrubbing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    }
}

pub(super) fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
