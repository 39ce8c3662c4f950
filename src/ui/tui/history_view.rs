use super::styles::list_highlight_style;
use super::widgets::{list_state, track_item};
use crate::app::AppSnapshot;
use ratatui::{
    Frame,
    prelude::Rect,
    widgets::{Block, Borders, List, Paragraph},
};

pub(super) fn draw_history(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("最近播放 ({})", app.history.len()));

    if app.history.is_empty() {
        f.render_widget(Paragraph::new("还没有播放记录").block(block), area);
        return;
    }

    let items: Vec<_> = app
        .history
        .iter()
        .map(|t| track_item(String::new(), t))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(list_highlight_style())
        .highlight_symbol("> ");
    let mut st = list_state(app.history_selected, app.history.len());
    f.render_stateful_widget(list, area, &mut st);
}
