use super::styles::list_highlight_style;
use super::widgets::{list_state, track_item};
use crate::app::AppSnapshot;
use ratatui::{
    Frame,
    prelude::Rect,
    widgets::{Block, Borders, List, Paragraph},
};

/// 即将播放的曲目，按播放顺序排列
pub(super) fn draw_queue(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let title = format!(
        "接下来 ({}){}",
        app.queue.len(),
        if app.player.shuffled { " · 随机" } else { "" }
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.queue.is_empty() {
        f.render_widget(Paragraph::new("队列中没有后续曲目").block(block), area);
        return;
    }

    let items: Vec<_> = app
        .queue
        .iter()
        .enumerate()
        .map(|(i, t)| track_item(format!("{:>3}. ", i + 1), t))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(list_highlight_style())
        .highlight_symbol("> ");
    let mut st = list_state(app.queue_selected, app.queue.len());
    f.render_stateful_widget(list, area, &mut st);
}
