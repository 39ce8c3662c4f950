use super::history_view::draw_history;
use super::layout::split_canvas;
use super::overlays::draw_help_overlay;
use super::player_status::{draw_now_playing, draw_transport};
use super::queue_view::draw_queue;
use super::styles::{dim_style, tab_highlight_style, tab_style};
use super::toast::draw_toast;
use crate::app::{AppSnapshot, TABS, Toast, View, tab_index_for_view};
use ratatui::{Frame, text::Line, widgets::Paragraph, widgets::Tabs};

pub(super) fn draw_ui(f: &mut Frame, app: &AppSnapshot, toast: Option<&Toast>) {
    let area = f.area();
    let layout = split_canvas(area, toast.is_some());

    let titles: Vec<Line> = TABS.iter().map(|c| Line::from(c.title)).collect();
    let tabs = Tabs::new(titles)
        .select(tab_index_for_view(app.view))
        .divider("|")
        .padding(" ", " ")
        .style(tab_style())
        .highlight_style(tab_highlight_style());
    f.render_widget(tabs, layout.tabs);

    match app.view {
        View::Queue => draw_queue(f, layout.body, app),
        View::History => draw_history(f, layout.body, app),
    }

    draw_now_playing(f, layout.now_playing, &app.player);
    draw_transport(f, &layout.transport, &app.player);

    if let Some(t) = toast {
        draw_toast(f, layout.toast, t);
    }

    f.render_widget(
        Paragraph::new("q 退出 | ? 帮助 | 空格 播放/暂停 | [/] 上一首/下一首 | s 随机 | r 循环 | m 静音")
            .style(dim_style()),
        layout.hint,
    );

    if app.help_visible {
        draw_help_overlay(f, area);
    }
}
