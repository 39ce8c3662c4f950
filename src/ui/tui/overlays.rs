use ratatui::{
    Frame,
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub(super) fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4).min(60);
    let height = area.height.saturating_sub(4).min(20);
    let popup = centered_rect(area, width, height);

    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from("空格: 播放 / 暂停"),
        Line::from("] : 下一首    [ : 上一首 / 回到开头"),
        Line::from("s : 随机播放开关"),
        Line::from("r : 循环模式 (不循环 → 列表循环 → 单曲循环)"),
        Line::from("m : 静音开关"),
        Line::from("Alt+↑/↓ 或 +/- : 音量"),
        Line::from("Ctrl+←/→ : 快退 / 快进"),
        Line::from("Ctrl+s : 停止"),
        Line::from("Tab / 1 / 2 : 切换 队列 / 历史"),
        Line::from("↑/↓ Enter : 选择并播放队列中的曲目"),
        Line::from("鼠标拖动进度条 : 跳转"),
        Line::from("Esc : 关闭提示"),
        Line::from("q : 退出    ? : 关闭帮助"),
    ];
    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("帮助"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
