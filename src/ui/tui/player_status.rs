use super::layout::TransportLayout;
use super::styles::{dim_style, scrubber_style, transport_style};
use super::utils::{fmt_duration, fmt_mmss, repeat_icon, volume_icon_label};
use crate::app::{PlayerSnapshot, TransportState};
use ratatui::{
    Frame,
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// 当前曲目：标题、艺人、专辑、封面路径
pub(super) fn draw_now_playing(f: &mut Frame, area: Rect, player: &PlayerSnapshot) {
    let block = Block::default().borders(Borders::ALL).title("正在播放");
    let lines = match &player.now_playing {
        Some(t) => vec![
            Line::from(t.title.clone()),
            Line::from(format!(
                "{} · {}",
                t.artists_label(),
                t.album.as_deref().unwrap_or("未知专辑")
            )),
            Line::styled(
                t.album_art
                    .as_ref()
                    .map(|p| format!("封面: {}", p.display()))
                    .unwrap_or_else(|| "封面: 无".to_owned()),
                dim_style(),
            ),
        ],
        None => vec![Line::from("-")],
    };
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

pub(super) fn draw_transport(f: &mut Frame, layout: &TransportLayout, player: &PlayerSnapshot) {
    let state_label = match player.transport {
        TransportState::Playing => "▶ 播放中",
        TransportState::Paused => "⏸ 已暂停",
        TransportState::Stopped => "⏹ 已停止",
    };
    let status = Line::from(format!("{state_label} | {}", player.play_status));
    f.render_widget(
        Paragraph::new(status).style(transport_style(player.transport)),
        layout.status,
    );

    let gauge = Gauge::default()
        .gauge_style(scrubber_style(player.scrubbing))
        .percent(u16::from(player.scrubber_percent.min(100)))
        .label(time_label(player));
    f.render_widget(gauge, layout.scrubber);

    let volume = if player.muted {
        format!("{} 静音 ({}%)", volume_icon_label(player.volume_icon), player.volume_level)
    } else {
        format!("{} {}%", volume_icon_label(player.volume_icon), player.volume_level)
    };
    let controls = format!(
        "音量: {volume} | 循环: {} {} | 随机: {}",
        repeat_icon(player.repeat),
        player.repeat.label(),
        if player.shuffled { "开" } else { "关" },
    );
    f.render_widget(Paragraph::new(controls), layout.controls);
}

/// 拖动时显示拖动位置对应的时间，而不是引擎上报的时间
fn time_label(player: &PlayerSnapshot) -> String {
    let shown_ms = match (player.scrubbing, player.duration_ms) {
        (true, Some(total)) => {
            crate::features::player::scrubber::percent_to_ms(player.scrubber_percent, total)
        }
        _ => player.position_ms,
    };
    format!(
        "{} / {}",
        fmt_mmss(shown_ms),
        fmt_duration(player.duration_ms)
    )
}
