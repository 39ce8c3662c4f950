use crate::app::RepeatMode;
use crate::features::player::volume::VolumeIcon;
use ratatui::layout::Rect;

pub(super) fn fmt_mmss(ms: u64) -> String {
    let total_sec = ms / 1000;
    let m = total_sec / 60;
    let s = total_sec % 60;
    format!("{m:02}:{s:02}")
}

pub(super) fn fmt_duration(ms: Option<u64>) -> String {
    ms.map(fmt_mmss).unwrap_or_else(|| "--:--".to_owned())
}

pub(super) fn volume_icon_label(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Muted => "🔇",
        VolumeIcon::Off => "🔈",
        VolumeIcon::Min => "🔉",
        VolumeIcon::Max => "🔊",
    }
}

pub(super) fn repeat_icon(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::None => "→",
        RepeatMode::LoopQueue => "🔁",
        RepeatMode::LoopOne => "🔂",
    }
}

pub(super) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && row >= area.y
        && column < area.x.saturating_add(area.width)
        && row < area.y.saturating_add(area.height)
}
