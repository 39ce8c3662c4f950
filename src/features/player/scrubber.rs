use crate::app::PendingSeek;
use crate::core::prelude::{app::App, audio::AudioCommand, effects::CoreEffects};

/// 进度条拖动状态
///
/// 拖动期间显示值只取拖动位置，引擎的 TimeChanged 只更新 `App::position_ms`，
/// 松手时才下发 seek，避免进度回跳与拖动互相覆盖。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scrubber {
    drag: Option<u8>,
}

impl Scrubber {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_to(&mut self, percent: u8) {
        self.drag = Some(percent.min(100));
    }

    pub fn release(&mut self) -> Option<u8> {
        self.drag.take()
    }

    pub fn cancel(&mut self) {
        self.drag = None;
    }

    pub fn displayed_percent(&self, position_ms: u64, duration_ms: Option<u64>) -> u8 {
        self.drag
            .unwrap_or_else(|| position_percent(position_ms, duration_ms))
    }
}

/// position / duration * 100，截断到 [0, 100]；时长未知或为 0 时为 0
pub fn position_percent(position_ms: u64, duration_ms: Option<u64>) -> u8 {
    match duration_ms {
        Some(total) if total > 0 => {
            let pct = u128::from(position_ms) * 100 / u128::from(total);
            pct.min(100) as u8
        }
        _ => 0,
    }
}

pub fn percent_to_ms(percent: u8, duration_ms: u64) -> u64 {
    let pct = u128::from(percent.min(100));
    (u128::from(duration_ms) * pct / 100) as u64
}

pub fn drag(app: &mut App, percent: u8) {
    if app.shown_duration_ms().is_none_or(|d| d == 0) {
        return;
    }
    app.scrubber.drag_to(percent);
}

pub fn release(app: &mut App, effects: &mut CoreEffects) {
    let Some(percent) = app.scrubber.release() else {
        return;
    };
    let Some(total) = app.shown_duration_ms().filter(|d| *d > 0) else {
        return;
    };
    let target = percent_to_ms(percent, total);
    tracing::debug!(percent, target_ms = target, "进度条松开");
    seek_to(app, effects, target);
}

pub fn seek_relative(app: &mut App, effects: &mut CoreEffects, delta_ms: i64) {
    let Some(total_ms) = app.shown_duration_ms() else {
        return;
    };
    let cur = app.shown_position_ms() as i64;
    let next = cur.saturating_add(delta_ms).clamp(0, total_ms as i64) as u64;
    seek_to(app, effects, next);
}

/// 有 sink 时直接 seek；否则记成当前曲目的待恢复进度
fn seek_to(app: &mut App, effects: &mut CoreEffects, target_ms: u64) {
    if app.media_loaded() {
        effects.send_audio_warn(
            AudioCommand::SeekToMs(target_ms),
            "AudioWorker 通道已关闭：SeekToMs 发送失败",
        );
        return;
    }
    let Some(queue_index) = app.play_queue.current_index() else {
        return;
    };
    tracing::debug!(queue_index, target_ms, "尚未加载，记录待恢复进度");
    app.pending_seek = (target_ms > 0).then_some(PendingSeek {
        queue_index,
        position_ms: target_ms,
    });
}
