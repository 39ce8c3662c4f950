use crate::core::prelude::{app::App, audio::AudioCommand, effects::CoreEffects};

/// 请求引擎加载队列中第 `idx` 首
///
/// 只记录待加载的下标，`now_playing` 等字段要等引擎回报 MediaChanged 才更新。
pub fn load_index(app: &mut App, effects: &mut CoreEffects, idx: usize, start_paused: bool) {
    if !app.play_queue.set_current_index(idx) {
        return;
    }
    let Some(track) = app.play_queue.track(idx).cloned() else {
        return;
    };
    app.clamp_queue_selection();
    if app.pending_seek.is_some_and(|p| p.queue_index != idx) {
        tracing::debug!(idx, "切换了曲目，丢弃待恢复的进度");
        app.pending_seek = None;
    }

    tracing::info!(
        idx,
        path = %track.path.display(),
        start_paused,
        "请求加载曲目"
    );
    app.pending_load = Some(idx);
    app.play_status = "加载中...".to_owned();
    app.scrubber.cancel();
    effects.send_audio_warn(
        AudioCommand::Load {
            queue_index: idx,
            title: track.display_title(),
            path: track.path,
            duration_hint_ms: track.duration_ms,
            start_paused,
        },
        "AudioWorker 通道已关闭：Load 发送失败",
    );
}

/// 加载当前游标处的曲目；没有游标时从第一首开始
pub fn load_current(app: &mut App, effects: &mut CoreEffects, start_paused: bool) -> bool {
    let idx = match app.play_queue.current_index() {
        Some(i) => i,
        None => match app.play_queue.order().first() {
            Some(&i) => i,
            None => return false,
        },
    };
    load_index(app, effects, idx, start_paused);
    true
}

pub fn toggle_pause(app: &mut App, effects: &mut CoreEffects) {
    if app.play_queue.is_empty() {
        effects.toast_warning("播放队列为空");
        return;
    }
    if app.now_playing.is_none() && app.pending_load.is_none() {
        load_current(app, effects, false);
        return;
    }
    effects.send_audio_warn(
        AudioCommand::TogglePause,
        "AudioWorker 通道已关闭：TogglePause 发送失败",
    );
}

pub fn stop(effects: &mut CoreEffects) {
    effects.send_audio_warn(AudioCommand::Stop, "AudioWorker 通道已关闭：Stop 发送失败");
}

pub fn skip_next(app: &mut App, effects: &mut CoreEffects) {
    match app.play_queue.skip_next() {
        Some(idx) => load_index(app, effects, idx, false),
        None => {
            effects.toast("已经是最后一首");
        }
    }
}

/// 上一首按钮
///
/// 位于第一首，或当前进度不小于阈值时回到开头；否则切到上一首。
pub fn rewind(app: &mut App, effects: &mut CoreEffects) {
    if app.play_queue.is_empty() {
        return;
    }
    let position_ms = app.shown_position_ms();
    if app.play_queue.at_start() || position_ms >= app.rewind_threshold_ms {
        tracing::debug!(position_ms, "回到曲目开头");
        app.scrubber.cancel();
        if !app.media_loaded() {
            // 引擎里没有 sink，下次加载时从 0 开始
            app.pending_seek = None;
            app.play_status = "将从头播放".to_owned();
            return;
        }
        effects.send_audio_warn(
            AudioCommand::SeekToMs(0),
            "AudioWorker 通道已关闭：SeekToMs 发送失败",
        );
        return;
    }
    if let Some(idx) = app.play_queue.step_back() {
        load_index(app, effects, idx, false);
    }
}

pub fn cycle_repeat(app: &mut App) {
    let mode = app.play_queue.cycle_repeat();
    tracing::info!(repeat = ?mode, "切换循环模式");
    app.play_status = format!("循环: {}", mode.label());
}

pub fn toggle_shuffle(app: &mut App) {
    let on = !app.play_queue.is_shuffled();
    app.play_queue.set_shuffle(on);
    app.queue_selected = 0;
    tracing::info!(shuffle = on, "切换随机播放");
    app.play_status = (if on { "随机播放: 开" } else { "随机播放: 关" }).to_owned();
}

/// 播放队列视图中选中的曲目（按显示顺序计）
pub fn play_queue_selected(app: &mut App, effects: &mut CoreEffects) {
    app.clamp_queue_selection();
    let upcoming = app.play_queue.upcoming_indices();
    let Some(&idx) = upcoming.get(app.queue_selected) else {
        return;
    };
    app.queue_selected = 0;
    load_index(app, effects, idx, false);
}
