use crate::core::prelude::{app::App, effects::CoreEffects};
use crate::settings;

/// 启动时把设置写入 App
pub fn apply_settings_to_app(app: &mut App, s: &settings::AppSettings) {
    app.volume = crate::features::player::volume::VolumeControl::new(s.volume, s.muted);
    app.play_queue.set_repeat(s.repeat_mode);
    if s.shuffle != app.play_queue.is_shuffled() {
        app.play_queue.set_shuffle(s.shuffle);
    }
    app.history.set_capacity(s.history_capacity);
    app.rewind_threshold_ms = s.rewind_threshold_ms;
    app.seek_step_ms = s.seek_step_ms;
    app.volume_step = s.volume_step;
}

pub fn sync_settings_from_app(s: &mut settings::AppSettings, app: &App) {
    s.volume = app.volume.level();
    s.muted = app.volume.muted();
    s.repeat_mode = app.play_queue.repeat();
    s.shuffle = app.play_queue.is_shuffled();
}

/// 把 App 中可持久化的部分同步回设置，有变化时安排写盘
pub fn persist_if_changed(s: &mut settings::AppSettings, app: &App, effects: &mut CoreEffects) {
    let before = s.clone();
    sync_settings_from_app(s, app);
    if *s != before {
        effects.persist_settings(s.clone());
    }
}
