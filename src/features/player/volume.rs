use crate::core::prelude::{app::App, audio::AudioCommand, effects::CoreEffects};

pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Off,
    Min,
    Max,
}

/// 音量滑块与静音开关
///
/// 静音时滑块锁定，`level` 保留静音前的值，取消静音即恢复。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeControl {
    level: u8,
    muted: bool,
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self {
            level: 80,
            muted: false,
        }
    }
}

impl VolumeControl {
    pub fn new(level: u8, muted: bool) -> Self {
        Self {
            level: level.min(MAX_VOLUME),
            muted,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// 实际下发给引擎的音量
    pub fn effective(&self) -> u8 {
        if self.muted { 0 } else { self.level }
    }

    /// 静音时返回 None（滑块不可用）
    pub fn set_level(&mut self, level: u8) -> Option<u8> {
        if self.muted {
            return None;
        }
        self.level = level.min(MAX_VOLUME);
        Some(self.level)
    }

    pub fn adjust(&mut self, delta: i16) -> Option<u8> {
        let next = (i16::from(self.level) + delta).clamp(0, i16::from(MAX_VOLUME)) as u8;
        self.set_level(next)
    }

    pub fn toggle_mute(&mut self) -> u8 {
        self.muted = !self.muted;
        self.effective()
    }

    pub fn icon(&self) -> VolumeIcon {
        if self.muted {
            VolumeIcon::Muted
        } else if self.level == 0 {
            VolumeIcon::Off
        } else if self.level == MAX_VOLUME {
            VolumeIcon::Max
        } else {
            VolumeIcon::Min
        }
    }
}

pub fn adjust(app: &mut App, effects: &mut CoreEffects, delta: i16) {
    match app.volume.adjust(delta) {
        Some(v) => {
            effects.send_audio_warn(
                AudioCommand::SetVolume(v),
                "AudioWorker 通道已关闭：SetVolume 发送失败",
            );
        }
        None => {
            effects.toast_warning("已静音，按 m 取消静音后再调节音量");
        }
    }
}

pub fn toggle_mute(app: &mut App, effects: &mut CoreEffects) {
    let v = app.volume.toggle_mute();
    tracing::info!(muted = app.volume.muted(), level = app.volume.level(), "切换静音");
    effects.send_audio_warn(
        AudioCommand::SetVolume(v),
        "AudioWorker 通道已关闭：SetVolume 发送失败",
    );
}
