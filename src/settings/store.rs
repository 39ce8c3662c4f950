use crate::app::RepeatMode;
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // 播放器设置
    pub volume: u8,
    pub muted: bool,
    pub repeat_mode: RepeatMode,
    pub shuffle: bool,

    // 操作手感
    pub rewind_threshold_ms: u64,
    pub seek_step_ms: u64,
    pub volume_step: u8,

    // 引擎与历史
    pub time_update_ms: u64,
    pub history_capacity: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            volume: 80,
            muted: false,
            repeat_mode: RepeatMode::None,
            shuffle: false,
            rewind_threshold_ms: 3_000,
            seek_step_ms: 5_000,
            volume_step: 5,
            time_update_ms: 250,
            history_capacity: 200,
        }
    }
}

impl AppSettings {
    /// 修正手工编辑后越界的值
    pub fn sanitized(mut self) -> Self {
        self.volume = self.volume.min(100);
        self.volume_step = self.volume_step.clamp(1, 100);
        self.time_update_ms = self.time_update_ms.clamp(20, 5_000);
        self.history_capacity = self.history_capacity.max(1);
        self
    }
}

pub fn load_settings(data_dir: &Path) -> AppSettings {
    let p = settings_path(data_dir);
    let Ok(bytes) = fs::read(&p) else {
        return AppSettings::default();
    };
    match serde_json::from_slice::<AppSettings>(&bytes) {
        Ok(s) => s.sanitized(),
        Err(e) => {
            tracing::warn!(path = %p.display(), err = %e, "settings.json 解析失败，使用默认设置");
            AppSettings::default()
        }
    }
}

pub fn save_settings(data_dir: &Path, s: &AppSettings) -> Result<(), SettingsError> {
    fs::create_dir_all(data_dir).map_err(|source| SettingsError::Save { source })?;
    let p = settings_path(data_dir);
    let tmp = p.with_extension("json.tmp");
    let bytes =
        serde_json::to_vec_pretty(s).map_err(|source| SettingsError::Serialize { source })?;
    fs::write(&tmp, bytes).map_err(|source| SettingsError::Save { source })?;
    if let Err(e) = fs::rename(&tmp, &p) {
        let _ = fs::remove_file(&p);
        fs::rename(&tmp, &p).map_err(|_| SettingsError::Save { source: e })?;
    }
    Ok(())
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), AppSettings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            br#"{"volume": 30, "repeat_mode": "LoopOne"}"#,
        )
        .unwrap();
        let s = load_settings(dir.path());
        assert_eq!(s.volume, 30);
        assert_eq!(s.repeat_mode, RepeatMode::LoopOne);
        assert_eq!(s.rewind_threshold_ms, 3_000);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            br#"{"volume": 250, "volume_step": 0}"#,
        )
        .unwrap();
        let s = load_settings(dir.path());
        assert_eq!(s.volume, 100);
        assert_eq!(s.volume_step, 1);
    }

    #[test]
    fn save_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        save_settings(dir.path(), &AppSettings::default()).unwrap();
        assert!(dir.path().join("settings.json").exists());
        assert!(!dir.path().join("settings.json.tmp").exists());
    }
}
