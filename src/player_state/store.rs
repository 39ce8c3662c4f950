use crate::app::state::{App, PendingSeek};
use crate::domain::model::Track;
use crate::error::PlayerStateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u8 = 1;
const STATE_FILE: &str = "player_state.json";

/// 可序列化的播放队列状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayQueueState {
    pub tracks: Vec<Track>,
    pub order: Vec<usize>,
    pub cursor: Option<usize>,
    #[serde(default)]
    pub shuffled: bool,
}

/// 播放进度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackProgress {
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
}

/// 完整应用状态快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStateSnapshot {
    pub version: u8,
    pub play_queue: PlayQueueState,
    pub progress: PlaybackProgress,
    /// 最近播放在前
    #[serde(default)]
    pub history: Vec<Track>,
    pub saved_at_epoch_ms: i64,
}

/// 将 App 转换为持久化格式
fn app_to_snapshot(app: &App) -> AppStateSnapshot {
    let play_queue = PlayQueueState {
        tracks: app.play_queue.tracks().to_vec(),
        order: app.play_queue.order().to_vec(),
        cursor: app.play_queue.cursor_pos(),
        shuffled: app.play_queue.is_shuffled(),
    };

    AppStateSnapshot {
        version: CURRENT_VERSION,
        play_queue,
        progress: PlaybackProgress {
            position_ms: app.shown_position_ms(),
            duration_ms: app.shown_duration_ms(),
        },
        history: app.history.entries().cloned().collect(),
        saved_at_epoch_ms: chrono::Utc::now().timestamp_millis(),
    }
}

/// 从持久化格式恢复到 App
///
/// 恢复后处于暂停状态；进度只记在 `pending_seek`，
/// 当前曲目第一次加载完成后才下发给引擎。
pub fn apply_snapshot_to_app(
    snapshot: &AppStateSnapshot,
    app: &mut App,
) -> Result<(), PlayerStateError> {
    if snapshot.version != CURRENT_VERSION {
        return Err(PlayerStateError::IncompatibleVersion {
            expected: CURRENT_VERSION,
            found: snapshot.version,
        });
    }

    let q = &snapshot.play_queue;
    let missing = q.tracks.iter().filter(|t| !t.path.exists()).count();
    if missing > 0 {
        tracing::warn!(missing, "恢复的队列中有文件已不存在");
    }
    app.play_queue
        .restore(q.tracks.clone(), q.order.clone(), q.cursor, q.shuffled);

    app.history.clear();
    for t in snapshot.history.iter().rev() {
        app.history.push(t.clone());
    }

    app.now_playing = None;
    app.pending_load = None;
    app.play_id = None;
    app.position_ms = 0;
    app.duration_ms = None;

    let saved_duration = snapshot
        .progress
        .duration_ms
        .or_else(|| app.play_queue.current().and_then(|t| t.duration_ms));
    let position_ms = match saved_duration {
        Some(total) => snapshot.progress.position_ms.min(total),
        None => snapshot.progress.position_ms,
    };
    app.pending_seek = app
        .play_queue
        .current_index()
        .filter(|_| position_ms > 0)
        .map(|queue_index| PendingSeek {
            queue_index,
            position_ms,
        });
    app.play_status = "已恢复上次播放（暂停）".to_owned();

    Ok(())
}

/// 加载播放器状态
pub fn load_player_state(data_dir: &Path) -> Result<AppStateSnapshot, PlayerStateError> {
    let path = state_path(data_dir);
    let bytes = fs::read(&path)?;
    let snapshot: AppStateSnapshot = serde_json::from_slice(&bytes)?;

    if snapshot.version != CURRENT_VERSION {
        return Err(PlayerStateError::IncompatibleVersion {
            expected: CURRENT_VERSION,
            found: snapshot.version,
        });
    }

    Ok(snapshot)
}

/// 保存播放器状态
pub fn save_player_state(data_dir: &Path, app: &App) -> Result<(), PlayerStateError> {
    write_snapshot(data_dir, &app_to_snapshot(app))
}

fn write_snapshot(data_dir: &Path, snapshot: &AppStateSnapshot) -> Result<(), PlayerStateError> {
    fs::create_dir_all(data_dir)?;

    let path = state_path(data_dir);
    let tmp_path = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    fs::write(&tmp_path, bytes)?;

    // 原子性写入
    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(PlayerStateError::Io(e));
    }

    Ok(())
}

pub async fn load_player_state_async(
    data_dir: &Path,
) -> Result<AppStateSnapshot, PlayerStateError> {
    let data_dir = data_dir.to_path_buf();
    tokio::task::spawn_blocking(move || load_player_state(&data_dir))
        .await
        .map_err(|e| PlayerStateError::Join(e.to_string()))?
}

/// 快照在调用方线程生成，只把写盘放到阻塞线程池
pub async fn save_player_state_async(data_dir: &Path, app: &App) -> Result<(), PlayerStateError> {
    let data_dir = data_dir.to_path_buf();
    let snapshot = app_to_snapshot(app);
    tokio::task::spawn_blocking(move || write_snapshot(&data_dir, &snapshot))
        .await
        .map_err(|e| PlayerStateError::Join(e.to_string()))?
}

fn state_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STATE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                path: format!("/music/{i}.flac").into(),
                title: format!("t{i}"),
                duration_ms: Some(60_000),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn save_then_load_restores_queue_and_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();
        app.play_queue.set_tracks(tracks(3), Some(1));
        app.now_playing = app.play_queue.current().cloned();
        app.transport = crate::app::TransportState::Playing;
        app.position_ms = 12_345;
        app.duration_ms = Some(60_000);
        app.history.push(tracks(1).remove(0));

        save_player_state(dir.path(), &app).unwrap();
        let snapshot = load_player_state(dir.path()).unwrap();

        let mut restored = App::default();
        apply_snapshot_to_app(&snapshot, &mut restored).unwrap();
        assert_eq!(restored.play_queue.len(), 3);
        assert_eq!(restored.play_queue.current_index(), Some(1));
        assert_eq!(restored.position_ms, 0);
        assert_eq!(restored.duration_ms, None);
        assert_eq!(
            restored.pending_seek,
            Some(PendingSeek {
                queue_index: 1,
                position_ms: 12_345,
            })
        );
        assert_eq!(restored.shown_position_ms(), 12_345);
        assert_eq!(restored.history.len(), 1);
        assert!(restored.now_playing.is_none());
        assert!(restored.paused());
    }

    #[test]
    fn incompatible_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = app_to_snapshot(&App::default());
        snapshot.version = 99;
        fs::write(
            dir.path().join(STATE_FILE),
            serde_json::to_vec(&snapshot).unwrap(),
        )
        .unwrap();

        match load_player_state(dir.path()) {
            Err(PlayerStateError::IncompatibleVersion { expected, found }) => {
                assert_eq!(expected, CURRENT_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("Expected IncompatibleVersion error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match load_player_state(dir.path()) {
            Err(PlayerStateError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn pending_seek_survives_resave_before_play() {
        let mut app = App::default();
        app.play_queue.set_tracks(tracks(1), None);
        app.pending_seek = Some(PendingSeek {
            queue_index: 0,
            position_ms: 9_000,
        });
        let snapshot = app_to_snapshot(&app);
        assert_eq!(snapshot.progress.position_ms, 9_000);
    }

    #[tokio::test]
    async fn async_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();
        app.play_queue.set_tracks(tracks(2), None);
        save_player_state_async(dir.path(), &app).await.unwrap();
        let snapshot = load_player_state_async(dir.path()).await.unwrap();
        assert_eq!(snapshot.play_queue.tracks.len(), 2);
        assert!(!dir.path().join("player_state.json.tmp").exists());
    }
}
