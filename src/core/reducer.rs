use crate::app::{App, Track};
use crate::audio_worker::{AudioBackend, AudioCommand, AudioEvent, AudioSettings};
use crate::messages::app::{AppCommand, AppEvent};
use crate::settings as app_settings;

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::core::effects::{CoreDispatch, CoreEffects, run_effects};

use crate::features::settings as settings_handlers;

mod player;
mod ui;

enum CoreMsg {
    Ui(AppCommand),
    Audio(AudioEvent),
}

struct CoreState {
    app: App,
    settings: app_settings::AppSettings,
}

enum UiAction {
    Handled,
    NotHandled,
    Quit,
}

impl CoreState {
    fn new_with_settings(settings: app_settings::AppSettings) -> Self {
        let mut app = App::default();
        settings_handlers::apply_settings_to_app(&mut app, &settings);
        Self { app, settings }
    }

    #[cfg(test)]
    fn with_tracks(tracks: Vec<Track>) -> Self {
        let mut state = Self::new_with_settings(app_settings::AppSettings::default());
        state.app.play_queue.set_tracks(tracks, None);
        state
    }
}

fn reduce(msg: CoreMsg, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match msg {
        CoreMsg::Ui(cmd) => {
            match ui::handle_ui(&cmd, state, effects) {
                UiAction::Quit => return true,
                UiAction::Handled => return false,
                UiAction::NotHandled => {}
            }
            if matches!(player::handle_ui(&cmd, state, effects), UiAction::NotHandled) {
                tracing::debug!(?cmd, "未处理的命令");
            }
        }
        CoreMsg::Audio(evt) => {
            player::handle_audio_event(evt, state, effects);
        }
    }

    false
}

/// 启动时的曲目来源：命令行给了路径就用扫描结果，否则尝试恢复上次的队列
async fn prepare_state(
    state: &mut CoreState,
    tracks: Vec<Track>,
    data_dir: &Path,
) {
    if !tracks.is_empty() {
        tracing::info!(count = tracks.len(), "使用命令行指定的曲目");
        state.app.play_queue.set_tracks(tracks, None);
    } else {
        match crate::player_state::load_player_state_async(data_dir).await {
            Ok(snapshot) => {
                match crate::player_state::apply_snapshot_to_app(&snapshot, &mut state.app) {
                    Ok(()) => {
                        tracing::info!(
                            play_queue_len = state.app.play_queue.len(),
                            current_index = ?state.app.play_queue.current_index(),
                            pending_seek = ?state.app.pending_seek,
                            saved_at_epoch_ms = snapshot.saved_at_epoch_ms,
                            "播放状态已恢复（默认暂停）"
                        );
                    }
                    Err(e) => {
                        tracing::warn!("状态恢复失败: {}, 使用默认状态", e);
                    }
                }
            }
            Err(crate::player_state::PlayerStateError::Io(ref e))
                if e.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!("首次启动，无历史状态");
            }
            Err(e) => {
                tracing::warn!("加载状态失败: {}, 使用默认状态", e);
            }
        }
    }

    // 恢复出来的顺序已经是随机的，只在与设置不一致时重排
    settings_handlers::apply_settings_to_app(&mut state.app, &state.settings);
}

pub fn spawn_app_actor(
    tracks: Vec<Track>,
    audio_backend: AudioBackend,
    settings: app_settings::AppSettings,
    data_dir: PathBuf,
) -> (
    mpsc::Sender<AppCommand>,
    mpsc::Receiver<AppEvent>,
    tokio::task::JoinHandle<()>,
) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let audio_settings = AudioSettings {
        time_update_ms: settings.time_update_ms,
    };
    let (tx_audio, mut rx_audio_evt) =
        crate::audio_worker::spawn_audio_worker(audio_backend, audio_settings);

    let handle = tokio::spawn(async move {
        let mut state = CoreState::new_with_settings(settings);
        let mut state_save_task: Option<tokio::task::JoinHandle<()>> = None;

        prepare_state(&mut state, tracks, &data_dir).await;

        let _ = tx_audio
            .send(AudioCommand::SetVolume(state.app.volume.effective()))
            .await;

        let mut state_save_timer = tokio::time::interval(Duration::from_secs(30));
        state_save_timer.tick().await; // 立即消耗第一个周期
        let dispatch = CoreDispatch {
            tx_audio: &tx_audio,
            tx_evt: &tx_evt,
            data_dir: &data_dir,
        };

        loop {
            let msg = tokio::select! {
                _ = state_save_timer.tick() => {
                    // 定时保存状态（后台写盘，避免阻塞主循环）
                    if state_save_task.as_ref().is_some_and(|h| !h.is_finished()) {
                        tracing::trace!("上一次保存尚未完成，跳过本次");
                        continue;
                    }
                    if let Some(h) = state_save_task.take() {
                        let _ = h.await;
                    }
                    let data_dir = data_dir.clone();
                    let app = state.app.clone();
                    state_save_task = Some(tokio::spawn(async move {
                        if let Err(e) = crate::player_state::save_player_state_async(&data_dir, &app).await {
                            tracing::warn!("定时保存播放状态失败: {}", e);
                        }
                    }));
                    continue; // 继续循环，不生成 CoreMsg
                }
                maybe_cmd = rx_cmd.recv() => match maybe_cmd {
                    Some(cmd) => CoreMsg::Ui(cmd),
                    None => {
                        tracing::info!("UI 通道关闭，Core 退出");
                        break;
                    }
                },
                Some(evt) = rx_audio_evt.recv() => CoreMsg::Audio(evt),
            };

            let mut effects = CoreEffects::default();
            let should_quit = reduce(msg, &mut state, &mut effects);
            run_effects(effects, &dispatch).await;
            if should_quit {
                break;
            }
        }

        // ========== 保存播放状态与设置 ==========
        if let Some(h) = state_save_task.take() {
            let _ = h.await;
        }
        match crate::player_state::save_player_state_async(&data_dir, &state.app).await {
            Ok(()) => tracing::info!("播放状态已保存"),
            Err(e) => tracing::error!("保存播放状态失败: {}", e),
        };
        settings_handlers::sync_settings_from_app(&mut state.settings, &state.app);
        if let Err(e) = app_settings::save_settings(&data_dir, &state.settings) {
            tracing::error!("保存设置失败: {}", e);
        }
        let _ = tx_audio.send(AudioCommand::Stop).await;
    });

    (tx_cmd, rx_evt, handle)
}
