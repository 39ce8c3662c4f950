use rodio::OutputStreamBuilder;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;

use super::AudioSettings;
use super::messages::{AudioCommand, AudioEvent};
use super::null_engine::NullEngine;
use super::player::PlayerState;
use crate::error::AudioError;

struct AudioEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    state: PlayerState,
    settings: AudioSettings,
}

impl AudioEngine {
    fn new(
        tx_evt: mpsc::Sender<AudioEvent>,
        rx_cmd: mpsc::Receiver<AudioCommand>,
        state: PlayerState,
        settings: AudioSettings,
    ) -> Self {
        Self {
            tx_evt,
            rx_cmd,
            state,
            settings,
        }
    }

    async fn run(mut self) {
        let mut time_tick =
            tokio::time::interval(Duration::from_millis(self.settings.time_update_ms.max(20)));
        time_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            select! {
                biased;
                maybe_cmd = self.rx_cmd.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        break;
                    };
                    self.handle_audio_command(cmd).await;
                }
                _ = time_tick.tick() => {
                    self.emit_time().await;
                }
            }
        }
        tracing::info!("AudioEngine 命令通道关闭，退出");
    }

    async fn emit_time(&mut self) {
        if self.state.paused() {
            return;
        }
        let Some(position_ms) = self.state.position_ms() else {
            return;
        };
        let _ = self
            .tx_evt
            .send(AudioEvent::TimeChanged {
                play_id: self.state.play_id(),
                position_ms,
            })
            .await;
    }

    async fn fail(&self, command: &'static str, message: String) {
        let _ = self
            .tx_evt
            .send(AudioEvent::CommandFailed { command, message })
            .await;
    }

    async fn handle_audio_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load {
                queue_index,
                path,
                title,
                duration_hint_ms,
                start_paused,
            } => {
                tracing::info!(
                    queue_index,
                    path = %path.display(),
                    title = %title,
                    start_paused,
                    "开始加载"
                );
                match self.state.load(&self.tx_evt, &path, &title, start_paused) {
                    Ok((play_id, duration_ms)) => {
                        let _ = self
                            .tx_evt
                            .send(AudioEvent::MediaChanged {
                                play_id,
                                queue_index,
                                title,
                                duration_ms: duration_ms.or(duration_hint_ms),
                            })
                            .await;
                        let evt = if start_paused {
                            AudioEvent::Paused
                        } else {
                            AudioEvent::Playing
                        };
                        let _ = self.tx_evt.send(evt).await;
                    }
                    Err(e) => {
                        tracing::error!(path = %path.display(), err = %e, "加载失败");
                        self.fail("load", e.to_string()).await;
                    }
                }
            }
            AudioCommand::TogglePause => {
                if self.state.current_sink().is_none() {
                    tracing::warn!("sink 为 None，需要重新加载音频");
                    let _ = self.tx_evt.send(AudioEvent::NeedsReload).await;
                    return;
                }

                let next_paused = !self.state.paused();
                self.state.set_paused(next_paused);
                tracing::debug!(next_paused, "切换暂停状态");
                let evt = if next_paused {
                    AudioEvent::Paused
                } else {
                    AudioEvent::Playing
                };
                let _ = self.tx_evt.send(evt).await;
            }
            AudioCommand::Stop => {
                self.state.stop();
                let _ = self.tx_evt.send(AudioEvent::Stopped).await;
            }
            AudioCommand::SeekToMs(ms) => {
                match self.state.seek_to_ms(&self.tx_evt, ms) {
                    Ok(()) => {
                        let position_ms = self.state.position_ms().unwrap_or(ms);
                        let _ = self
                            .tx_evt
                            .send(AudioEvent::TimeChanged {
                                play_id: self.state.play_id(),
                                position_ms,
                            })
                            .await;
                    }
                    Err(e) => {
                        tracing::warn!(ms, err = %e, "Seek 失败");
                        self.fail("seek", e.to_string()).await;
                    }
                }
            }
            AudioCommand::SetVolume(v) => match self.state.set_volume(v) {
                Ok(()) => {
                    let _ = self.tx_evt.send(AudioEvent::VolumeChanged(v)).await;
                }
                Err(e) => {
                    tracing::warn!(volume = v, err = %e, "设置音量失败");
                    self.fail("set_volume", e.to_string()).await;
                }
            },
        }
    }
}

pub(super) fn spawn(
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_evt: mpsc::Sender<AudioEvent>,
    settings: AudioSettings,
) {
    // rodio 的 OutputStream 不是 Send，整个引擎固定在一个专用线程上
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!(err = %e, "AudioWorker 运行时创建失败");
                let _ = tx_evt.blocking_send(AudioEvent::CommandFailed {
                    command: "output",
                    message: format!("AudioWorker 运行时创建失败: {e}"),
                });
                return;
            }
        };
        let local = tokio::task::LocalSet::new();
        local.block_on(&rt, async move {
            let stream = match OutputStreamBuilder::open_default_stream() {
                Ok(v) => v,
                Err(e) => {
                    let err = AudioError::OutputStream(e.to_string());
                    tracing::error!(err = %err, "改用静音引擎");
                    let _ = tx_evt
                        .send(AudioEvent::CommandFailed {
                            command: "output",
                            message: err.to_string(),
                        })
                        .await;
                    NullEngine::new(tx_evt, rx_cmd, settings).run().await;
                    return;
                }
            };
            let mixer = stream.mixer().clone();
            let state = PlayerState::new(mixer, stream);

            tracing::info!("AudioWorker 已启动");
            AudioEngine::new(tx_evt, rx_cmd, state, settings).run().await;
        });
    });
}
