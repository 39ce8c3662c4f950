use std::time::{Duration, Instant};
use tokio::select;
use tokio::sync::mpsc;

use super::AudioSettings;
use super::messages::{AudioCommand, AudioEvent};
use crate::error::AudioError;

/// 不出声的引擎：按墙钟模拟播放进度，用于 `--no-audio`、测试以及音频设备不可用时
#[derive(Debug, Default)]
struct SimClock {
    /// 上一次暂停/seek 时累计的进度
    base_ms: u64,
    resumed_at: Option<Instant>,
}

impl SimClock {
    fn position_ms(&self) -> u64 {
        let running = self
            .resumed_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.base_ms.saturating_add(running)
    }

    fn pause(&mut self) {
        self.base_ms = self.position_ms();
        self.resumed_at = None;
    }

    fn resume(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
    }

    fn reset(&mut self, at_ms: u64, running: bool) {
        self.base_ms = at_ms;
        self.resumed_at = running.then(Instant::now);
    }
}

struct Loaded {
    duration_ms: Option<u64>,
    ended: bool,
}

pub(super) struct NullEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    play_id: u64,
    paused: bool,
    clock: SimClock,
    loaded: Option<Loaded>,
    settings: AudioSettings,
}

impl NullEngine {
    pub(super) fn new(
        tx_evt: mpsc::Sender<AudioEvent>,
        rx_cmd: mpsc::Receiver<AudioCommand>,
        settings: AudioSettings,
    ) -> Self {
        Self {
            tx_evt,
            rx_cmd,
            play_id: 0,
            paused: false,
            clock: SimClock::default(),
            loaded: None,
            settings,
        }
    }

    pub(super) async fn run(mut self) {
        let mut time_tick =
            tokio::time::interval(Duration::from_millis(self.settings.time_update_ms.max(5)));
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
                    self.tick().await;
                }
            }
        }
        tracing::info!("NullEngine 命令通道关闭，退出");
    }

    async fn tick(&mut self) {
        if self.paused {
            return;
        }
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if loaded.ended {
            return;
        }

        let mut position_ms = self.clock.position_ms();
        let finished = loaded.duration_ms.is_some_and(|d| position_ms >= d);
        if let Some(d) = loaded.duration_ms {
            position_ms = position_ms.min(d);
        }
        let _ = self
            .tx_evt
            .send(AudioEvent::TimeChanged {
                play_id: self.play_id,
                position_ms,
            })
            .await;

        if finished {
            loaded.ended = true;
            self.clock.pause();
            tracing::debug!(play_id = self.play_id, "模拟播放结束");
            let _ = self
                .tx_evt
                .send(AudioEvent::Ended {
                    play_id: self.play_id,
                })
                .await;
        }
    }

    async fn fail(&self, command: &'static str, err: AudioError) {
        let _ = self
            .tx_evt
            .send(AudioEvent::CommandFailed {
                command,
                message: err.to_string(),
            })
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
                if !path.exists() {
                    self.fail("load", AudioError::FileNotFound(path)).await;
                    return;
                }
                self.play_id = self.play_id.wrapping_add(1).max(1);
                self.paused = start_paused;
                self.clock.reset(0, !start_paused);
                self.loaded = Some(Loaded {
                    duration_ms: duration_hint_ms,
                    ended: false,
                });
                let _ = self
                    .tx_evt
                    .send(AudioEvent::MediaChanged {
                        play_id: self.play_id,
                        queue_index,
                        title,
                        duration_ms: duration_hint_ms,
                    })
                    .await;
                let evt = if start_paused {
                    AudioEvent::Paused
                } else {
                    AudioEvent::Playing
                };
                let _ = self.tx_evt.send(evt).await;
            }
            AudioCommand::TogglePause => {
                if self.loaded.is_none() {
                    let _ = self.tx_evt.send(AudioEvent::NeedsReload).await;
                    return;
                }
                self.paused = !self.paused;
                if self.paused {
                    self.clock.pause();
                    let _ = self.tx_evt.send(AudioEvent::Paused).await;
                } else {
                    self.clock.resume();
                    let _ = self.tx_evt.send(AudioEvent::Playing).await;
                }
            }
            AudioCommand::Stop => {
                self.play_id = self.play_id.wrapping_add(1).max(1);
                self.paused = false;
                self.loaded = None;
                self.clock.reset(0, false);
                let _ = self.tx_evt.send(AudioEvent::Stopped).await;
            }
            AudioCommand::SeekToMs(ms) => {
                let Some(loaded) = self.loaded.as_mut() else {
                    self.fail("seek", AudioError::NothingLoaded).await;
                    return;
                };
                let target = loaded.duration_ms.map_or(ms, |d| ms.min(d));
                loaded.ended = false;
                self.clock.reset(target, !self.paused);
                let _ = self
                    .tx_evt
                    .send(AudioEvent::TimeChanged {
                        play_id: self.play_id,
                        position_ms: target,
                    })
                    .await;
            }
            AudioCommand::SetVolume(v) => {
                if v > 100 {
                    self.fail("set_volume", AudioError::InvalidVolume(v)).await;
                    return;
                }
                let _ = self.tx_evt.send(AudioEvent::VolumeChanged(v)).await;
            }
        }
    }
}

pub(super) fn spawn(
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_evt: mpsc::Sender<AudioEvent>,
    settings: AudioSettings,
) {
    tokio::spawn(async move {
        NullEngine::new(tx_evt, rx_cmd, settings).run().await;
    });
}
