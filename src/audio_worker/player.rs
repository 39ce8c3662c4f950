use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

use super::messages::AudioEvent;
use crate::error::AudioError;

struct ActiveSink {
    sink: Arc<Sink>,
    end_cancel: Arc<AtomicBool>,
}

pub struct PlayerState {
    mixer: Mixer,
    #[allow(dead_code)]
    stream: OutputStream,
    current: Option<ActiveSink>,
    path: Option<PathBuf>,
    title: String,
    play_id: u64,
    paused: bool,
    volume: u8,
    /// 通过重建 sink 实现 seek 时，新 sink 的起点
    seek_base_ms: u64,
}

impl PlayerState {
    pub fn new(mixer: Mixer, stream: OutputStream) -> Self {
        Self {
            mixer,
            stream,
            current: None,
            path: None,
            title: String::new(),
            play_id: 0,
            paused: false,
            volume: 100,
            seek_base_ms: 0,
        }
    }

    pub fn play_id(&self) -> u64 {
        self.play_id
    }

    fn next_play_id(&mut self) -> u64 {
        self.play_id = self.play_id.wrapping_add(1).max(1);
        self.play_id
    }

    pub fn stop(&mut self) {
        self.next_play_id();
        self.stop_current();
        self.path = None;
        self.seek_base_ms = 0;
    }

    fn stop_current(&mut self) {
        if let Some(cur) = self.current.take() {
            tracing::debug!(
                play_id = self.play_id,
                "Stopping current sink, signaling end check thread to cancel"
            );
            cur.end_cancel.store(true, Ordering::Relaxed);
            cur.sink.stop();
        }
    }

    pub fn current_sink(&self) -> Option<Arc<Sink>> {
        self.current.as_ref().map(|cur| Arc::clone(&cur.sink))
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if let Some(sink) = self.current_sink() {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }

    pub fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
        if volume > 100 {
            return Err(AudioError::InvalidVolume(volume));
        }
        self.volume = volume;
        if let Some(sink) = self.current_sink() {
            sink.set_volume(self.gain());
        }
        Ok(())
    }

    fn gain(&self) -> f32 {
        f32::from(self.volume) / 100.0
    }

    pub fn position_ms(&self) -> Option<u64> {
        let sink = self.current.as_ref()?;
        Some(self.seek_base_ms + sink.sink.get_pos().as_millis() as u64)
    }

    /// 打开文件并替换当前 sink，返回新的 play_id 与解码器给出的时长
    pub fn load(
        &mut self,
        tx_evt: &mpsc::Sender<AudioEvent>,
        path: &Path,
        title: &str,
        start_paused: bool,
    ) -> Result<(u64, Option<u64>), AudioError> {
        let (sink, duration_ms) = build_sink_from_path(&self.mixer, path, None, title)?;
        self.stop();
        self.path = Some(path.to_path_buf());
        self.title = title.to_owned();
        self.paused = start_paused;

        let sink = Arc::new(sink);
        sink.set_volume(self.gain());
        if start_paused {
            sink.pause();
        } else {
            sink.play();
        }
        self.attach_sink(tx_evt, sink);
        Ok((self.play_id, duration_ms))
    }

    pub fn seek_to_ms(
        &mut self,
        tx_evt: &mpsc::Sender<AudioEvent>,
        position_ms: u64,
    ) -> Result<(), AudioError> {
        let Some(sink) = self.current_sink() else {
            return Err(AudioError::NothingLoaded);
        };
        let target = Duration::from_millis(position_ms);

        if self.seek_base_ms == 0 {
            match sink.try_seek(target) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(position_ms, err = %e, "解码器不支持 seek，重建 sink");
                }
            }
        }

        let Some(path) = self.path.clone() else {
            return Err(AudioError::NothingLoaded);
        };
        let title = self.title.clone();
        let (sink, _duration_ms) = build_sink_from_path(&self.mixer, &path, Some(target), &title)?;
        self.stop_current();
        self.seek_base_ms = position_ms;

        let sink = Arc::new(sink);
        sink.set_volume(self.gain());
        if self.paused {
            sink.pause();
        } else {
            sink.play();
        }
        self.attach_sink(tx_evt, sink);
        Ok(())
    }

    fn attach_sink(&mut self, tx_evt: &mpsc::Sender<AudioEvent>, sink: Arc<Sink>) {
        let play_id = self.play_id;
        let tx_end = tx_evt.clone();
        let cancel = Arc::new(AtomicBool::new(false));
        let sink_end = Arc::clone(&sink);
        let cancel_end = Arc::clone(&cancel);

        // 监视线程在 sink 播完后把 Ended 投递回 core 的事件队列，自身不碰任何界面状态
        let spawned = thread::Builder::new()
            .name(format!("audio-end-check-{play_id}"))
            .spawn(move || {
                sink_end.sleep_until_end();
                if !cancel_end.load(Ordering::Relaxed) {
                    tracing::debug!(play_id, "End check thread exiting naturally");
                    let _ = tx_end.blocking_send(AudioEvent::Ended { play_id });
                } else {
                    tracing::debug!(play_id, "End check thread was cancelled");
                }
            });
        if let Err(e) = spawned {
            tracing::error!(play_id, err = %e, "无法启动播放结束监视线程，将不会自动切歌");
        }

        self.current = Some(ActiveSink {
            sink,
            end_cancel: cancel,
        });
    }
}

fn build_sink_from_path(
    mixer: &Mixer,
    path: &Path,
    seek: Option<Duration>,
    title: &str,
) -> Result<(Sink, Option<u64>), AudioError> {
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| AudioError::OpenFile {
        title: title.to_owned(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        title: title.to_owned(),
        source: Box::new(e),
    })?;
    let duration_ms = decoder.total_duration().map(|d| d.as_millis() as u64);
    let source: Box<dyn Source + Send> = if let Some(seek) = seek {
        Box::new(decoder.skip_duration(seek))
    } else {
        Box::new(decoder)
    };

    let sink = Sink::connect_new(mixer);
    sink.append(source);
    Ok((sink, duration_ms))
}
