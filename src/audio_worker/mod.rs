mod engine;
mod messages;
mod null_engine;
mod player;

use tokio::sync::mpsc;

pub use messages::{AudioCommand, AudioEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBackend {
    Real,
    Null,
}

#[derive(Debug, Clone, Copy)]
pub struct AudioSettings {
    /// TimeChanged 上报间隔
    pub time_update_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            time_update_ms: 250,
        }
    }
}

pub fn spawn_audio_worker(
    backend: AudioBackend,
    settings: AudioSettings,
) -> (mpsc::Sender<AudioCommand>, mpsc::Receiver<AudioEvent>) {
    let (tx_cmd, rx_cmd) = mpsc::channel::<AudioCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AudioEvent>(256);

    match backend {
        AudioBackend::Real => engine::spawn(rx_cmd, tx_evt, settings),
        AudioBackend::Null => null_engine::spawn(rx_cmd, tx_evt, settings),
    }

    (tx_cmd, rx_evt)
}
