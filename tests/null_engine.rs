//! 模拟引擎的事件流：加载、暂停、结束、失败回报

use jukebox_ratui::audio_worker::{
    AudioBackend, AudioCommand, AudioEvent, AudioSettings, spawn_audio_worker,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

const WAIT: Duration = Duration::from_secs(5);

async fn next_event(rx: &mut mpsc::Receiver<AudioEvent>) -> AudioEvent {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for audio event")
        .expect("audio worker closed")
}

/// 跳过 TimeChanged，等待第一个满足条件的事件
async fn wait_for(
    rx: &mut mpsc::Receiver<AudioEvent>,
    mut pred: impl FnMut(&AudioEvent) -> bool,
) -> AudioEvent {
    loop {
        let evt = next_event(rx).await;
        if pred(&evt) {
            return evt;
        }
    }
}

fn audio_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let p = dir.path().join(name);
    std::fs::write(&p, b"not really audio").expect("write");
    p
}

fn worker() -> (mpsc::Sender<AudioCommand>, mpsc::Receiver<AudioEvent>) {
    spawn_audio_worker(
        AudioBackend::Null,
        AudioSettings {
            time_update_ms: 10,
        },
    )
}

#[tokio::test]
async fn toggle_pause_without_media_needs_reload() {
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::TogglePause).await.unwrap();
    let evt = wait_for(&mut rx, |e| !matches!(e, AudioEvent::TimeChanged { .. })).await;
    assert!(matches!(evt, AudioEvent::NeedsReload));
}

#[tokio::test]
async fn load_reports_media_then_plays_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::Load {
        queue_index: 3,
        path: audio_file(&dir, "a.mp3"),
        title: "a".to_owned(),
        duration_hint_ms: Some(80),
        start_paused: false,
    })
    .await
    .unwrap();

    let play_id = match next_event(&mut rx).await {
        AudioEvent::MediaChanged {
            play_id,
            queue_index,
            duration_ms,
            ..
        } => {
            assert_eq!(queue_index, 3);
            assert_eq!(duration_ms, Some(80));
            play_id
        }
        other => panic!("expected MediaChanged, got {other:?}"),
    };
    assert!(matches!(next_event(&mut rx).await, AudioEvent::Playing));

    let ended = wait_for(&mut rx, |e| matches!(e, AudioEvent::Ended { .. })).await;
    assert!(matches!(ended, AudioEvent::Ended { play_id: id } if id == play_id));
}

#[tokio::test]
async fn time_changed_never_exceeds_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::Load {
        queue_index: 0,
        path: audio_file(&dir, "a.mp3"),
        title: "a".to_owned(),
        duration_hint_ms: Some(50),
        start_paused: false,
    })
    .await
    .unwrap();

    loop {
        match next_event(&mut rx).await {
            AudioEvent::TimeChanged { position_ms, .. } => assert!(position_ms <= 50),
            AudioEvent::Ended { .. } => break,
            _ => {}
        }
    }
}

#[tokio::test]
async fn start_paused_then_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::Load {
        queue_index: 0,
        path: audio_file(&dir, "a.flac"),
        title: "a".to_owned(),
        duration_hint_ms: None,
        start_paused: true,
    })
    .await
    .unwrap();
    assert!(matches!(
        next_event(&mut rx).await,
        AudioEvent::MediaChanged { .. }
    ));
    assert!(matches!(next_event(&mut rx).await, AudioEvent::Paused));

    tx.send(AudioCommand::TogglePause).await.unwrap();
    let evt = wait_for(&mut rx, |e| !matches!(e, AudioEvent::TimeChanged { .. })).await;
    assert!(matches!(evt, AudioEvent::Playing));
}

#[tokio::test]
async fn invalid_volume_is_reported_as_command_failure() {
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::SetVolume(120)).await.unwrap();
    match next_event(&mut rx).await {
        AudioEvent::CommandFailed { command, message } => {
            assert_eq!(command, "set_volume");
            assert!(message.contains("120"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }

    tx.send(AudioCommand::SetVolume(30)).await.unwrap();
    assert!(matches!(
        next_event(&mut rx).await,
        AudioEvent::VolumeChanged(30)
    ));
}

#[tokio::test]
async fn missing_file_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::Load {
        queue_index: 0,
        path: dir.path().join("gone.mp3"),
        title: "gone".to_owned(),
        duration_hint_ms: None,
        start_paused: false,
    })
    .await
    .unwrap();
    assert!(matches!(
        next_event(&mut rx).await,
        AudioEvent::CommandFailed {
            command: "load",
            ..
        }
    ));
}

#[tokio::test]
async fn seek_without_media_fails() {
    let (tx, mut rx) = worker();
    tx.send(AudioCommand::SeekToMs(1_000)).await.unwrap();
    assert!(matches!(
        next_event(&mut rx).await,
        AudioEvent::CommandFailed {
            command: "seek",
            ..
        }
    ));
}
