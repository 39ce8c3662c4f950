use crate::app::TransportState;
use crate::core::prelude::{
    app::App,
    audio::{AudioCommand, AudioEvent},
    effects::CoreEffects,
};
use crate::features::player::transport::{load_current, load_index};

/// 处理音频事件
///
/// 播放相关字段只在这里根据引擎回报改写，界面上显示的状态始终与引擎一致。
pub fn handle_audio_event(app: &mut App, evt: AudioEvent, effects: &mut CoreEffects) {
    match evt {
        AudioEvent::MediaChanged {
            play_id,
            queue_index,
            title,
            duration_ms,
        } => {
            if app.pending_load == Some(queue_index) {
                app.pending_load = None;
            }
            let loaded = app.play_queue.track(queue_index).cloned();

            if let Some(prev) = app.now_playing.take()
                && app.play_id != Some(play_id)
            {
                app.history.push(prev);
            }

            app.duration_ms = duration_ms.or_else(|| loaded.as_ref().and_then(|t| t.duration_ms));
            app.now_playing = loaded;
            app.play_id = Some(play_id);
            app.position_ms = 0;
            app.scrubber.cancel();
            app.play_status = format!("已加载: {title}");
            tracing::info!(
                play_id,
                queue_index,
                title = %title,
                duration_ms = ?app.duration_ms,
                "媒体已切换"
            );

            match app.pending_seek.take() {
                Some(p) if p.queue_index == queue_index => {
                    tracing::debug!(ms = p.position_ms, "恢复上次播放进度");
                    effects.send_audio_warn(
                        AudioCommand::SeekToMs(p.position_ms),
                        "AudioWorker 通道已关闭：SeekToMs 发送失败",
                    );
                }
                Some(p) => {
                    tracing::debug!(queue_index = p.queue_index, "丢弃其他曲目的待恢复进度");
                }
                None => {}
            }
        }
        AudioEvent::Playing => {
            app.transport = TransportState::Playing;
            app.play_status = "播放中".to_owned();
        }
        AudioEvent::Paused => {
            app.transport = TransportState::Paused;
            app.play_status = "已暂停".to_owned();
        }
        AudioEvent::Stopped => {
            app.transport = TransportState::Stopped;
            app.play_status = "已停止".to_owned();
            app.position_ms = 0;
            app.scrubber.cancel();
        }
        AudioEvent::TimeChanged {
            play_id,
            position_ms,
        } => {
            if app.play_id != Some(play_id) {
                return;
            }
            app.position_ms = match app.duration_ms {
                Some(total) => position_ms.min(total),
                None => position_ms,
            };
        }
        AudioEvent::Ended { play_id } => {
            if app.play_id != Some(play_id) {
                tracing::debug!(play_id, current = ?app.play_id, "忽略过期的 Ended 事件");
                return;
            }
            match app.play_queue.advance_auto() {
                Some(idx) => load_index(app, effects, idx, false),
                None => {
                    tracing::info!("队列播放结束");
                    effects.send_audio_warn(
                        AudioCommand::Stop,
                        "AudioWorker 通道已关闭：Stop 发送失败",
                    );
                    app.play_status = "播放结束".to_owned();
                }
            }
        }
        AudioEvent::VolumeChanged(v) => {
            app.engine_volume = Some(v);
        }
        AudioEvent::NeedsReload => {
            tracing::info!("引擎没有可用的 sink，重新加载当前曲目");
            if !load_current(app, effects, false) {
                app.play_status = "播放队列为空".to_owned();
            }
        }
        AudioEvent::CommandFailed { command, message } => {
            tracing::warn!(command, err = %message, "播放命令失败");
            match command {
                "load" => app.pending_load = None,
                "set_volume" => {
                    // 滑块回到引擎实际使用的音量；静音时 set_level 不生效
                    if let Some(v) = app.engine_volume {
                        app.volume.set_level(v);
                    }
                }
                _ => {}
            }
            app.play_status = format!("播放命令失败: {message}");
            effects.error(format!("播放命令失败({command}): {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{PendingSeek, Track};
    use crate::core::effects::CoreEffect;

    fn app_with(n: usize) -> App {
        let mut app = App::default();
        let tracks = (0..n)
            .map(|i| Track {
                path: format!("/music/{i}.mp3").into(),
                title: format!("t{i}"),
                duration_ms: Some(100_000),
                ..Default::default()
            })
            .collect();
        app.play_queue.set_tracks(tracks, None);
        app
    }

    fn media_changed(app: &mut App, effects: &mut CoreEffects, play_id: u64) {
        let queue_index = app.pending_load.unwrap_or(0);
        media_changed_for(app, effects, play_id, queue_index);
    }

    fn media_changed_for(
        app: &mut App,
        effects: &mut CoreEffects,
        play_id: u64,
        queue_index: usize,
    ) {
        handle_audio_event(
            app,
            AudioEvent::MediaChanged {
                play_id,
                queue_index,
                title: "x".to_owned(),
                duration_ms: Some(200_000),
            },
            effects,
        );
    }

    #[test]
    fn media_changed_moves_previous_into_history() {
        let mut app = app_with(3);
        let mut effects = CoreEffects::default();

        load_index(&mut app, &mut effects, 0, false);
        media_changed(&mut app, &mut effects, 1);
        assert!(app.history.is_empty());
        assert_eq!(app.now_playing.as_ref().map(|t| t.title.as_str()), Some("t0"));

        load_index(&mut app, &mut effects, 1, false);
        media_changed(&mut app, &mut effects, 2);
        assert_eq!(app.history.get(0).map(|t| t.title.as_str()), Some("t0"));
        assert_eq!(app.now_playing.as_ref().map(|t| t.title.as_str()), Some("t1"));
        assert_eq!(app.duration_ms, Some(200_000));
        assert_eq!(app.pending_load, None);
    }

    #[test]
    fn time_changed_updates_position_but_not_drag() {
        let mut app = app_with(1);
        let mut effects = CoreEffects::default();
        media_changed(&mut app, &mut effects, 5);
        app.scrubber.drag_to(90);

        handle_audio_event(
            &mut app,
            AudioEvent::TimeChanged {
                play_id: 5,
                position_ms: 50_000,
            },
            &mut effects,
        );
        assert_eq!(app.position_ms, 50_000);
        assert_eq!(app.scrubber.displayed_percent(app.position_ms, app.duration_ms), 90);

        app.scrubber.cancel();
        assert_eq!(app.scrubber.displayed_percent(app.position_ms, app.duration_ms), 25);
    }

    #[test]
    fn stale_time_changed_is_ignored() {
        let mut app = app_with(1);
        let mut effects = CoreEffects::default();
        media_changed(&mut app, &mut effects, 5);
        handle_audio_event(
            &mut app,
            AudioEvent::TimeChanged {
                play_id: 4,
                position_ms: 50_000,
            },
            &mut effects,
        );
        assert_eq!(app.position_ms, 0);
    }

    #[test]
    fn ended_loads_next_track() {
        let mut app = app_with(2);
        let mut effects = CoreEffects::default();
        media_changed(&mut app, &mut effects, 1);
        handle_audio_event(&mut app, AudioEvent::Ended { play_id: 1 }, &mut effects);
        assert_eq!(app.pending_load, Some(1));
    }

    #[test]
    fn ended_at_queue_end_stops() {
        let mut app = app_with(1);
        let mut effects = CoreEffects::default();
        media_changed(&mut app, &mut effects, 1);
        handle_audio_event(&mut app, AudioEvent::Ended { play_id: 1 }, &mut effects);
        assert!(effects.actions.iter().any(|e| matches!(
            e,
            CoreEffect::SendAudio {
                cmd: AudioCommand::Stop,
                ..
            }
        )));
        assert_eq!(app.play_status, "播放结束");
    }

    #[test]
    fn stale_ended_is_ignored() {
        let mut app = app_with(2);
        let mut effects = CoreEffects::default();
        media_changed(&mut app, &mut effects, 2);
        handle_audio_event(&mut app, AudioEvent::Ended { play_id: 1 }, &mut effects);
        assert_eq!(app.pending_load, None);
        assert_eq!(app.play_queue.current_index(), Some(0));
    }

    #[test]
    fn transport_follows_engine_events() {
        let mut app = app_with(1);
        let mut effects = CoreEffects::default();
        handle_audio_event(&mut app, AudioEvent::Playing, &mut effects);
        assert_eq!(app.transport, TransportState::Playing);
        handle_audio_event(&mut app, AudioEvent::Paused, &mut effects);
        assert_eq!(app.transport, TransportState::Paused);
        handle_audio_event(&mut app, AudioEvent::Stopped, &mut effects);
        assert_eq!(app.transport, TransportState::Stopped);
    }

    #[test]
    fn command_failed_surfaces_error_toast() {
        let mut app = app_with(1);
        let mut effects = CoreEffects::default();
        handle_audio_event(
            &mut app,
            AudioEvent::CommandFailed {
                command: "set_volume",
                message: "音量无效: 120".to_owned(),
            },
            &mut effects,
        );
        assert!(effects.actions.iter().any(|e| matches!(
            e,
            CoreEffect::EmitToast(t) if t.message.contains("音量无效")
        )));
        assert!(app.play_status.contains("播放命令失败"));
    }

    fn seeks(effects: &CoreEffects) -> Vec<u64> {
        effects
            .actions
            .iter()
            .filter_map(|e| match e {
                CoreEffect::SendAudio {
                    cmd: AudioCommand::SeekToMs(ms),
                    ..
                } => Some(*ms),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn pending_seek_is_sent_after_media_change() {
        let mut app = app_with(1);
        app.pending_seek = Some(PendingSeek {
            queue_index: 0,
            position_ms: 42_000,
        });
        let mut effects = CoreEffects::default();
        media_changed(&mut app, &mut effects, 1);
        assert_eq!(seeks(&effects), vec![42_000]);
        assert_eq!(app.pending_seek, None);
    }

    #[test]
    fn pending_seek_for_another_track_is_not_sent() {
        let mut app = app_with(3);
        app.pending_seek = Some(PendingSeek {
            queue_index: 1,
            position_ms: 7_000,
        });
        let mut effects = CoreEffects::default();
        media_changed_for(&mut app, &mut effects, 1, 2);
        assert!(seeks(&effects).is_empty());
        assert_eq!(app.pending_seek, None);
    }

    #[test]
    fn overlapping_loads_resolve_tracks_from_engine() {
        let mut app = app_with(3);
        let mut effects = CoreEffects::default();
        load_index(&mut app, &mut effects, 1, false);
        load_index(&mut app, &mut effects, 2, false);
        assert_eq!(app.pending_load, Some(2));

        media_changed_for(&mut app, &mut effects, 1, 1);
        assert_eq!(app.now_playing.as_ref().map(|t| t.title.as_str()), Some("t1"));
        assert_eq!(app.pending_load, Some(2));

        media_changed_for(&mut app, &mut effects, 2, 2);
        assert_eq!(app.now_playing.as_ref().map(|t| t.title.as_str()), Some("t2"));
        assert_eq!(app.history.get(0).map(|t| t.title.as_str()), Some("t1"));
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.pending_load, None);
    }

    #[test]
    fn rejected_volume_reverts_to_engine_value() {
        let mut app = app_with(1);
        let mut effects = CoreEffects::default();
        handle_audio_event(&mut app, AudioEvent::VolumeChanged(80), &mut effects);
        app.volume.adjust(5);
        assert_eq!(app.volume.level(), 85);

        handle_audio_event(
            &mut app,
            AudioEvent::CommandFailed {
                command: "set_volume",
                message: "音量无效".to_owned(),
            },
            &mut effects,
        );
        assert_eq!(app.volume.level(), 80);
        assert_eq!(app.engine_volume, Some(80));
    }
}
