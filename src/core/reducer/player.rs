use super::{CoreState, UiAction};
use crate::audio_worker::AudioEvent;
use crate::core::effects::CoreEffects;
use crate::features::player::{audio, scrubber, transport, volume};
use crate::features::settings as settings_handlers;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    let app = &mut state.app;
    let step = i16::from(app.volume_step);
    let mut settings_touched = false;
    match cmd {
        AppCommand::PlayerTogglePause => transport::toggle_pause(app, effects),
        AppCommand::PlayerStop => transport::stop(effects),
        AppCommand::PlayerNext => transport::skip_next(app, effects),
        AppCommand::PlayerRewind => transport::rewind(app, effects),
        AppCommand::QueuePlaySelected => transport::play_queue_selected(app, effects),
        AppCommand::PlayerToggleShuffle => {
            transport::toggle_shuffle(app);
            settings_touched = true;
        }
        AppCommand::PlayerCycleRepeat => {
            transport::cycle_repeat(app);
            settings_touched = true;
        }
        AppCommand::PlayerSeekBackwardMs { ms } => {
            scrubber::seek_relative(app, effects, -i64::try_from(*ms).unwrap_or(i64::MAX));
        }
        AppCommand::PlayerSeekForwardMs { ms } => {
            scrubber::seek_relative(app, effects, i64::try_from(*ms).unwrap_or(i64::MAX));
        }
        AppCommand::VolumeUp => {
            volume::adjust(app, effects, step);
            settings_touched = true;
        }
        AppCommand::VolumeDown => {
            volume::adjust(app, effects, -step);
            settings_touched = true;
        }
        AppCommand::ToggleMute => {
            volume::toggle_mute(app, effects);
            settings_touched = true;
        }
        AppCommand::ScrubberDrag { percent } => scrubber::drag(app, *percent),
        AppCommand::ScrubberRelease => scrubber::release(app, effects),
        _ => return UiAction::NotHandled,
    }

    if settings_touched {
        settings_handlers::persist_if_changed(&mut state.settings, &state.app, effects);
    }
    effects.emit_state(&state.app);
    UiAction::Handled
}

pub fn handle_audio_event(evt: AudioEvent, state: &mut CoreState, effects: &mut CoreEffects) {
    let volume_rejected = matches!(
        evt,
        AudioEvent::CommandFailed {
            command: "set_volume",
            ..
        }
    );
    audio::handle_audio_event(&mut state.app, evt, effects);
    if volume_rejected {
        settings_handlers::persist_if_changed(&mut state.settings, &state.app, effects);
    }
    effects.emit_state(&state.app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Track, TransportState};
    use crate::audio_worker::AudioCommand;
    use crate::core::effects::CoreEffect;

    fn state_with(n: usize) -> CoreState {
        CoreState::with_tracks(
            (0..n)
                .map(|i| Track {
                    path: format!("/music/{i}.mp3").into(),
                    title: format!("t{i}"),
                    duration_ms: Some(100_000),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn loaded(state: &mut CoreState, duration_ms: u64) {
        state.app.now_playing = state.app.play_queue.current().cloned();
        state.app.transport = TransportState::Playing;
        state.app.duration_ms = Some(duration_ms);
    }

    fn volumes(effects: &CoreEffects) -> Vec<u8> {
        effects
            .actions
            .iter()
            .filter_map(|e| match e {
                CoreEffect::SendAudio {
                    cmd: AudioCommand::SetVolume(v),
                    ..
                } => Some(*v),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn mute_unmute_restores_engine_volume() {
        let mut state = state_with(1);
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::VolumeDown, &mut state, &mut effects);
        handle_ui(&AppCommand::ToggleMute, &mut state, &mut effects);
        handle_ui(&AppCommand::ToggleMute, &mut state, &mut effects);
        assert_eq!(volumes(&effects), vec![75, 0, 75]);
        assert_eq!(state.settings.volume, 75);
        assert!(!state.settings.muted);
    }

    #[test]
    fn volume_while_muted_sends_nothing() {
        let mut state = state_with(1);
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::ToggleMute, &mut state, &mut effects);
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::VolumeUp, &mut state, &mut effects);
        assert!(volumes(&effects).is_empty());
        assert_eq!(state.app.volume.level(), 80);
    }

    #[test]
    fn seek_backward_clamps_at_zero() {
        let mut state = state_with(1);
        loaded(&mut state, 100_000);
        state.app.position_ms = 2_000;
        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PlayerSeekBackwardMs { ms: 5_000 },
            &mut state,
            &mut effects,
        );
        assert!(effects.actions.iter().any(|e| matches!(
            e,
            CoreEffect::SendAudio {
                cmd: AudioCommand::SeekToMs(0),
                ..
            }
        )));
    }

    #[test]
    fn drag_then_release_seeks_to_percent() {
        let mut state = state_with(1);
        loaded(&mut state, 200_000);
        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::ScrubberDrag { percent: 40 },
            &mut state,
            &mut effects,
        );
        assert!(state.app.scrubber.is_dragging());
        handle_ui(&AppCommand::ScrubberRelease, &mut state, &mut effects);
        assert!(!state.app.scrubber.is_dragging());
        assert!(effects.actions.iter().any(|e| matches!(
            e,
            CoreEffect::SendAudio {
                cmd: AudioCommand::SeekToMs(80_000),
                ..
            }
        )));
    }

    #[test]
    fn rejected_volume_is_reverted_and_persisted() {
        let mut state = state_with(1);
        let mut effects = CoreEffects::default();
        handle_audio_event(AudioEvent::VolumeChanged(80), &mut state, &mut effects);
        handle_ui(&AppCommand::VolumeUp, &mut state, &mut effects);
        assert_eq!(state.settings.volume, 85);

        let mut effects = CoreEffects::default();
        handle_audio_event(
            AudioEvent::CommandFailed {
                command: "set_volume",
                message: "音量无效".to_owned(),
            },
            &mut state,
            &mut effects,
        );
        assert_eq!(state.app.volume.level(), 80);
        assert_eq!(state.settings.volume, 80);
        assert!(
            effects
                .actions
                .iter()
                .any(|e| matches!(e, CoreEffect::PersistSettings(s) if s.volume == 80))
        );
    }
}
