use super::toast::ToastSlot;
use crate::app::{AppSnapshot, View};
use crate::messages::app::AppCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

#[derive(Debug)]
pub(super) enum KeyAction {
    Ignore,
    Send(AppCommand),
    DismissToast,
    Quit,
}

pub(super) async fn handle_key(
    app: &AppSnapshot,
    key: KeyEvent,
    tx: &mpsc::Sender<AppCommand>,
    toast: &mut ToastSlot,
) -> bool {
    match key_action(app, key) {
        KeyAction::Ignore => false,
        KeyAction::Send(cmd) => {
            tracing::trace!(?cmd, "按键命令");
            let _ = tx.send(cmd).await;
            false
        }
        KeyAction::DismissToast => {
            toast.dismiss();
            false
        }
        KeyAction::Quit => {
            let _ = tx.send(AppCommand::Quit).await;
            true
        }
    }
}

/// 按键到命令的映射，不做任何 IO
pub(super) fn key_action(app: &AppSnapshot, key: KeyEvent) -> KeyAction {
    // Some terminals/platforms may report both press and release events; we only act on press/repeat.
    if matches!(key.kind, KeyEventKind::Release) {
        return KeyAction::Ignore;
    }

    if app.help_visible {
        return match key.code {
            KeyCode::Char('?') | KeyCode::Esc => KeyAction::Send(AppCommand::ToggleHelp),
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        };
    }

    let m = key.modifiers;
    let ctrl = m.contains(KeyModifiers::CONTROL);
    let alt = m.contains(KeyModifiers::ALT);
    let seek = app.player.seek_step_ms;

    let cmd = match key.code {
        KeyCode::Char('q') if !ctrl => return KeyAction::Quit,
        KeyCode::Esc => return KeyAction::DismissToast,
        KeyCode::Char('?') => AppCommand::ToggleHelp,
        KeyCode::Tab => AppCommand::TabNext,
        KeyCode::Char(c @ ('1' | '2')) if !ctrl && !alt => AppCommand::TabTo {
            index: (c as usize) - ('1' as usize),
        },

        KeyCode::Char(' ') => AppCommand::PlayerTogglePause,
        KeyCode::Char(']') => AppCommand::PlayerNext,
        KeyCode::Char('[') => AppCommand::PlayerRewind,
        KeyCode::Char('s') if ctrl => AppCommand::PlayerStop,
        KeyCode::Char('s') => AppCommand::PlayerToggleShuffle,
        KeyCode::Char('r') => AppCommand::PlayerCycleRepeat,
        KeyCode::Char('m') => AppCommand::ToggleMute,
        KeyCode::Char('+' | '=') => AppCommand::VolumeUp,
        KeyCode::Char('-') => AppCommand::VolumeDown,
        KeyCode::Up if alt => AppCommand::VolumeUp,
        KeyCode::Down if alt => AppCommand::VolumeDown,
        KeyCode::Left if ctrl => AppCommand::PlayerSeekBackwardMs { ms: seek },
        KeyCode::Right if ctrl => AppCommand::PlayerSeekForwardMs { ms: seek },

        KeyCode::Up => match app.view {
            View::Queue => AppCommand::QueueMoveUp,
            View::History => AppCommand::HistoryMoveUp,
        },
        KeyCode::Down => match app.view {
            View::Queue => AppCommand::QueueMoveDown,
            View::History => AppCommand::HistoryMoveDown,
        },
        KeyCode::Enter if matches!(app.view, View::Queue) => AppCommand::QueuePlaySelected,
        _ => return KeyAction::Ignore,
    };
    KeyAction::Send(cmd)
}
