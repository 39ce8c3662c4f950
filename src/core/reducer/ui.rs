use super::{CoreState, UiAction};
use crate::app::{TABS, tab_index_for_view};
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;

pub fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    let app = &mut state.app;
    match cmd {
        AppCommand::Quit => return UiAction::Quit,
        AppCommand::Bootstrap => {}
        AppCommand::TabNext => {
            let next = (tab_index_for_view(app.view) + 1) % TABS.len();
            app.view = TABS[next].view;
        }
        AppCommand::TabTo { index } => {
            let Some(cfg) = TABS.get(*index) else {
                return UiAction::Handled;
            };
            app.view = cfg.view;
        }
        AppCommand::ToggleHelp => {
            app.help_visible = !app.help_visible;
        }
        AppCommand::QueueMoveUp => {
            app.queue_selected = app.queue_selected.saturating_sub(1);
        }
        AppCommand::QueueMoveDown => {
            let len = app.play_queue.upcoming_indices().len();
            if app.queue_selected + 1 < len {
                app.queue_selected += 1;
            }
        }
        AppCommand::HistoryMoveUp => {
            app.history_selected = app.history_selected.saturating_sub(1);
        }
        AppCommand::HistoryMoveDown => {
            if app.history_selected + 1 < app.history.len() {
                app.history_selected += 1;
            }
        }
        _ => return UiAction::NotHandled,
    }
    effects.emit_state(app);
    UiAction::Handled
}
