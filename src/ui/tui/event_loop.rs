use super::guard::TuiGuard;
use super::keyboard::handle_key;
use super::mouse::{MouseState, handle_mouse};
use super::toast::ToastSlot;
use super::views::draw_ui;
use crate::app::AppSnapshot;
use crate::messages::app::{AppCommand, AppEvent};
use crossterm::{
    event::{self, Event},
    terminal,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

pub(super) async fn run_tui_internal(
    mut app: AppSnapshot,
    tx: mpsc::Sender<AppCommand>,
    mut rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    let _guard = TuiGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let _ = tx.send(AppCommand::Bootstrap).await;

    let poll_timeout = Duration::from_millis(50);
    let mut toast = ToastSlot::default();
    let mut mouse_state = MouseState::default();

    loop {
        while let Ok(evt) = rx.try_recv() {
            match evt {
                AppEvent::State(s) => app = *s,
                AppEvent::Toast(t) => toast.show(t),
            }
        }

        let current_toast = toast.current().cloned();
        terminal.draw(|f| draw_ui(f, &app, current_toast.as_ref()))?;

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(&app, key, &tx, &mut toast).await {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    let (cols, rows) = terminal::size()?;
                    handle_mouse(
                        Rect::new(0, 0, cols, rows),
                        current_toast.is_some(),
                        app.help_visible,
                        mouse,
                        &mut mouse_state,
                        &tx,
                    )
                    .await;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
