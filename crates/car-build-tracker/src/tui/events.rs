/*
[INPUT]:  Crossterm key codes
[OUTPUT]: Dispatch to AppState actions
[POS]:    TUI key handling
[UPDATE]: When keybindings change
*/

use crossterm::event::KeyCode;

use super::app::AppState;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('n') | KeyCode::Enter => app.next_step(),
        KeyCode::Char('r') => app.reset_progress(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.increment_interval(),
        KeyCode::Char('-') | KeyCode::Left => app.decrement_interval(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_auto_advance(),
        KeyCode::Tab => app.next_tab(),
        _ => {}
    }
    false
}
