/*
[INPUT]:  Crossterm key and focus events
[OUTPUT]: AppState mutations (refresh, selection, tabs) and quit requests
[POS]:    TUI event routing
[UPDATE]: When changing keybindings
*/

use ratatui::crossterm::event::KeyCode;

use super::app::{AppState, Tab};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('r') | KeyCode::F(5) => {
            app.manual_refresh();
            false
        }
        KeyCode::Tab => {
            app.next_tab();
            false
        }
        KeyCode::Char('1') => {
            app.set_tab(Tab::Tasks);
            false
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Logs);
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection(-1);
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection(1);
            false
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_first();
            false
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_last();
            false
        }
        _ => false,
    }
}

/// The terminal regained focus; refetch like a screen coming back to the foreground
pub(super) fn handle_focus_gained(app: &mut AppState) {
    app.resume();
}
