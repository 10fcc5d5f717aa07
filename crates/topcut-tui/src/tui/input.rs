// Keyboard input handling.
//
// Translates crossterm key events into ViewState mutations (depth, selected
// player, bracket scroll) or a UserCommand for the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use topcut_core::RequestedTop;

use super::{UserCommand, ViewState};

/// Rows moved by PageUp / PageDown in the bracket panel.
const PAGE_ROWS: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the event loop has to act on the key
/// (quitting). Returns `None` when the key was handled by mutating
/// `ViewState` or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Some platforms report both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UserCommand::Quit),

        // Bracket depth
        KeyCode::Char('t') | KeyCode::Tab => {
            view_state.cycle_top();
            None
        }
        KeyCode::Char('4') => {
            view_state.set_requested_top(RequestedTop::Top4);
            None
        }
        KeyCode::Char('8') => {
            view_state.set_requested_top(RequestedTop::Top8);
            None
        }
        KeyCode::Char('6') => {
            view_state.set_requested_top(RequestedTop::Top16);
            None
        }

        // Player selection (standings)
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.select_prev();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.select_next();
            None
        }

        // Bracket scrolling
        KeyCode::PageUp => {
            view_state.scroll_bracket_up(PAGE_ROWS);
            None
        }
        KeyCode::PageDown => {
            view_state.scroll_bracket_down(PAGE_ROWS);
            None
        }
        KeyCode::Home => {
            view_state.bracket_scroll = 0;
            view_state.selected = 0;
            None
        }

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
