use crossterm::event::{KeyCode, KeyEvent};

use crate::terminal::state::AppState;

pub enum Action {
    None,
    Reload,
    Quit,
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        KeyCode::Char('r') => Action::Reload,

        KeyCode::Down | KeyCode::Char('j') => {
            state.move_selection(1);
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_selection(-1);
            Action::None
        }
        KeyCode::Home => {
            state.list_state.select(Some(0));
            Action::None
        }
        KeyCode::End => {
            if !state.threads.is_empty() {
                state.list_state.select(Some(state.threads.len() - 1));
            }
            Action::None
        }

        _ => Action::None,
    }
}
