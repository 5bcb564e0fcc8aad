// ============================================
// src/input.rs
// Key presses -> game actions
// ============================================

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{GameSession, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Type(char),
    Backspace,
    Submit,
    Next,
    Menu,
    Quit,
}

/// Map a key press to an action. What a key means depends on the screen:
/// while typing an answer, letters are letters, not shortcuts.
pub fn map_key(session: &GameSession<'_>, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match session.phase() {
        Phase::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Start),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            _ => None,
        },
        Phase::Playing if session.pending_advance() => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Char('N') => {
                Some(Action::Next)
            }
            KeyCode::Esc => Some(Action::Menu),
            _ => None,
        },
        Phase::Playing => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Esc => Some(Action::Menu),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Type(c))
            }
            _ => None,
        },
        Phase::GameOver => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Start),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Action::Menu),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            _ => None,
        },
    }
}

/// Apply an action to the session. Returns `false` when the player wants out.
pub fn apply(session: &mut GameSession<'_>, action: Action) -> bool {
    match action {
        Action::Start => session.start_game(),
        Action::Type(c) => session.type_char(c),
        Action::Backspace => session.backspace(),
        Action::Submit => {
            session.submit();
        }
        Action::Next => session.confirm_advance(),
        Action::Menu => session.return_to_menu(),
        Action::Quit => return false,
    }
    true
}
