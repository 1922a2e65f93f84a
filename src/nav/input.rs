use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::nav::search::is_search_char;
use crate::nav::state::Action;

/// Translate a key press into an action. `j`, `k`, `/`, `-` and Enter mean
/// different things depending on whether search mode is active.
pub fn route(key: &KeyEvent, search_active: bool) -> Option<Action> {
    // Only Press events; Repeat and Release would double up input.
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Cancel),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => return Some(Action::MoveUp),
        KeyCode::Down => return Some(Action::MoveDown),
        _ => {}
    }

    if search_active {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Action::EndSearch),
            KeyCode::Backspace => Some(Action::RemoveSearchChar),
            KeyCode::Char(ch) if is_search_char(ch) => Some(Action::AppendSearchChar(ch)),
            _ => None,
        }
    } else {
        match key.code {
            KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Char('/') => Some(Action::StartSearch),
            KeyCode::Char('-') => Some(Action::Back),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_work_in_both_modes() {
        for search in [false, true] {
            assert_eq!(route(&key(KeyCode::Up), search), Some(Action::MoveUp));
            assert_eq!(route(&key(KeyCode::Down), search), Some(Action::MoveDown));
        }
    }

    #[test]
    fn vim_keys_only_while_browsing() {
        assert_eq!(route(&key(KeyCode::Char('k')), false), Some(Action::MoveUp));
        assert_eq!(route(&key(KeyCode::Char('j')), false), Some(Action::MoveDown));
        assert_eq!(
            route(&key(KeyCode::Char('k')), true),
            Some(Action::AppendSearchChar('k'))
        );
        assert_eq!(
            route(&key(KeyCode::Char('j')), true),
            Some(Action::AppendSearchChar('j'))
        );
    }

    #[test]
    fn browsing_keys() {
        assert_eq!(route(&key(KeyCode::Char('/')), false), Some(Action::StartSearch));
        assert_eq!(route(&key(KeyCode::Char('-')), false), Some(Action::Back));
        assert_eq!(route(&key(KeyCode::Enter), false), Some(Action::Submit));
        assert_eq!(route(&key(KeyCode::Esc), false), Some(Action::Cancel));
        assert_eq!(route(&key(KeyCode::Char('x')), false), None);
        assert_eq!(route(&key(KeyCode::Backspace), false), None);
    }

    #[test]
    fn search_keys() {
        assert_eq!(route(&key(KeyCode::Enter), true), Some(Action::EndSearch));
        assert_eq!(route(&key(KeyCode::Esc), true), Some(Action::EndSearch));
        assert_eq!(route(&key(KeyCode::Backspace), true), Some(Action::RemoveSearchChar));
        assert_eq!(
            route(&key(KeyCode::Char('-')), true),
            Some(Action::AppendSearchChar('-'))
        );
        assert_eq!(
            route(&key(KeyCode::Char('.')), true),
            Some(Action::AppendSearchChar('.'))
        );
        assert_eq!(route(&key(KeyCode::Char('/')), true), None);
        assert_eq!(route(&key(KeyCode::Char(' ')), true), None);
    }

    #[test]
    fn ctrl_c_cancels_anywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(route(&ctrl_c, false), Some(Action::Cancel));
        assert_eq!(route(&ctrl_c, true), Some(Action::Cancel));
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(route(&ctrl_j, false), None);
    }

    #[test]
    fn release_events_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(route(&release, false), None);
    }
}
