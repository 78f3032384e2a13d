//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append a character to the expression.
    Input(char),
    Backspace,
    /// Clear the expression and the result line.
    Clear,
    Evaluate,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    Quit,
    None,
}

/// Map a key event to an action.
///
/// Plain characters always edit the expression, so no letter key quits.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('u') if ctrl => KeyAction::Clear,
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => KeyAction::None,
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter | KeyCode::Char('=') => KeyAction::Evaluate,
        KeyCode::Char(c) => KeyAction::Input(c),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(key(KeyCode::Esc)), KeyAction::Quit);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), KeyAction::Quit);
    }

    #[test]
    fn letters_are_input() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), KeyAction::Input('q'));
        assert_eq!(map_key(key(KeyCode::Char('Q'))), KeyAction::Input('Q'));
        let shifted = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(map_key(shifted), KeyAction::Input('Q'));
    }

    #[test]
    fn arithmetic_is_input() {
        for c in "0123456789+-*/%^(). ".chars() {
            assert_eq!(map_key(key(KeyCode::Char(c))), KeyAction::Input(c), "{c:?}");
        }
    }

    #[test]
    fn evaluate_keys() {
        assert_eq!(map_key(key(KeyCode::Enter)), KeyAction::Evaluate);
        assert_eq!(map_key(key(KeyCode::Char('='))), KeyAction::Evaluate);
    }

    #[test]
    fn editing_keys() {
        assert_eq!(map_key(key(KeyCode::Backspace)), KeyAction::Backspace);
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), KeyAction::Clear);
    }

    #[test]
    fn modified_chars_ignored() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), KeyAction::None);
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(map_key(event), KeyAction::None);
    }

    #[test]
    fn scroll_keys() {
        assert_eq!(map_key(key(KeyCode::Up)), KeyAction::ScrollUp);
        assert_eq!(map_key(key(KeyCode::Down)), KeyAction::ScrollDown);
        assert_eq!(map_key(key(KeyCode::PageUp)), KeyAction::PageUp);
        assert_eq!(map_key(key(KeyCode::PageDown)), KeyAction::PageDown);
        assert_eq!(map_key(key(KeyCode::Home)), KeyAction::Home);
        assert_eq!(map_key(key(KeyCode::End)), KeyAction::End);
    }

    #[test]
    fn unknown_key() {
        assert_eq!(map_key(key(KeyCode::F(5))), KeyAction::None);
        assert_eq!(map_key(key(KeyCode::Tab)), KeyAction::None);
    }
}
