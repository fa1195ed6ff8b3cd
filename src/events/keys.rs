//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means to the state machine, independent of the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    Open,
}

/// Maps key events to [`Action`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyBindings;

impl KeyBindings {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a key event.
    ///
    /// Keys without a global meaning (cursor movement) return `None` and are
    /// left to the focused widget.
    pub fn action(&self, key: &KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Action::Quit),
            (KeyCode::Right | KeyCode::Tab, _) => Some(Action::NextTab),
            (KeyCode::Char('l' | 'n'), KeyModifiers::NONE) => Some(Action::NextTab),
            (KeyCode::Left | KeyCode::BackTab, _) => Some(Action::PrevTab),
            (KeyCode::Char('h' | 'p'), KeyModifiers::NONE) => Some(Action::PrevTab),
            (KeyCode::Enter, _) => Some(Action::Open),
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
    fn test_quit_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.action(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_plain_c_is_not_quit() {
        assert_eq!(KeyBindings::new().action(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_next_tab_keys() {
        let bindings = KeyBindings::new();
        for code in [
            KeyCode::Right,
            KeyCode::Char('l'),
            KeyCode::Char('n'),
            KeyCode::Tab,
        ] {
            assert_eq!(bindings.action(&key(code)), Some(Action::NextTab), "{code:?}");
        }
    }

    #[test]
    fn test_prev_tab_keys() {
        let bindings = KeyBindings::new();
        for code in [KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('p')] {
            assert_eq!(bindings.action(&key(code)), Some(Action::PrevTab), "{code:?}");
        }
        assert_eq!(
            bindings.action(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::PrevTab)
        );
    }

    #[test]
    fn test_cursor_keys_are_not_bound() {
        let bindings = KeyBindings::new();
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('k')] {
            assert_eq!(bindings.action(&key(code)), None, "{code:?}");
        }
    }

    #[test]
    fn test_enter_opens() {
        assert_eq!(KeyBindings::new().action(&key(KeyCode::Enter)), Some(Action::Open));
    }
}
