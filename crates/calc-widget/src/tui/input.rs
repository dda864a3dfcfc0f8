//! Keyboard input handling
//!
//! Calculator keys go through the same key-name mapping as the browser
//! ([`Command::from_key`]); the TUI adds its own keys for the toggles and quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::command::Command;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// An engine command
    Calculator(Command),
    /// Flip dark/light (`t`)
    ToggleTheme,
    /// Next size preset (`s`)
    CycleSize,
    /// Quit the application (`q`, Ctrl+C)
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('t') => KeyAction::ToggleTheme,
            KeyCode::Char('s') => KeyAction::CycleSize,
            _ => Self::key_name(code)
                .and_then(|name| Command::from_key(&name))
                .map_or(KeyAction::None, KeyAction::Calculator),
        }
    }

    /// Browser-style name of a key code (`KeyboardEvent.key`)
    #[must_use]
    pub fn key_name(code: KeyCode) -> Option<String> {
        let name = match code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => return None,
        };
        Some(name)
    }

    /// Inverse of [`key_name`](Self::key_name), for scripted input
    #[must_use]
    pub fn key_code(name: &str) -> Option<KeyCode> {
        match name {
            "Enter" => Some(KeyCode::Enter),
            "Escape" => Some(KeyCode::Esc),
            "Backspace" => Some(KeyCode::Backspace),
            _ => {
                if let Some(n) = name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                    return Some(KeyCode::F(n));
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyCode::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinaryOp, DigitToken, OperatorKey};

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    // ===== Calculator key tests =====

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for c in '0'..='9' {
            let expected = Command::Digit(DigitToken::new(c).unwrap());
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                KeyAction::Calculator(expected)
            );
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        let cases = [
            ('+', BinaryOp::Add),
            ('-', BinaryOp::Subtract),
            ('*', BinaryOp::Multiply),
            ('/', BinaryOp::Divide),
        ];
        for (c, op) in cases {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                KeyAction::Calculator(op.into())
            );
        }
    }

    #[test]
    fn test_shifted_operator_still_maps() {
        let handler = InputHandler::new();
        let event = KeyEvent::new(KeyCode::Char('*'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key(event),
            KeyAction::Calculator(BinaryOp::Multiply.into())
        );
    }

    #[test]
    fn test_handle_control_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            KeyAction::Calculator(Command::Equals)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('='))),
            KeyAction::Calculator(Command::Equals)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Esc)),
            KeyAction::Calculator(Command::Clear)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            KeyAction::Calculator(Command::Delete)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::F(9))),
            KeyAction::Calculator(Command::Operator(OperatorKey::Negate))
        );
    }

    // ===== App key tests =====

    #[test]
    fn test_handle_app_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('t'))),
            KeyAction::ToggleTheme
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('s'))),
            KeyAction::CycleSize
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_handle_ctrl_c_quits() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('x'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let handler = InputHandler::new();
        for code in [KeyCode::Char('a'), KeyCode::Tab, KeyCode::Up, KeyCode::F(1)] {
            assert_eq!(handler.handle_key(key_event(code)), KeyAction::None);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let handler = InputHandler::new();
        let mut event = key_event(KeyCode::Char('5'));
        event.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key(event), KeyAction::None);
    }

    // ===== Key name tests =====

    #[test]
    fn test_key_name_round_trip() {
        for name in ["Enter", "Escape", "Backspace", "F9", "7", ".", "*"] {
            let code = InputHandler::key_code(name).unwrap();
            assert_eq!(InputHandler::key_name(code).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_key_code_rejects_unknown_names() {
        assert_eq!(InputHandler::key_code("ArrowUp"), None);
        assert_eq!(InputHandler::key_code(""), None);
    }
}
