//! Typed engine commands and the keyboard mapping
//!
//! Every front end turns its raw input (browser key names, crossterm key
//! codes, button clicks) into a [`Command`] before it reaches the engine.

use crate::core::{BinaryOp, Calculation, DigitToken, ExpressionEngine, OperatorKey};

/// One engine transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// A digit or the decimal point
    Digit(DigitToken),
    /// A binary or unary operator
    Operator(OperatorKey),
    /// Evaluate the pending operation
    Equals,
    /// Reset everything (AC)
    Clear,
    /// Delete the last typed character (DEL)
    Delete,
}

impl Command {
    /// Maps a browser-style key name (`KeyboardEvent.key`) to a command
    ///
    /// ```
    /// use calc_widget::command::Command;
    ///
    /// assert_eq!(Command::from_key("Enter"), Some(Command::Equals));
    /// assert_eq!(Command::from_key("q"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "Enter" | "=" => Self::Equals,
            "Escape" => Self::Clear,
            "Backspace" => Self::Delete,
            "+" => Self::Operator(OperatorKey::Binary(BinaryOp::Add)),
            "-" => Self::Operator(OperatorKey::Binary(BinaryOp::Subtract)),
            "*" => Self::Operator(OperatorKey::Binary(BinaryOp::Multiply)),
            "/" => Self::Operator(OperatorKey::Binary(BinaryOp::Divide)),
            "%" => Self::Operator(OperatorKey::Percent),
            "F9" => Self::Operator(OperatorKey::Negate),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                return DigitToken::new(c).map(Self::Digit);
            }
        };
        Some(command)
    }

    /// Runs the command against an engine
    ///
    /// Returns the calculation when the command was a successful or failed
    /// `equals`.
    pub fn apply(self, engine: &mut ExpressionEngine) -> Option<Calculation> {
        match self {
            Self::Digit(token) => engine.input_digit(token),
            Self::Operator(key) => engine.input_operator(key),
            Self::Equals => return engine.equals(),
            Self::Clear => engine.clear(),
            Self::Delete => engine.delete_last_char(),
        }
        None
    }

    /// Returns the keypad label for this command
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Digit(token) => token.as_char().to_string(),
            Self::Operator(key) => key.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Delete => "DEL".to_string(),
        }
    }
}

impl From<DigitToken> for Command {
    fn from(token: DigitToken) -> Self {
        Self::Digit(token)
    }
}

impl From<OperatorKey> for Command {
    fn from(key: OperatorKey) -> Self {
        Self::Operator(key)
    }
}

impl From<BinaryOp> for Command {
    fn from(op: BinaryOp) -> Self {
        Self::Operator(OperatorKey::Binary(op))
    }
}
