//! Keypad layout shared by every front end
//!
//! ```text
//! [ AC ] [DEL ] [ %  ] [ ÷ ]
//! [ 7  ] [ 8  ] [ 9  ] [ × ]
//! [ 4  ] [ 5  ] [ 6  ] [ - ]
//! [ 1  ] [ 2  ] [ 3  ] [ + ]
//! [     0     ] [ .  ] [ = ]
//! ```

use crate::appearance::{ButtonColors, Palette};
use crate::command::Command;
use crate::core::{BinaryOp, DigitToken, OperatorKey};

/// Visual category of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Digits and the decimal point
    Number,
    /// `+ - × ÷`
    Operator,
    /// `%`
    Function,
    /// AC
    Clear,
    /// `=`
    Equal,
    /// DEL
    Delete,
}

impl ButtonKind {
    /// Name used in aria labels
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Function => "function",
            Self::Clear => "clear",
            Self::Equal => "equal",
            Self::Delete => "delete",
        }
    }

    /// Colours for this kind in a palette
    #[must_use]
    pub const fn colors(self, palette: &Palette) -> ButtonColors {
        match self {
            Self::Number => palette.number,
            Self::Function | Self::Delete => palette.function,
            Self::Operator | Self::Clear | Self::Equal => palette.operator,
        }
    }
}

/// One keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Command sent when activated
    pub command: Command,
    /// Visual category
    pub kind: ButtonKind,
    /// DOM element id
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Leftmost grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButton {
    /// Creates a single-column button
    #[must_use]
    pub fn new(command: Command, row: usize, col: usize) -> Self {
        let kind = kind_of(command);
        Self {
            command,
            kind,
            id: element_id(command),
            row,
            col,
            span: 1,
        }
    }

    /// Sets the column span
    #[must_use]
    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// Button label
    #[must_use]
    pub fn label(&self) -> String {
        self.command.label()
    }

    /// Hover tooltip
    #[must_use]
    pub fn tooltip(&self) -> String {
        match self.command {
            Command::Clear => "Clear all (Esc)".to_string(),
            Command::Delete => "Delete last digit (Backspace)".to_string(),
            Command::Equals => "Calculate result (Enter)".to_string(),
            Command::Operator(OperatorKey::Percent) => "Convert to percentage".to_string(),
            Command::Operator(OperatorKey::Negate) => "Change sign (F9)".to_string(),
            Command::Operator(OperatorKey::Binary(op)) => match op {
                BinaryOp::Divide => "Divide (/)".to_string(),
                BinaryOp::Multiply => "Multiply (*)".to_string(),
                BinaryOp::Subtract => "Subtract (-)".to_string(),
                BinaryOp::Add => "Add (+)".to_string(),
            },
            Command::Digit(token) if token.is_point() => "Decimal point".to_string(),
            Command::Digit(token) => format!("Number {}", token.as_char()),
        }
    }

    /// Accessible name
    #[must_use]
    pub fn aria_label(&self) -> String {
        match self.command {
            Command::Delete => "Delete last digit".to_string(),
            _ => format!("{} {}", self.label(), self.kind.as_str()),
        }
    }

    /// True if the button covers grid cell `(row, col)`
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }
}

fn kind_of(command: Command) -> ButtonKind {
    match command {
        Command::Digit(_) => ButtonKind::Number,
        Command::Operator(OperatorKey::Binary(_)) => ButtonKind::Operator,
        Command::Operator(_) => ButtonKind::Function,
        Command::Equals => ButtonKind::Equal,
        Command::Clear => ButtonKind::Clear,
        Command::Delete => ButtonKind::Delete,
    }
}

fn element_id(command: Command) -> String {
    let suffix = match command {
        Command::Digit(token) if token.is_point() => "decimal".to_string(),
        Command::Digit(token) => token.as_char().to_string(),
        Command::Operator(OperatorKey::Binary(op)) => match op {
            BinaryOp::Add => "plus".to_string(),
            BinaryOp::Subtract => "minus".to_string(),
            BinaryOp::Multiply => "times".to_string(),
            BinaryOp::Divide => "divide".to_string(),
        },
        Command::Operator(OperatorKey::Percent) => "percent".to_string(),
        Command::Operator(OperatorKey::Negate) => "negate".to_string(),
        Command::Equals => "equals".to_string(),
        Command::Clear => "clear".to_string(),
        Command::Delete => "delete".to_string(),
    };
    format!("btn-{suffix}")
}

/// The 4×5 calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Number of grid columns
    pub const COLS: usize = 4;
    /// Number of grid rows
    pub const ROWS: usize = 5;

    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: u8| -> Command {
            DigitToken::digit(d).map_or(Command::Digit(DigitToken::POINT), Command::Digit)
        };

        let buttons = vec![
            // Row 0: AC DEL % ÷
            KeypadButton::new(Command::Clear, 0, 0),
            KeypadButton::new(Command::Delete, 0, 1),
            KeypadButton::new(OperatorKey::Percent.into(), 0, 2),
            KeypadButton::new(BinaryOp::Divide.into(), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButton::new(digit(7), 1, 0),
            KeypadButton::new(digit(8), 1, 1),
            KeypadButton::new(digit(9), 1, 2),
            KeypadButton::new(BinaryOp::Multiply.into(), 1, 3),
            // Row 2: 4 5 6 -
            KeypadButton::new(digit(4), 2, 0),
            KeypadButton::new(digit(5), 2, 1),
            KeypadButton::new(digit(6), 2, 2),
            KeypadButton::new(BinaryOp::Subtract.into(), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButton::new(digit(1), 3, 0),
            KeypadButton::new(digit(2), 3, 1),
            KeypadButton::new(digit(3), 3, 2),
            KeypadButton::new(BinaryOp::Add.into(), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButton::new(digit(0), 4, 0).with_span(2),
            KeypadButton::new(Command::Digit(DigitToken::POINT), 4, 2),
            KeypadButton::new(Command::Equals, 4, 3),
        ];

        Self { buttons }
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Button covering grid cell `(row, col)`
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Button with the given element id
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Button that sends `command`
    #[must_use]
    pub fn find_by_command(&self, command: Command) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.command == command)
    }
}
