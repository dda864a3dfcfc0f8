//! Operator and digit tokens plus the arithmetic core
//!
//! Error prevention: the engine only ever receives tokens that went through
//! these constructors, so malformed input cannot reach the state machine.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Binary operator awaiting a second operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (×)
    #[serde(rename = "×")]
    Multiply,
    /// Division (÷)
    #[serde(rename = "÷")]
    Divide,
}

impl BinaryOp {
    /// All binary operators in keypad order
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol used in the expression trail
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Parses a display symbol back into an operator
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '×' => Some(Self::Multiply),
            '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Evaluates `a op b`
    pub fn eval(self, a: f64, b: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Anything accepted by `input_operator`: the four binary operators plus the
/// two unary display transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKey {
    /// A binary operator (+ - × ÷)
    Binary(BinaryOp),
    /// Sign change (±)
    Negate,
    /// Divide the display by 100 (%)
    Percent,
}

impl OperatorKey {
    /// Returns the key symbol
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Binary(op) => op.symbol(),
            Self::Negate => '±',
            Self::Percent => '%',
        }
    }

    /// Parses an operator symbol
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '±' => Some(Self::Negate),
            '%' => Some(Self::Percent),
            other => match BinaryOp::from_symbol(other) {
                Some(op) => Some(Self::Binary(op)),
                None => None,
            },
        }
    }
}

impl From<BinaryOp> for OperatorKey {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

/// A single digit (`0`-`9`) or the decimal point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitToken(char);

impl DigitToken {
    /// The decimal point
    pub const POINT: Self = Self('.');

    /// Creates a token from `0`-`9` or `.`
    #[must_use]
    pub fn new(c: char) -> Option<Self> {
        (c.is_ascii_digit() || c == '.').then_some(Self(c))
    }

    /// Creates a token from a numeric digit value (0-9)
    #[must_use]
    pub fn digit(d: u8) -> Option<Self> {
        char::from_digit(u32::from(d), 10).map(Self)
    }

    /// Returns the token character
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Returns true for the decimal point
    #[must_use]
    pub const fn is_point(self) -> bool {
        self.0 == '.'
    }

    /// Returns true for the digit zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == '0'
    }
}

/// Reads an operand string as a finite `f64`
pub fn parse_operand(operand: &str) -> CalcResult<f64> {
    operand
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::InvalidOperand(operand.to_string()))
}

/// Applies `op` to two operand strings, strictly left to right
pub fn apply(a: &str, b: &str, op: BinaryOp) -> CalcResult<f64> {
    let lhs = parse_operand(a)?;
    let rhs = parse_operand(b)?;
    op.eval(lhs, rhs)
}
