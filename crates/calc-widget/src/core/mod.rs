//! Calculator core: the input/expression engine and its pure helpers
//!
//! Everything in here is presentation-free. Front ends reach the engine
//! through [`crate::widget::CalculatorWidget`].

pub mod engine;
pub mod expression;
pub mod format;
pub mod history;
mod operations;

pub use engine::{Calculation, CalculatorState, DisplayValue, ExpressionEngine};
pub use operations::{apply, parse_operand, BinaryOp, DigitToken, OperatorKey};

use thiserror::Error;

/// Text shown in place of a number after a failed calculation
pub const ERROR_TEXT: &str = "Error";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these ever escape the engine: a failed calculation is rendered as
/// [`ERROR_TEXT`] and the user recovers by typing a digit or clearing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result is not a finite number
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// An operand could not be read as a number
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
}
