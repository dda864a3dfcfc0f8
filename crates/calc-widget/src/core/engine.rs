//! Calculator input/expression engine
//!
//! Error prevention: the first operand and the pending operator live in one
//! `Option<Pending>`, so an operator can never exist without its operand.
//! The expression trail is rendered from state rather than stored.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::expression::{render_expression, Completed, Pending};
use super::format::{format_number, stringify};
use super::operations::{apply, parse_operand, BinaryOp, DigitToken, OperatorKey};
use super::{CalcError, CalcResult, ERROR_TEXT};

/// What the main display currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// A number being typed or a result (never empty)
    Entry(String),
    /// The last calculation failed
    Error,
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::Entry("0".to_string())
    }
}

impl DisplayValue {
    /// Returns the raw display text (`"Error"` for the error state)
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Entry(value) => value,
            Self::Error => ERROR_TEXT,
        }
    }

    /// Returns true while the error sentinel is shown
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Serializable snapshot of the engine, one field per piece of visible state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    /// Raw display text
    pub display_value: String,
    /// Captured left-hand operand, if a binary operation is pending
    pub first_operand: Option<String>,
    /// Pending operator
    pub operator: Option<BinaryOp>,
    /// Next digit starts a new entry
    pub waiting_for_second_operand: bool,
    /// Previous input was a binary operator
    pub last_button_was_operator: bool,
    /// Expression trail
    pub expression: String,
}

impl Default for CalculatorState {
    fn default() -> Self {
        ExpressionEngine::new().state()
    }
}

/// Outcome of an `equals` press
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// Operands and operator that were evaluated
    pub equation: Completed,
    /// Numeric result or the reason it failed
    pub result: CalcResult<f64>,
}

/// The calculator state machine
#[derive(Debug, Clone, Default)]
pub struct ExpressionEngine {
    display: DisplayValue,
    pending: Option<Pending>,
    completed: Option<Completed>,
    waiting_for_second_operand: bool,
    last_button_was_operator: bool,
}

impl ExpressionEngine {
    /// Creates an engine in its initial state (display `"0"`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw display text
    #[must_use]
    pub fn display_value(&self) -> &str {
        self.display.as_str()
    }

    /// Returns the display text with thousands grouping
    #[must_use]
    pub fn formatted_display(&self) -> String {
        format_number(self.display.as_str())
    }

    /// Returns true while the error sentinel is shown
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display.is_error()
    }

    /// Returns the captured first operand
    #[must_use]
    pub fn first_operand(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.operand.as_str())
    }

    /// Returns the pending operator
    #[must_use]
    pub fn operator(&self) -> Option<BinaryOp> {
        self.pending.as_ref().map(|p| p.operator)
    }

    /// Returns true right after an operator or equals press
    #[must_use]
    pub fn waiting_for_second_operand(&self) -> bool {
        self.waiting_for_second_operand
    }

    /// Returns true if the previous input was a binary operator
    #[must_use]
    pub fn last_button_was_operator(&self) -> bool {
        self.last_button_was_operator
    }

    /// Returns the last completed (or failed) calculation, if any
    #[must_use]
    pub fn last_completed(&self) -> Option<&Completed> {
        self.completed.as_ref()
    }

    /// Renders the expression trail
    #[must_use]
    pub fn expression(&self) -> String {
        render_expression(self.pending.as_ref(), self.completed.as_ref())
    }

    /// Takes a snapshot of the full state
    #[must_use]
    pub fn state(&self) -> CalculatorState {
        CalculatorState {
            display_value: self.display.as_str().to_string(),
            first_operand: self.first_operand().map(str::to_string),
            operator: self.operator(),
            waiting_for_second_operand: self.waiting_for_second_operand,
            last_button_was_operator: self.last_button_was_operator,
            expression: self.expression(),
        }
    }

    /// Handles a digit or decimal point
    ///
    /// A `.` that starts a new entry (after an operator, equals or an error)
    /// shows `"0."` rather than a bare `"."`, so every entry parses as a number.
    pub fn input_digit(&mut self, token: DigitToken) {
        self.last_button_was_operator = false;

        if self.display.is_error() {
            debug!(digit = %token.as_char(), "leaving error state");
            *self = Self::default();
            self.display = DisplayValue::Entry(fresh_entry(token));
            return;
        }

        if self.waiting_for_second_operand {
            self.display = DisplayValue::Entry(fresh_entry(token));
            self.waiting_for_second_operand = false;
            return;
        }

        let DisplayValue::Entry(current) = &mut self.display else {
            return;
        };

        if current == "0" {
            if token.is_zero() {
                return;
            }
            if !token.is_point() {
                *current = token.as_char().to_string();
                return;
            }
        }

        if token.is_point() && current.contains('.') {
            return;
        }

        current.push(token.as_char());
    }

    /// Handles an operator key: `+ - × ÷` or the unary `±` and `%`
    ///
    /// Operator keys are ignored while the error sentinel is shown.
    pub fn input_operator(&mut self, key: OperatorKey) {
        if self.display.is_error() {
            debug!(operator = %key.symbol(), "operator ignored in error state");
            return;
        }

        match key {
            OperatorKey::Negate => self.transform_display(|v| -v),
            OperatorKey::Percent => self.transform_display(|v| v / 100.0),
            OperatorKey::Binary(op) => self.input_binary(op),
        }
    }

    /// Evaluates the pending operation
    ///
    /// Returns `None` (and changes nothing) unless an operator, a first
    /// operand and a freshly typed second operand are all present.
    pub fn equals(&mut self) -> Option<Calculation> {
        if self.waiting_for_second_operand {
            return None;
        }
        let pending = self.pending.take()?;

        let rhs = self.display.as_str().to_string();
        let result = apply(&pending.operand, &rhs, pending.operator);
        let equation = Completed {
            lhs: pending.operand,
            operator: pending.operator,
            rhs,
        };

        match &result {
            Ok(value) => {
                debug!(equation = %equation.equation(), result = value, "evaluated");
                self.display = DisplayValue::Entry(stringify(*value));
                self.completed = Some(equation.clone());
                self.waiting_for_second_operand = true;
                self.last_button_was_operator = false;
            }
            Err(err) => self.fail(Some(equation.clone()), err, true),
        }

        Some(Calculation { equation, result })
    }

    /// Resets every field to its initial value
    pub fn clear(&mut self) {
        debug!("clear");
        *self = Self::default();
    }

    /// Removes the last typed character
    ///
    /// No-op on the error sentinel, on `"0"` and while waiting for an operand.
    /// Anything left that reads as zero without a point becomes `"0"`.
    pub fn delete_last_char(&mut self) {
        if self.waiting_for_second_operand {
            return;
        }
        let DisplayValue::Entry(current) = &mut self.display else {
            return;
        };
        if current == "0" {
            return;
        }

        current.pop();
        if matches!(current.as_str(), "" | "-" | "-0") {
            *current = "0".to_string();
        }
    }

    fn input_binary(&mut self, op: BinaryOp) {
        if self.last_button_was_operator {
            if let Some(pending) = self.pending.as_mut() {
                debug!(from = %pending.operator, to = %op, "operator replaced");
                pending.operator = op;
                return;
            }
        }

        match self.pending.take() {
            None => {
                self.pending = Some(Pending {
                    operand: self.display.as_str().to_string(),
                    operator: op,
                });
                self.completed = None;
            }
            Some(previous) => {
                let rhs = self.display.as_str().to_string();
                match apply(&previous.operand, &rhs, previous.operator) {
                    Ok(value) => {
                        let result = stringify(value);
                        debug!(result = %result, next = %op, "chained evaluation");
                        self.display = DisplayValue::Entry(result.clone());
                        self.pending = Some(Pending {
                            operand: result,
                            operator: op,
                        });
                    }
                    Err(err) => {
                        let failed = Completed {
                            lhs: previous.operand,
                            operator: previous.operator,
                            rhs,
                        };
                        self.fail(Some(failed), &err, true);
                        return;
                    }
                }
            }
        }

        self.waiting_for_second_operand = true;
        self.last_button_was_operator = true;
    }

    fn transform_display(&mut self, f: impl FnOnce(f64) -> f64) {
        match parse_operand(self.display.as_str()) {
            Ok(value) => self.display = DisplayValue::Entry(stringify(f(value))),
            Err(err) => self.fail(None, &err, self.waiting_for_second_operand),
        }
    }

    fn fail(&mut self, equation: Option<Completed>, err: &CalcError, waiting: bool) {
        warn!(error = %err, "calculation failed");
        self.display = DisplayValue::Error;
        self.pending = None;
        self.completed = equation;
        self.waiting_for_second_operand = waiting;
        self.last_button_was_operator = false;
    }
}

/// Display text for a digit that starts a new entry
fn fresh_entry(token: DigitToken) -> String {
    if token.is_point() {
        "0.".to_string()
    } else {
        token.as_char().to_string()
    }
}
