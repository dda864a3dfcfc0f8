//! Expression trail, derived from structured engine state
//!
//! The trail is never edited in place. It is rendered from the pending
//! operation and the last completed calculation every time it is read.

use serde::{Deserialize, Serialize};

use super::format::format_number;
use super::operations::BinaryOp;

/// A captured first operand and the operator waiting for its second operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    /// Left-hand operand as displayed when the operator was pressed
    pub operand: String,
    /// Operator awaiting the second operand
    pub operator: BinaryOp,
}

/// A fully evaluated (or failed) binary calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completed {
    /// Left-hand operand
    pub lhs: String,
    /// Operator applied
    pub operator: BinaryOp,
    /// Right-hand operand
    pub rhs: String,
}

impl Completed {
    /// Renders `lhs op rhs` with grouped operands, without the trailing `=`
    #[must_use]
    pub fn equation(&self) -> String {
        format!(
            "{} {} {}",
            format_number(&self.lhs),
            self.operator,
            format_number(&self.rhs)
        )
    }
}

/// Renders the expression trail
///
/// - pending operation: `"12 +"`
/// - after equals: `"12 + 8 ="`
/// - otherwise empty
#[must_use]
pub fn render_expression(pending: Option<&Pending>, completed: Option<&Completed>) -> String {
    match (pending, completed) {
        (Some(p), _) => format!("{} {}", format_number(&p.operand), p.operator),
        (None, Some(c)) => format!("{} =", c.equation()),
        (None, None) => String::new(),
    }
}
