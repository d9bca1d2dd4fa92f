//! Operator tokens for filter expressions.
//!
//! The [`Op`] enum covers every operator the filter factory emits, grouped
//! by the shape of expression they appear in.

use std::str::FromStr;

use crate::error::QueryError;

/// Filter operator.
///
/// Operators are grouped by the expression shape they produce:
/// - **Comparison**: `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte` - `{field: {op: value}}`
/// - **Membership**: `In`, `Nin` - `{field: {op: [values...]}}`
/// - **Logical**: `And`, `Or` - `{op: [filter...]}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Comparison operators
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,

    // Membership operators
    /// Value is one of the given set.
    In,
    /// Value is none of the given set.
    Nin,

    // Logical operators
    /// All member filters must match.
    And,
    /// At least one member filter must match.
    Or,
}

impl Op {
    /// Every operator, in token table order.
    pub const ALL: [Op; 10] = [
        Op::Eq,
        Op::Ne,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::In,
        Op::Nin,
        Op::And,
        Op::Or,
    ];

    /// Returns `true` for single-value comparison operators.
    pub fn is_comparison(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Returns `true` for set membership operators.
    pub fn is_membership(self) -> bool {
        matches!(self, Op::In | Op::Nin)
    }

    /// Returns `true` for logical combination operators.
    pub fn is_logical(self) -> bool {
        matches!(self, Op::And | Op::Or)
    }

    /// Returns the wire token of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "$eq",
            Op::Ne => "$ne",
            Op::Gt => "$gt",
            Op::Gte => "$gte",
            Op::Lt => "$lt",
            Op::Lte => "$lte",
            Op::In => "$in",
            Op::Nin => "$nin",
            Op::And => "$and",
            Op::Or => "$or",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Op {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}
