//! Boolean builders that fold constants as they go.
//!
//! These never call a rewriter: they only recognise `true`, `false` and
//! syntactically equal operands.

use crate::expr::DataExpression;

/// `a && b`, simplified when an operand is a boolean constant or both are equal.
pub fn and_(a: DataExpression, b: DataExpression) -> DataExpression {
    if a.is_true() {
        b
    } else if b.is_true() || a == b {
        a
    } else if a.is_false() || b.is_false() {
        DataExpression::false_()
    } else {
        DataExpression::and_(a, b)
    }
}

/// `a || b`, simplified when an operand is a boolean constant or both are equal.
pub fn or_(a: DataExpression, b: DataExpression) -> DataExpression {
    if a.is_false() {
        b
    } else if b.is_false() || a == b {
        a
    } else if a.is_true() || b.is_true() {
        DataExpression::true_()
    } else {
        DataExpression::or_(a, b)
    }
}

/// `!a`, simplified on constants and double negation.
pub fn not_(a: DataExpression) -> DataExpression {
    if a.is_true() {
        DataExpression::false_()
    } else if a.is_false() {
        DataExpression::true_()
    } else if let Some(inner) = a.not_operand() {
        inner.clone()
    } else {
        DataExpression::not_(a)
    }
}

/// Conjunction of all expressions; `true` for an empty iterator.
pub fn join_and(items: impl IntoIterator<Item = DataExpression>) -> DataExpression {
    items.into_iter().fold(DataExpression::true_(), and_)
}
