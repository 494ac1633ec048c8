//! The rewriter interface.
//!
//! Linearisation never inspects how data is rewritten; it only needs a pure
//! function from expressions to equivalent expressions. Any closure with the
//! right signature is a rewriter.

use crate::expr::{DataExpression, DataNode, EQUAL_NAME};
use crate::lazy;
use crate::subst::Substitution;

/// A pure, total simplification function on data expressions.
pub trait Rewriter {
    /// Rewrite `e` to an equivalent expression.
    fn rewrite(&self, e: &DataExpression) -> DataExpression;

    /// Rewrite `e` after applying `sigma`.
    fn rewrite_with(&self, e: &DataExpression, sigma: &Substitution) -> DataExpression {
        self.rewrite(&sigma.apply(e))
    }
}

impl<F> Rewriter for F
where
    F: Fn(&DataExpression) -> DataExpression,
{
    fn rewrite(&self, e: &DataExpression) -> DataExpression {
        self(e)
    }
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRewriter;

impl Rewriter for IdentityRewriter {
    fn rewrite(&self, e: &DataExpression) -> DataExpression {
        e.clone()
    }
}

/// A small syntactic rewriter for boolean structure.
///
/// Works bottom-up: folds `&&`, `||` and `!` on constants, decides `==` on
/// syntactically equal operands and on distinct numerals or boolean constants,
/// and removes double negation. Everything else is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplifier;

impl Simplifier {
    fn simplify(&self, e: &DataExpression) -> DataExpression {
        let DataNode::Application { head, arguments } = e.node() else {
            return e.clone();
        };
        let args: Vec<DataExpression> = arguments.iter().map(|a| self.simplify(a)).collect();
        let rebuilt = DataExpression::application(head.clone(), args.clone());

        if rebuilt.is_and_application() {
            return lazy::and_(args[0].clone(), args[1].clone());
        }
        if rebuilt.is_or_application() {
            return lazy::or_(args[0].clone(), args[1].clone());
        }
        if rebuilt.is_not_application() {
            return lazy::not_(args[0].clone());
        }
        if head.as_function().is_some_and(|f| f.name == EQUAL_NAME) && args.len() == 2 {
            return decide_equality(&args[0], &args[1]).unwrap_or(rebuilt);
        }
        rebuilt
    }
}

/// Decide `l == r` syntactically where possible.
fn decide_equality(l: &DataExpression, r: &DataExpression) -> Option<DataExpression> {
    if l == r {
        return Some(DataExpression::true_());
    }
    let distinct_numerals = match (l.numeral_value(), r.numeral_value()) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    };
    let distinct_bools = (l.is_true() && r.is_false()) || (l.is_false() && r.is_true());
    if distinct_numerals || distinct_bools {
        Some(DataExpression::false_())
    } else {
        None
    }
}

impl Rewriter for Simplifier {
    fn rewrite(&self, e: &DataExpression) -> DataExpression {
        self.simplify(e)
    }
}
