//! Data layer for mCRL2 linearisation.
//!
//! Sorts, data expressions and the rewriter interface consumed by the process
//! and LPS crates. Expressions are assumed to be well typed.

pub mod expr;
pub mod lazy;
pub mod rewrite;
pub mod sort;
pub mod subst;

pub use expr::{DataExpression, DataNode, FunctionSymbol, Variable};
pub use rewrite::{IdentityRewriter, Rewriter, Simplifier};
pub use sort::Sort;
pub use subst::Substitution;
