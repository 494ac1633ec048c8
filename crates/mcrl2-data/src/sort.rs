//! Sort expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sort expression.
///
/// The derived order (variant first, then contents) is the order used when
/// action labels with equal names are compared by their argument sorts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sort {
    /// Booleans.
    Bool,
    /// Positive numbers.
    Pos,
    /// Natural numbers.
    Nat,
    /// Integers.
    Int,
    /// Reals. Time stamps have this sort.
    Real,
    /// A user-declared sort, referenced by name.
    Basic { name: String },
    /// Function sort `D1 # ... # Dn -> C`.
    Function {
        domain: Vec<Sort>,
        codomain: Box<Sort>,
    },
}

impl Sort {
    /// Create a user-declared sort.
    pub fn basic(name: impl Into<String>) -> Self {
        Sort::Basic { name: name.into() }
    }

    /// Create a function sort.
    pub fn function(domain: Vec<Sort>, codomain: Sort) -> Self {
        Sort::Function {
            domain,
            codomain: Box::new(codomain),
        }
    }

    /// Check if this is one of the built-in number sorts.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Sort::Pos | Sort::Nat | Sort::Int | Sort::Real)
    }

    /// The result sort of applying something of this sort to arguments.
    ///
    /// For a non-function sort this is the sort itself.
    pub fn codomain(&self) -> &Sort {
        match self {
            Sort::Function { codomain, .. } => codomain,
            _ => self,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Pos => write!(f, "Pos"),
            Sort::Nat => write!(f, "Nat"),
            Sort::Int => write!(f, "Int"),
            Sort::Real => write!(f, "Real"),
            Sort::Basic { name } => write!(f, "{}", name),
            Sort::Function { domain, codomain } => {
                for (i, s) in domain.iter().enumerate() {
                    if i > 0 {
                        write!(f, " # ")?;
                    }
                    if matches!(s, Sort::Function { .. }) {
                        write!(f, "({})", s)?;
                    } else {
                        write!(f, "{}", s)?;
                    }
                }
                write!(f, " -> {}", codomain)
            }
        }
    }
}
