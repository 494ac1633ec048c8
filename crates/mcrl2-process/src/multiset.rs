//! Action-name multisets and the communication and rename expressions built on them.

use crate::action::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A multiset of action names, e.g. the `a|b|b` in `allow({a|b|b}, P)`.
///
/// The names are stored as given; see [`crate::ordering::sort_action_labels`]
/// for the canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionNameMultiset {
    pub names: Vec<Identifier>,
}

impl ActionNameMultiset {
    pub fn new(names: Vec<Identifier>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ActionNameMultiset {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Identifier::from).collect())
    }
}

impl fmt::Display for ActionNameMultiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.names.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// A communication rule `a1|...|an -> b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommunicationExpression {
    pub lhs: ActionNameMultiset,
    pub rhs: Identifier,
}

impl CommunicationExpression {
    pub fn new(lhs: ActionNameMultiset, rhs: impl Into<Identifier>) -> Self {
        Self {
            lhs,
            rhs: rhs.into(),
        }
    }

    /// Build `lhs[0]|...|lhs[n] -> rhs` from plain names.
    pub fn from_names(lhs: &[&str], rhs: &str) -> Self {
        Self::new(lhs.iter().copied().collect(), rhs)
    }
}

impl fmt::Display for CommunicationExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

/// A rename rule `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenameExpression {
    pub source: Identifier,
    pub target: Identifier,
}

impl RenameExpression {
    pub fn new(source: impl Into<Identifier>, target: impl Into<Identifier>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for RenameExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
