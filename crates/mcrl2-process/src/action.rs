//! Identifiers, action labels and actions.

use mcrl2_data::{DataExpression, Sort};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Name of the internal action.
pub const TAU_NAME: &str = "tau";

/// An action name.
///
/// Ordered lexicographically on the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Arc<str>);

impl Identifier {
    pub fn new(name: &str) -> Self {
        Identifier(Arc::from(name))
    }

    /// The name `tau`.
    pub fn tau() -> Self {
        Self::new(TAU_NAME)
    }

    pub fn is_tau(&self) -> bool {
        &*self.0 == TAU_NAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An action declaration: a name together with the sorts of its parameters.
///
/// Labels are ordered by name first and by their sort list second.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionLabel {
    pub name: Identifier,
    #[serde(default)]
    pub sorts: Vec<Sort>,
}

impl ActionLabel {
    pub fn new(name: impl Into<Identifier>, sorts: Vec<Sort>) -> Self {
        Self {
            name: name.into(),
            sorts,
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.sorts.is_empty() {
            write!(f, ": ")?;
            for (i, s) in self.sorts.iter().enumerate() {
                if i > 0 {
                    write!(f, " # ")?;
                }
                write!(f, "{}", s)?;
            }
        }
        Ok(())
    }
}

/// An action label applied to data arguments.
///
/// Actions are ordered by label and then by the argument tuple, compared
/// element by element from the left.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub label: ActionLabel,
    #[serde(default)]
    pub arguments: Vec<DataExpression>,
}

impl Action {
    pub fn new(label: ActionLabel, arguments: Vec<DataExpression>) -> Self {
        Self { label, arguments }
    }

    /// An action whose label sorts are taken from its arguments.
    pub fn with_arguments(name: impl Into<Identifier>, arguments: Vec<DataExpression>) -> Self {
        let sorts = arguments.iter().map(|a| a.sort()).collect();
        Self::new(ActionLabel::new(name, sorts), arguments)
    }

    pub fn name(&self) -> &Identifier {
        &self.label.name
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label.name)?;
        if !self.arguments.is_empty() {
            write!(f, "(")?;
            for (i, a) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", a)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
