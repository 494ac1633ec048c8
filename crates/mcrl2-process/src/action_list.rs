//! Canonically ordered lists of actions.

use crate::action::{Action, Identifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A multi-action body: a list of actions kept in canonical order.
///
/// The empty list is the internal action `tau`. Every constructor sorts its
/// input, so equal multisets of actions always produce equal lists. Lists are
/// compared, ordered and hashed on their full contents (labels and
/// arguments), which makes them suitable as exact cache keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActionList(Vec<Action>);

impl<'de> Deserialize<'de> for ActionList {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Action>::deserialize(deserializer).map(ActionList::from_unsorted)
    }
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from actions in any order.
    pub fn from_unsorted(mut actions: Vec<Action>) -> Self {
        actions.sort();
        ActionList(actions)
    }

    pub fn singleton(a: Action) -> Self {
        ActionList(vec![a])
    }

    /// Insert `a` at its canonical position, in O(n).
    pub fn insert(&self, a: Action) -> ActionList {
        let mut actions = self.0.clone();
        let pos = actions.partition_point(|b| b <= &a);
        actions.insert(pos, a);
        ActionList(actions)
    }

    /// Insert `a` in place at its canonical position.
    pub fn push(&mut self, a: Action) {
        let pos = self.0.partition_point(|b| b <= &a);
        self.0.insert(pos, a);
    }

    pub fn front(&self) -> Option<&Action> {
        self.0.first()
    }

    /// Everything but the first action.
    pub fn tail(&self) -> ActionList {
        ActionList(self.0.iter().skip(1).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Action> {
        self.0
    }

    /// The names of the actions, in list order.
    pub fn names(&self) -> impl Iterator<Item = &Identifier> + '_ {
        self.0.iter().map(|a| &a.label.name)
    }

    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }
}

impl FromIterator<Action> for ActionList {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        ActionList::from_unsorted(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ActionList {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "tau");
        }
        for (i, a) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", a)?;
        }
        Ok(())
    }
}
