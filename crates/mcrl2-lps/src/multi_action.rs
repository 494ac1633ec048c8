//! Multi-actions and deadlocks, both with an optional time stamp.
//!
//! Untimed values carry the `@undefined_real` sentinel rather than no time at
//! all, so time stamps can always be compared directly.

use mcrl2_data::DataExpression;
use mcrl2_process::ActionList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of simultaneous actions, possibly time stamped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiAction {
    pub actions: ActionList,
    #[serde(default = "DataExpression::undefined_real")]
    pub time: DataExpression,
}

impl MultiAction {
    pub fn new(actions: ActionList) -> Self {
        Self {
            actions,
            time: DataExpression::undefined_real(),
        }
    }

    pub fn timed(actions: ActionList, time: DataExpression) -> Self {
        Self { actions, time }
    }

    pub fn has_time(&self) -> bool {
        !self.time.is_undefined_real()
    }

    /// The internal action.
    pub fn tau() -> Self {
        Self::new(ActionList::new())
    }
}

impl Default for MultiAction {
    fn default() -> Self {
        Self::tau()
    }
}

impl fmt::Display for MultiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.actions)?;
        if self.has_time() {
            write!(f, " @ {}", self.time)?;
        }
        Ok(())
    }
}

/// The deadlock `delta`, possibly time stamped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deadlock {
    #[serde(default = "DataExpression::undefined_real")]
    pub time: DataExpression,
}

impl Deadlock {
    pub fn new() -> Self {
        Self {
            time: DataExpression::undefined_real(),
        }
    }

    pub fn timed(time: DataExpression) -> Self {
        Self { time }
    }

    pub fn has_time(&self) -> bool {
        !self.time.is_undefined_real()
    }
}

impl Default for Deadlock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Deadlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delta")?;
        if self.has_time() {
            write!(f, " @ {}", self.time)?;
        }
        Ok(())
    }
}
