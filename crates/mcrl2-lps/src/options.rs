//! Options shared by the process operators.

use serde::{Deserialize, Serialize};

/// Flags controlling how the operators treat time, deadlocks and sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearisationOptions {
    /// Treat all deadlock summands as equivalent; a single `true -> delta`
    /// replaces the individual ones.
    pub ignore_time: bool,
    /// Keep every generated deadlock summand instead of removing the
    /// subsumed ones.
    pub no_delta_elimination: bool,
    /// Do not apply sum elimination to summands produced by communication.
    pub no_sumelm: bool,
}
