//! Linearisation error types.

use mcrl2_process::ActionNameMultiset;
use thiserror::Error;

/// A configuration error raised by one of the process operators.
///
/// These are fatal: the inputs are inconsistent and retrying cannot help.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinearisationError {
    #[error(
        "cannot linearise a process with a communication operator containing a communication that results in tau: {lhs} -> tau"
    )]
    CommunicationToTau { lhs: ActionNameMultiset },

    #[error(
        "allow/block can only be applied together with communication when time is ignored and delta elimination is enabled (ignore_time = {ignore_time}, no_delta_elimination = {no_delta_elimination})"
    )]
    InlineRestrictionRequiresIgnoreTime {
        ignore_time: bool,
        no_delta_elimination: bool,
    },

    #[error("allow and block cannot be applied at the same time")]
    ConflictingRestriction,

    #[error("`{value}` is not a probability between 0 and 1")]
    InvalidProbability { value: String },

    #[error("the probabilities of a distribution add up to {total} instead of 1")]
    NotADistribution { total: String },
}

pub type LinResult<T> = Result<T, LinearisationError>;
