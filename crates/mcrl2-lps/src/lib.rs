//! Linear process specifications and the operators applied to them during
//! linearisation: allow, block, communication, rename and hide.

pub mod allow_block;
pub mod communication;
pub mod error;
pub mod hide;
pub mod multi_action;
pub mod options;
pub mod probability;
pub mod process;
pub mod rename;
pub mod summand;
pub mod sumelm;
pub mod utility;

pub use allow_block::{allow, allow_block_composition, encap, Restriction};
pub use communication::{communication_composition, CommEntry, CommunicationAlgorithm, TupleList};
pub use error::{LinResult, LinearisationError};
pub use hide::{hide_actions, hide_multi_action, hide_summands};
pub use multi_action::{Deadlock, MultiAction};
pub use options::LinearisationOptions;
pub use probability::{ProbabilisticState, Probability};
pub use process::{LinearProcess, Operator};
pub use rename::{rename_action, rename_actions, rename_multi_action, rename_summand, rename_summands};
pub use summand::{
    ActionSummand, Assignment, DeadlockSummand, HasMultiAction, StochasticActionSummand,
    StochasticDistribution,
};
pub use sumelm::sumelm;
pub use utility::{implies_condition, insert_timed_delta_summand, subsumes, Subsumes};
