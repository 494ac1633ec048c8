//! Process-level abstract syntax used by linearisation.
//!
//! Actions, canonically ordered action lists, and the name multisets that
//! appear in allow, block, communication and rename operators.

pub mod action;
pub mod action_list;
pub mod multiset;
pub mod ordering;

pub use action::{Action, ActionLabel, Identifier, TAU_NAME};
pub use action_list::ActionList;
pub use multiset::{ActionNameMultiset, CommunicationExpression, RenameExpression};
pub use ordering::{
    action_compare, action_label_compare, action_name_compare, get_actions, sort_action_labels,
    sort_communications, sort_multi_action_labels,
};
