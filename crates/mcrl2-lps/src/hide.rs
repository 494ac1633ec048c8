//! The hide operator `hide({a, ...}, P)`.

use crate::multi_action::MultiAction;
use crate::summand::HasMultiAction;
use mcrl2_process::{ActionList, Identifier};
use tracing::debug;

/// Remove the actions whose name is in `names`; the order of the remaining
/// actions is unchanged.
pub fn hide_actions(names: &[Identifier], l: &ActionList) -> ActionList {
    l.iter()
        .filter(|a| !names.contains(&a.label.name))
        .cloned()
        .collect()
}

pub fn hide_multi_action(names: &[Identifier], m: &MultiAction) -> MultiAction {
    MultiAction::timed(hide_actions(names, &m.actions), m.time.clone())
}

/// Apply the hide operator to every action summand. Deadlock summands are
/// not affected by hiding.
pub fn hide_summands<S: HasMultiAction>(names: &[Identifier], summands: &mut [S]) {
    debug!(summands = summands.len(), "applying hide operator");
    for s in summands.iter_mut() {
        let hidden = hide_multi_action(names, s.multi_action());
        *s.multi_action_mut() = hidden;
    }
}
