//! The allow and block operators.
//!
//! Both only look at action names. A summand whose multi-action does not pass
//! the restriction is turned into a deadlock summand with the same sums,
//! condition and time.

use crate::multi_action::Deadlock;
use crate::summand::{DeadlockSummand, StochasticActionSummand};
use crate::utility::insert_timed_delta_summand;
use mcrl2_process::{sort_multi_action_labels, Action, ActionList, ActionNameMultiset, Identifier};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An `allow` set or a `block` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    /// Only multi-actions whose name multiset is listed may happen.
    Allow(Vec<ActionNameMultiset>),
    /// Multi-actions containing any of these names are blocked.
    Block(ActionNameMultiset),
}

impl Restriction {
    pub fn is_allow(&self) -> bool {
        matches!(self, Restriction::Allow(_))
    }

    /// The same restriction with every allowed multiset sorted.
    pub fn sorted(&self) -> Restriction {
        match self {
            Restriction::Allow(l) => Restriction::Allow(sort_multi_action_labels(l)),
            Restriction::Block(b) => Restriction::Block(b.clone()),
        }
    }

    /// Whether `m` survives this restriction. Expects a sorted allow list;
    /// see [`Restriction::sorted`].
    pub fn permits(&self, m: &ActionList, termination_action: &Action) -> bool {
        match self {
            Restriction::Allow(l) => allow(l, m, termination_action),
            Restriction::Block(b) => !encap(&b.names, m),
        }
    }
}

/// Whether the names of `m`, in order, are exactly `allowed`. The termination
/// action on its own always matches.
fn allow_single_action(allowed: &ActionNameMultiset, m: &ActionList, termination_action: &Action) -> bool {
    if m.len() == 1 && m.front() == Some(termination_action) {
        return true;
    }
    m.len() == allowed.len() && m.names().zip(allowed.names.iter()).all(|(a, b)| a == b)
}

/// Whether `m` is allowed by `allow_list`.
///
/// `tau` (the empty multi-action) and the termination action are always
/// allowed. Otherwise the name sequence of `m` must equal one of the
/// multisets as a sequence, so both sides must already be sorted.
pub fn allow(allow_list: &[ActionNameMultiset], m: &ActionList, termination_action: &Action) -> bool {
    if m.is_empty() {
        return true;
    }
    if m.len() == 1 && m.front() == Some(termination_action) {
        return true;
    }
    allow_list
        .iter()
        .any(|allowed| allow_single_action(allowed, m, termination_action))
}

/// Whether some action of `m` has a blocked name.
pub fn encap(block_list: &[Identifier], m: &ActionList) -> bool {
    m.names().any(|n| block_list.contains(n))
}

/// Apply allow or block to a pair of summand vectors, in place.
///
/// Summands that pass stay; the others become deadlock summands. Those are
/// merged into `deadlock_summands` with subsumption checks, kept verbatim
/// under `no_delta_elimination` (untimed `true` ones first), or replaced by a
/// single `true -> delta` under `ignore_time`.
pub fn allow_block_composition(
    restriction: &Restriction,
    action_summands: &mut Vec<StochasticActionSummand>,
    deadlock_summands: &mut Vec<DeadlockSummand>,
    termination_action: &Action,
    ignore_time: bool,
    no_delta_elimination: bool,
) {
    let restriction = restriction.sorted();
    debug!(
        operator = if restriction.is_allow() { "allow" } else { "block" },
        summands = action_summands.len(),
        "calculating restriction"
    );

    let source = std::mem::take(action_summands);
    let mut complex_deltas = std::mem::take(deadlock_summands);
    let mut simple_deltas = Vec::new();

    for smmnd in source {
        if restriction.permits(&smmnd.multi_action.actions, termination_action) {
            action_summands.push(smmnd);
            continue;
        }
        let has_time = smmnd.multi_action.has_time();
        let simple = !has_time && smmnd.condition.is_true();
        let deadlock = if has_time {
            Deadlock::timed(smmnd.multi_action.time)
        } else {
            Deadlock::new()
        };
        let ds = DeadlockSummand::new(smmnd.summation_variables, smmnd.condition, deadlock);
        if simple {
            simple_deltas.push(ds);
        } else {
            complex_deltas.push(ds);
        }
    }

    if no_delta_elimination {
        simple_deltas.extend(complex_deltas);
        *deadlock_summands = simple_deltas;
    } else if !ignore_time {
        for ds in simple_deltas.into_iter().chain(complex_deltas) {
            insert_timed_delta_summand(action_summands, deadlock_summands, ds, false);
        }
    } else {
        deadlock_summands.push(DeadlockSummand::universal());
    }

    debug!(
        action_summands = action_summands.len(),
        deadlock_summands = deadlock_summands.len(),
        "restriction done"
    );
}
