//! The rename operator `rename({a -> b, ...}, P)`.
//!
//! When several rules share a source name, the first one in the list is
//! applied. Rule sets are not checked for confluence.

use crate::multi_action::MultiAction;
use crate::summand::HasMultiAction;
use mcrl2_process::{Action, ActionLabel, ActionList, RenameExpression};
use tracing::debug;

/// Rename a single action; actions without a matching rule are returned unchanged.
pub fn rename_action(rules: &[RenameExpression], a: &Action) -> Action {
    match rules.iter().find(|r| r.source == a.label.name) {
        Some(rule) => Action::new(
            ActionLabel::new(rule.target.clone(), a.label.sorts.clone()),
            a.arguments.clone(),
        ),
        None => a.clone(),
    }
}

/// Rename every action of a list. The result is re-sorted, because renaming
/// changes the ordering key.
pub fn rename_actions(rules: &[RenameExpression], l: &ActionList) -> ActionList {
    l.iter().map(|a| rename_action(rules, a)).collect()
}

/// Rename the actions of a multi-action, keeping its time stamp.
pub fn rename_multi_action(rules: &[RenameExpression], m: &MultiAction) -> MultiAction {
    MultiAction::timed(rename_actions(rules, &m.actions), m.time.clone())
}

/// Rename the multi-action of a summand. Condition, sums and assignments are
/// left alone.
pub fn rename_summand<S: HasMultiAction>(rules: &[RenameExpression], s: &mut S) {
    let renamed = rename_multi_action(rules, s.multi_action());
    *s.multi_action_mut() = renamed;
}

/// Apply the rename operator to every action summand.
pub fn rename_summands<S: HasMultiAction>(rules: &[RenameExpression], summands: &mut [S]) {
    debug!(summands = summands.len(), rules = rules.len(), "applying rename operator");
    for s in summands.iter_mut() {
        rename_summand(rules, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summand::ActionSummand;
    use mcrl2_data::{DataExpression, Sort};

    fn act(name: &str, v: i64) -> Action {
        Action::with_arguments(name, vec![DataExpression::number(Sort::Nat, v)])
    }

    #[test]
    fn test_unmatched_action_unchanged() {
        let rules = vec![RenameExpression::new("b", "c")];
        assert_eq!(rename_action(&rules, &act("a", 1)), act("a", 1));
    }

    #[test]
    fn test_first_rule_wins() {
        let rules = vec![RenameExpression::new("a", "x"), RenameExpression::new("a", "y")];
        assert_eq!(rename_action(&rules, &act("a", 1)).name().as_str(), "x");
    }

    #[test]
    fn test_rename_resorts() {
        let rules = vec![RenameExpression::new("a", "z")];
        let l = ActionList::from_unsorted(vec![act("a", 1), act("b", 2)]);
        let r = rename_actions(&rules, &l);
        assert!(r.is_sorted());
        assert_eq!(r.to_string(), "b(2)|z(1)");
    }

    #[test]
    fn test_rename_keeps_time_and_condition() {
        let rules = vec![RenameExpression::new("a", "b")];
        let time = DataExpression::number(Sort::Real, 5);
        let mut s = ActionSummand::new(
            vec![],
            DataExpression::false_(),
            MultiAction::timed(ActionList::singleton(act("a", 0)), time.clone()),
            vec![],
        );
        rename_summand(&rules, &mut s);
        assert_eq!(s.multi_action.to_string(), "b(0) @ 5");
        assert!(s.condition.is_false());
    }
}
