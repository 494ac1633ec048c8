//! Canonical ordering of action names, labels and actions.
//!
//! The three comparison functions agree with each other: an action list sorted
//! with [`action_compare`] has its labels sorted by [`action_label_compare`]
//! and its names sorted by [`action_name_compare`]. Allow, block and
//! communication matching all rely on this.

use crate::action::{Action, ActionLabel, Identifier};
use crate::multiset::{ActionNameMultiset, CommunicationExpression};
use std::cmp::Ordering;

/// Order action names lexicographically.
pub fn action_name_compare(a: &Identifier, b: &Identifier) -> Ordering {
    a.cmp(b)
}

/// Order labels by name, then by parameter sorts.
pub fn action_label_compare(a: &ActionLabel, b: &ActionLabel) -> Ordering {
    action_name_compare(&a.name, &b.name).then_with(|| a.sorts.cmp(&b.sorts))
}

/// Order actions by label, then by their argument tuple.
pub fn action_compare(a: &Action, b: &Action) -> Ordering {
    action_label_compare(&a.label, &b.label).then_with(|| a.arguments.cmp(&b.arguments))
}

/// Sort the names of a multiset into canonical order.
pub fn sort_action_labels(m: &ActionNameMultiset) -> ActionNameMultiset {
    let mut names = m.names.clone();
    names.sort_by(action_name_compare);
    ActionNameMultiset::new(names)
}

/// Sort every multiset of an allow list.
pub fn sort_multi_action_labels(l: &[ActionNameMultiset]) -> Vec<ActionNameMultiset> {
    l.iter().map(sort_action_labels).collect()
}

/// Sort the left-hand side of every communication expression, so that
/// matching against a sorted multi-action is independent of how the rule was
/// written.
pub fn sort_communications(c: &[CommunicationExpression]) -> Vec<CommunicationExpression> {
    c.iter()
        .map(|e| CommunicationExpression::new(sort_action_labels(&e.lhs), e.rhs.clone()))
        .collect()
}

/// The sorted, deduplicated set of names occurring in any of the multisets.
pub fn get_actions(l: &[ActionNameMultiset]) -> Vec<Identifier> {
    let mut result: Vec<Identifier> = l.iter().flat_map(|m| m.names.iter().cloned()).collect();
    result.sort_by(action_name_compare);
    result.dedup();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcrl2_data::{DataExpression, Sort};

    #[test]
    fn test_compare_consistent_with_ord() {
        let a = Action::with_arguments("a", vec![DataExpression::number(Sort::Nat, 2)]);
        let b = Action::with_arguments("a", vec![DataExpression::true_()]);
        assert_eq!(action_compare(&a, &b), a.cmp(&b));
        assert_eq!(action_label_compare(&a.label, &b.label), a.label.cmp(&b.label));
    }

    #[test]
    fn test_sort_communications() {
        let c = vec![CommunicationExpression::from_names(&["c", "a", "b"], "d")];
        let sorted = sort_communications(&c);
        assert_eq!(sorted[0].to_string(), "a|b|c -> d");
    }

    #[test]
    fn test_get_actions_dedups() {
        let l: Vec<ActionNameMultiset> = vec![
            ["b", "a"].into_iter().collect(),
            ["a", "c"].into_iter().collect(),
        ];
        let names: Vec<String> = get_actions(&l).iter().map(|i| i.to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
