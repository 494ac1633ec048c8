//! Subsumption between summands and the deadlock-summand insertion used by
//! every operator that produces deadlocks.

use crate::summand::{ActionSummand, DeadlockSummand, HasMultiAction, StochasticActionSummand};
use mcrl2_data::DataExpression;

/// Syntactic check whether `c1` implies `c2`.
///
/// Recognises the boolean constants, syntactic equality, and conjunctions
/// and disjunctions at the top of either side. Anything else yields `false`,
/// even if the implication holds semantically. A `false` answer only ever
/// keeps a redundant deadlock summand around; it never removes one wrongly.
///
/// Conjunctions are decomposed before disjunctions; on the alternating bit
/// protocol this order is about ten times faster than the reverse.
pub fn implies_condition(c1: &DataExpression, c2: &DataExpression) -> bool {
    if c2.is_true() || c1.is_false() {
        return true;
    }
    if c1.is_true() || c2.is_false() {
        return false;
    }
    if c1 == c2 {
        return true;
    }

    if let Some((l, r)) = c2.and_operands() {
        return implies_condition(c1, l) && implies_condition(c1, r);
    }
    if let Some((l, r)) = c1.or_operands() {
        return implies_condition(l, c2) && implies_condition(r, c2);
    }
    if let Some((l, r)) = c1.and_operands() {
        return implies_condition(l, c2) || implies_condition(r, c2);
    }
    if let Some((l, r)) = c2.or_operands() {
        return implies_condition(c1, l) || implies_condition(c1, r);
    }
    false
}

/// `self` covers every state and time in which `other` could deadlock.
pub trait Subsumes<T> {
    fn subsumes(&self, other: &T) -> bool;
}

fn action_subsumes<S: HasMultiAction>(s: &S, d: &DeadlockSummand) -> bool {
    let ma = s.multi_action();
    (!ma.has_time() || ma.time == d.deadlock.time) && implies_condition(&d.condition, s.condition())
}

impl Subsumes<DeadlockSummand> for ActionSummand {
    fn subsumes(&self, other: &DeadlockSummand) -> bool {
        action_subsumes(self, other)
    }
}

impl Subsumes<DeadlockSummand> for StochasticActionSummand {
    fn subsumes(&self, other: &DeadlockSummand) -> bool {
        action_subsumes(self, other)
    }
}

impl Subsumes<DeadlockSummand> for DeadlockSummand {
    fn subsumes(&self, other: &DeadlockSummand) -> bool {
        (!self.deadlock.has_time() || self.deadlock.time == other.deadlock.time)
            && implies_condition(&other.condition, &self.condition)
    }
}

/// Free-standing form of [`Subsumes::subsumes`].
pub fn subsumes<X: Subsumes<Y>, Y>(x: &X, y: &Y) -> bool {
    x.subsumes(y)
}

/// Add `s` to `deadlock_summands` unless it is redundant.
///
/// With `ignore_time` all deadlocks are interchangeable and `s` is simply
/// appended. Otherwise `s` is dropped when an action summand or an existing
/// deadlock summand subsumes it; existing deadlock summands subsumed by `s`
/// are removed. When an existing deadlock summand subsumes `s`, that summand
/// and everything after it move to the front of the list, nothing is dropped,
/// so the next lookup is likely to hit it early.
pub fn insert_timed_delta_summand(
    action_summands: &[StochasticActionSummand],
    deadlock_summands: &mut Vec<DeadlockSummand>,
    s: DeadlockSummand,
    ignore_time: bool,
) {
    if ignore_time {
        deadlock_summands.push(s);
        return;
    }

    if action_summands.iter().any(|a| a.subsumes(&s)) {
        return;
    }

    let old = std::mem::take(deadlock_summands);
    let mut result = Vec::with_capacity(old.len() + 1);
    for (i, existing) in old.iter().enumerate() {
        if existing.subsumes(&s) {
            let mut reordered = old[i..].to_vec();
            reordered.extend_from_slice(&old[..i]);
            *deadlock_summands = reordered;
            return;
        }
        if !s.subsumes(existing) {
            result.push(existing.clone());
        }
    }
    result.push(s);
    *deadlock_summands = result;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi_action::{Deadlock, MultiAction};
    use mcrl2_data::{Sort, Variable};
    use mcrl2_process::{Action, ActionList};

    fn b(name: &str) -> DataExpression {
        Variable::new(name, Sort::Bool).into()
    }

    fn delta(c: DataExpression) -> DeadlockSummand {
        DeadlockSummand::new(vec![], c, Deadlock::new())
    }

    fn timed_delta(c: DataExpression, t: i64) -> DeadlockSummand {
        DeadlockSummand::new(vec![], c, Deadlock::timed(DataExpression::number(Sort::Real, t)))
    }

    fn action(c: DataExpression) -> StochasticActionSummand {
        ActionSummand::new(
            vec![],
            c,
            MultiAction::new(ActionList::singleton(Action::with_arguments("a", vec![]))),
            vec![],
        )
        .into()
    }

    #[test]
    fn test_implies_constants() {
        assert!(implies_condition(&b("x"), &DataExpression::true_()));
        assert!(implies_condition(&DataExpression::false_(), &b("x")));
        assert!(!implies_condition(&DataExpression::true_(), &b("x")));
        assert!(!implies_condition(&b("x"), &DataExpression::false_()));
        assert!(implies_condition(&b("x"), &b("x")));
        assert!(!implies_condition(&b("x"), &b("y")));
    }

    #[test]
    fn test_implies_structure() {
        let xy = DataExpression::and_(b("x"), b("y"));
        let x_or_y = DataExpression::or_(b("x"), b("y"));
        assert!(implies_condition(&xy, &b("x")));
        assert!(implies_condition(&b("x"), &x_or_y));
        assert!(implies_condition(&xy, &x_or_y));
        assert!(!implies_condition(&x_or_y, &xy));
        assert!(implies_condition(&xy, &DataExpression::and_(b("y"), b("x"))));
    }

    #[test]
    fn test_implies_is_incomplete_on_non_connectives() {
        // x == 1 implies !(x == 2), but this is beyond a syntactic check.
        let x: DataExpression = Variable::new("x", Sort::Nat).into();
        let one = DataExpression::equal_to(x.clone(), DataExpression::number(Sort::Nat, 1));
        let two = DataExpression::equal_to(x, DataExpression::number(Sort::Nat, 2));
        assert!(!implies_condition(&one, &DataExpression::not_(two)));
    }

    #[test]
    fn test_subsumes_requires_matching_time() {
        let untimed = delta(DataExpression::true_());
        let t3 = timed_delta(DataExpression::true_(), 3);
        let t4 = timed_delta(DataExpression::true_(), 4);
        assert!(untimed.subsumes(&t3));
        assert!(!t3.subsumes(&t4));
        assert!(t3.subsumes(&t3.clone()));
        assert!(!t3.subsumes(&untimed));
    }

    #[test]
    fn test_insert_dropped_when_action_subsumes() {
        let actions = vec![action(DataExpression::true_())];
        let mut deadlocks = vec![];
        insert_timed_delta_summand(&actions, &mut deadlocks, delta(b("x")), false);
        assert!(deadlocks.is_empty());
    }

    #[test]
    fn test_insert_removes_weaker_deadlocks() {
        let mut deadlocks = vec![delta(b("x")), delta(b("y"))];
        insert_timed_delta_summand(&[], &mut deadlocks, delta(DataExpression::true_()), false);
        assert_eq!(deadlocks, vec![delta(DataExpression::true_())]);
    }

    #[test]
    fn test_insert_moves_subsuming_to_front() {
        let mut deadlocks = vec![delta(b("x")), delta(b("y")), delta(b("z"))];
        insert_timed_delta_summand(
            &[],
            &mut deadlocks,
            delta(DataExpression::and_(b("y"), b("w"))),
            false,
        );
        assert_eq!(deadlocks, vec![delta(b("y")), delta(b("z")), delta(b("x"))]);
    }

    #[test]
    fn test_insert_appends_new() {
        let mut deadlocks = vec![delta(b("x"))];
        insert_timed_delta_summand(&[], &mut deadlocks, delta(b("y")), false);
        assert_eq!(deadlocks, vec![delta(b("x")), delta(b("y"))]);
    }

    #[test]
    fn test_insert_ignore_time_appends() {
        let actions = vec![action(DataExpression::true_())];
        let mut deadlocks = vec![delta(DataExpression::true_())];
        insert_timed_delta_summand(&actions, &mut deadlocks, delta(DataExpression::true_()), true);
        assert_eq!(deadlocks.len(), 2);
    }
}
