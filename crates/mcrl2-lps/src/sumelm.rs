//! Sum elimination on single summands.
//!
//! A summation variable `d` with a top-level conjunct `d == e` in the
//! condition (and `d` not occurring in `e`) has exactly one useful value, so
//! `e` is substituted for it everywhere and the sum over `d` disappears.
//! Summation variables that occur nowhere are dropped as well.

use crate::multi_action::MultiAction;
use crate::summand::{Assignment, StochasticActionSummand};
use mcrl2_data::{DataExpression, Substitution, Variable};
use mcrl2_process::{Action, ActionList};

/// Find a conjunct `d == e` or `e == d` that determines one of `sum_vars`.
fn find_equation(
    condition: &DataExpression,
    sum_vars: &[Variable],
) -> Option<(Variable, DataExpression)> {
    for conjunct in condition.conjuncts() {
        let Some((lhs, rhs)) = conjunct.equal_to_operands() else {
            continue;
        };
        for (var, value) in [(lhs, rhs), (rhs, lhs)] {
            if let Some(v) = var.as_variable() {
                if sum_vars.contains(v) && !value.occurs_in(v) {
                    return Some((v.clone(), value.clone()));
                }
            }
        }
    }
    None
}

fn substitute_actions(sigma: &Substitution, l: &ActionList) -> ActionList {
    l.iter()
        .map(|a| {
            Action::new(
                a.label.clone(),
                a.arguments.iter().map(|e| sigma.apply(e)).collect(),
            )
        })
        .collect()
}

fn substitute(sigma: &Substitution, s: &mut StochasticActionSummand) {
    s.condition = sigma.apply(&s.condition);
    s.multi_action = MultiAction::timed(
        substitute_actions(sigma, &s.multi_action.actions),
        sigma.apply(&s.multi_action.time),
    );
    s.assignments = s
        .assignments
        .iter()
        .map(|a| Assignment::new(a.lhs.clone(), sigma.apply(&a.rhs)))
        .collect();
    s.distribution.distribution = sigma.apply(&s.distribution.distribution);
}

fn occurs_in_summand(v: &Variable, s: &StochasticActionSummand) -> bool {
    s.condition.occurs_in(v)
        || s.multi_action.time.occurs_in(v)
        || s.multi_action
            .actions
            .iter()
            .any(|a| a.arguments.iter().any(|e| e.occurs_in(v)))
        || s.assignments.iter().any(|a| a.rhs.occurs_in(v))
        || s.distribution.distribution.occurs_in(v)
}

/// Eliminate the summation variables of `s` that are fixed by an equation in
/// its condition or that are not used. Returns whether `s` changed.
///
/// The condition is left with trivial `e == e` conjuncts; callers run their
/// rewriter over it afterwards.
pub fn sumelm(s: &mut StochasticActionSummand) -> bool {
    let mut changed = false;

    while let Some((var, value)) = find_equation(&s.condition, &s.summation_variables) {
        let sigma: Substitution = std::iter::once((var.clone(), value)).collect();
        substitute(&sigma, s);
        s.summation_variables.retain(|v| *v != var);
        changed = true;
    }

    let before = s.summation_variables.len();
    let vars = std::mem::take(&mut s.summation_variables);
    s.summation_variables = vars.into_iter().filter(|v| occurs_in_summand(v, s)).collect();
    changed || s.summation_variables.len() != before
}
