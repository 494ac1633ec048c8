//! Action summands (plain and stochastic) and deadlock summands.

use crate::multi_action::{Deadlock, MultiAction};
use mcrl2_data::{DataExpression, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A next-state assignment `lhs := rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub lhs: Variable,
    pub rhs: DataExpression,
}

impl Assignment {
    pub fn new(lhs: Variable, rhs: DataExpression) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.lhs, self.rhs)
    }
}

/// A distribution over the variables bound by a stochastic summand.
///
/// An undefined distribution (no variables, `@undefined_real` body) marks a
/// non-probabilistic summand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StochasticDistribution {
    #[serde(default)]
    pub variables: Vec<Variable>,
    pub distribution: DataExpression,
}

impl StochasticDistribution {
    pub fn new(variables: Vec<Variable>, distribution: DataExpression) -> Self {
        Self {
            variables,
            distribution,
        }
    }

    pub fn undefined() -> Self {
        Self {
            variables: Vec::new(),
            distribution: DataExpression::undefined_real(),
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.distribution.is_undefined_real()
    }
}

impl Default for StochasticDistribution {
    fn default() -> Self {
        Self::undefined()
    }
}

/// A guarded transition: for every valuation of the summation variables that
/// satisfies the condition, the multi-action can happen and the state is
/// updated by the assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSummand {
    #[serde(default)]
    pub summation_variables: Vec<Variable>,
    pub condition: DataExpression,
    pub multi_action: MultiAction,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl ActionSummand {
    pub fn new(
        summation_variables: Vec<Variable>,
        condition: DataExpression,
        multi_action: MultiAction,
        assignments: Vec<Assignment>,
    ) -> Self {
        Self {
            summation_variables,
            condition,
            multi_action,
            assignments,
        }
    }
}

/// An action summand whose target state is drawn from a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StochasticActionSummand {
    #[serde(default)]
    pub summation_variables: Vec<Variable>,
    pub condition: DataExpression,
    pub multi_action: MultiAction,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub distribution: StochasticDistribution,
}

impl StochasticActionSummand {
    pub fn new(
        summation_variables: Vec<Variable>,
        condition: DataExpression,
        multi_action: MultiAction,
        assignments: Vec<Assignment>,
        distribution: StochasticDistribution,
    ) -> Self {
        Self {
            summation_variables,
            condition,
            multi_action,
            assignments,
            distribution,
        }
    }

    /// Drop the distribution.
    pub fn into_plain(self) -> ActionSummand {
        ActionSummand::new(
            self.summation_variables,
            self.condition,
            self.multi_action,
            self.assignments,
        )
    }
}

impl From<ActionSummand> for StochasticActionSummand {
    fn from(s: ActionSummand) -> Self {
        Self::new(
            s.summation_variables,
            s.condition,
            s.multi_action,
            s.assignments,
            StochasticDistribution::undefined(),
        )
    }
}

/// A summand expressing that, under its condition, the process can deadlock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeadlockSummand {
    #[serde(default)]
    pub summation_variables: Vec<Variable>,
    pub condition: DataExpression,
    #[serde(default)]
    pub deadlock: Deadlock,
}

impl DeadlockSummand {
    pub fn new(
        summation_variables: Vec<Variable>,
        condition: DataExpression,
        deadlock: Deadlock,
    ) -> Self {
        Self {
            summation_variables,
            condition,
            deadlock,
        }
    }

    /// `true -> delta`.
    pub fn universal() -> Self {
        Self::new(Vec::new(), DataExpression::true_(), Deadlock::new())
    }
}

/// Access to the multi-action of either kind of action summand.
pub trait HasMultiAction {
    fn multi_action(&self) -> &MultiAction;
    fn multi_action_mut(&mut self) -> &mut MultiAction;
    fn condition(&self) -> &DataExpression;
    fn summation_variables(&self) -> &[Variable];
}

impl HasMultiAction for ActionSummand {
    fn multi_action(&self) -> &MultiAction {
        &self.multi_action
    }
    fn multi_action_mut(&mut self) -> &mut MultiAction {
        &mut self.multi_action
    }
    fn condition(&self) -> &DataExpression {
        &self.condition
    }
    fn summation_variables(&self) -> &[Variable] {
        &self.summation_variables
    }
}

impl HasMultiAction for StochasticActionSummand {
    fn multi_action(&self) -> &MultiAction {
        &self.multi_action
    }
    fn multi_action_mut(&mut self) -> &mut MultiAction {
        &mut self.multi_action
    }
    fn condition(&self) -> &DataExpression {
        &self.condition
    }
    fn summation_variables(&self) -> &[Variable] {
        &self.summation_variables
    }
}

fn write_sum(f: &mut fmt::Formatter<'_>, vars: &[Variable]) -> fmt::Result {
    if vars.is_empty() {
        return Ok(());
    }
    write!(f, "sum ")?;
    for (i, v) in vars.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", v.name, v.sort)?;
    }
    write!(f, ". ")
}

fn write_assignments(f: &mut fmt::Formatter<'_>, assignments: &[Assignment]) -> fmt::Result {
    write!(f, " . P(")?;
    for (i, a) in assignments.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", a)?;
    }
    write!(f, ")")
}

impl fmt::Display for ActionSummand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sum(f, &self.summation_variables)?;
        write!(f, "{} -> {}", self.condition, self.multi_action)?;
        write_assignments(f, &self.assignments)
    }
}

impl fmt::Display for StochasticActionSummand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sum(f, &self.summation_variables)?;
        write!(f, "{} -> {}", self.condition, self.multi_action)?;
        if self.distribution.is_defined() {
            write!(f, " . dist ")?;
            for (i, v) in self.distribution.variables.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", v.name, v.sort)?;
            }
            write!(f, "[{}]", self.distribution.distribution)?;
        }
        write_assignments(f, &self.assignments)
    }
}

impl fmt::Display for DeadlockSummand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sum(f, &self.summation_variables)?;
        write!(f, "{} -> {}", self.condition, self.deadlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcrl2_data::Sort;
    use mcrl2_process::{Action, ActionList};

    #[test]
    fn test_display_action_summand() {
        let d = Variable::new("d", Sort::Nat);
        let x = Variable::new("x", Sort::Nat);
        let s = ActionSummand::new(
            vec![d.clone()],
            DataExpression::equal_to(d.clone().into(), x.clone().into()),
            MultiAction::new(ActionList::singleton(Action::with_arguments(
                "a",
                vec![d.clone().into()],
            ))),
            vec![Assignment::new(x, d.into())],
        );
        assert_eq!(s.to_string(), "sum d: Nat. d == x -> a(d) . P(x := d)");
    }

    #[test]
    fn test_display_deadlock_summand() {
        assert_eq!(DeadlockSummand::universal().to_string(), "true -> delta");
        let t = DeadlockSummand::new(
            vec![],
            DataExpression::true_(),
            Deadlock::timed(DataExpression::number(Sort::Real, 3)),
        );
        assert_eq!(t.to_string(), "true -> delta @ 3");
    }

    #[test]
    fn test_plain_to_stochastic_has_undefined_distribution() {
        let s = ActionSummand::new(vec![], DataExpression::true_(), MultiAction::tau(), vec![]);
        let st: StochasticActionSummand = s.clone().into();
        assert!(!st.distribution.is_defined());
        assert_eq!(st.into_plain(), s);
    }
}
