//! A linear process and the operators that can be applied to it.

use crate::allow_block::{allow_block_composition, Restriction};
use crate::communication::communication_composition;
use crate::error::LinResult;
use crate::hide::hide_summands;
use crate::options::LinearisationOptions;
use crate::probability::ProbabilisticState;
use crate::rename::rename_summands;
use crate::summand::{DeadlockSummand, StochasticActionSummand};
use mcrl2_data::{DataExpression, Rewriter, Variable};
use mcrl2_process::{
    Action, ActionNameMultiset, CommunicationExpression, Identifier, RenameExpression,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// A process operator that maps linear processes to linear processes.
///
/// Serialized with a `kind` tag, e.g.
/// `{"kind": "comm", "rules": [{"lhs": ["a", "b"], "rhs": "c"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operator {
    Allow {
        multisets: Vec<ActionNameMultiset>,
    },
    Block {
        names: ActionNameMultiset,
    },
    Comm {
        rules: Vec<CommunicationExpression>,
    },
    /// `allow(multisets, comm(rules, P))`, computed in one pass.
    CommAllow {
        rules: Vec<CommunicationExpression>,
        multisets: Vec<ActionNameMultiset>,
    },
    /// `block(names, comm(rules, P))`, computed in one pass.
    CommBlock {
        rules: Vec<CommunicationExpression>,
        names: ActionNameMultiset,
    },
    Rename {
        rules: Vec<RenameExpression>,
    },
    Hide {
        names: Vec<Identifier>,
    },
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Allow { .. } => "allow",
            Operator::Block { .. } => "block",
            Operator::Comm { .. } => "comm",
            Operator::CommAllow { .. } => "comm_allow",
            Operator::CommBlock { .. } => "comm_block",
            Operator::Rename { .. } => "rename",
            Operator::Hide { .. } => "hide",
        }
    }
}

/// A linear process: process parameters and a set of summands, with an
/// optional initial distribution over parameter values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearProcess {
    #[serde(default)]
    pub process_parameters: Vec<Variable>,
    #[serde(default)]
    pub action_summands: Vec<StochasticActionSummand>,
    #[serde(default)]
    pub deadlock_summands: Vec<DeadlockSummand>,
    /// Each state lists one value per process parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<ProbabilisticState<Vec<DataExpression>>>,
}

impl LinearProcess {
    pub fn new(
        process_parameters: Vec<Variable>,
        action_summands: Vec<StochasticActionSummand>,
        deadlock_summands: Vec<DeadlockSummand>,
    ) -> Self {
        Self {
            process_parameters,
            action_summands,
            deadlock_summands,
            initial_state: None,
        }
    }

    pub fn with_initial_state(mut self, state: ProbabilisticState<Vec<DataExpression>>) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn summand_count(&self) -> usize {
        self.action_summands.len() + self.deadlock_summands.len()
    }

    /// Apply one operator in place.
    pub fn apply(
        &mut self,
        op: &Operator,
        termination_action: &Action,
        options: &LinearisationOptions,
        rewriter: &impl Rewriter,
    ) -> LinResult<()> {
        match op {
            Operator::Allow { multisets } => allow_block_composition(
                &Restriction::Allow(multisets.clone()),
                &mut self.action_summands,
                &mut self.deadlock_summands,
                termination_action,
                options.ignore_time,
                options.no_delta_elimination,
            ),
            Operator::Block { names } => allow_block_composition(
                &Restriction::Block(names.clone()),
                &mut self.action_summands,
                &mut self.deadlock_summands,
                termination_action,
                options.ignore_time,
                options.no_delta_elimination,
            ),
            Operator::Comm { rules } => communication_composition(
                rules,
                &[],
                false,
                false,
                &mut self.action_summands,
                &mut self.deadlock_summands,
                termination_action,
                options,
                rewriter,
            )?,
            Operator::CommAllow { rules, multisets } => communication_composition(
                rules,
                multisets,
                true,
                false,
                &mut self.action_summands,
                &mut self.deadlock_summands,
                termination_action,
                options,
                rewriter,
            )?,
            Operator::CommBlock { rules, names } => communication_composition(
                rules,
                std::slice::from_ref(names),
                false,
                true,
                &mut self.action_summands,
                &mut self.deadlock_summands,
                termination_action,
                options,
                rewriter,
            )?,
            Operator::Rename { rules } => rename_summands(rules, &mut self.action_summands),
            Operator::Hide { names } => hide_summands(names, &mut self.action_summands),
        }
        info!(
            operator = op.name(),
            action_summands = self.action_summands.len(),
            deadlock_summands = self.deadlock_summands.len(),
            "applied operator"
        );
        Ok(())
    }

    /// Apply a sequence of operators, first to last.
    pub fn apply_all<'o>(
        &mut self,
        ops: impl IntoIterator<Item = &'o Operator>,
        termination_action: &Action,
        options: &LinearisationOptions,
        rewriter: &impl Rewriter,
    ) -> LinResult<()> {
        for op in ops {
            self.apply(op, termination_action, options, rewriter)?;
        }
        Ok(())
    }
}

impl fmt::Display for LinearProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proc P(")?;
        for (i, p) in self.process_parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", p.name, p.sort)?;
        }
        writeln!(f, ") =")?;

        let summands = self
            .action_summands
            .iter()
            .map(|s| s.to_string())
            .chain(self.deadlock_summands.iter().map(|s| s.to_string()));
        let mut empty = true;
        for (i, s) in summands.enumerate() {
            let prefix = if i == 0 { "    " } else { "  + " };
            writeln!(f, "{}{}", prefix, s)?;
            empty = false;
        }
        if empty {
            writeln!(f, "    delta")?;
        }
        write!(f, ";")?;

        if let Some(init) = &self.initial_state {
            write!(f, "\n\ninit ")?;
            let dirac = init.len() == 1;
            for (i, (state, p)) in init.iter().enumerate() {
                if i > 0 {
                    write!(f, " + ")?;
                }
                if !dirac {
                    write!(f, "{}: ", p)?;
                }
                write!(f, "P(")?;
                for (j, v) in state.iter().enumerate() {
                    if j > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")?;
            }
            write!(f, ";")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi_action::MultiAction;
    use crate::summand::{ActionSummand, Assignment};
    use crate::error::LinearisationError;
    use crate::probability::Probability;
    use mcrl2_data::{Simplifier, Sort};
    use mcrl2_process::ActionList;

    fn sample() -> LinearProcess {
        let x = Variable::new("x", Sort::Nat);
        let a = ActionSummand::new(
            vec![],
            DataExpression::true_(),
            MultiAction::new(ActionList::singleton(Action::with_arguments(
                "a",
                vec![x.clone().into()],
            ))),
            vec![Assignment::new(x.clone(), x.clone().into())],
        );
        LinearProcess::new(vec![x], vec![a.into()], vec![DeadlockSummand::universal()])
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "proc P(x: Nat) =\n    true -> a(x) . P(x := x)\n  + true -> delta\n;"
        );
        assert_eq!(LinearProcess::default().to_string(), "proc P() =\n    delta\n;");
    }

    #[test]
    fn test_operator_json() {
        let op: Operator =
            serde_json::from_str(r#"{"kind": "comm", "rules": [{"lhs": ["b", "a"], "rhs": "c"}]}"#)
                .unwrap();
        assert_eq!(
            op,
            Operator::Comm {
                rules: vec![CommunicationExpression::from_names(&["b", "a"], "c")]
            }
        );
        let hide: Operator = serde_json::from_str(r#"{"kind": "hide", "names": ["a"]}"#).unwrap();
        assert_eq!(hide.name(), "hide");
    }

    #[test]
    fn test_apply_rename_then_hide() {
        let mut p = sample();
        let options = LinearisationOptions::default();
        let term = Action::with_arguments("Terminate", vec![]);
        let ops = vec![
            Operator::Rename {
                rules: vec![RenameExpression::new("a", "b")],
            },
            Operator::Hide {
                names: vec!["b".into()],
            },
        ];
        p.apply_all(&ops, &term, &options, &Simplifier).unwrap();
        assert!(p.action_summands[0].multi_action.actions.is_empty());
        assert_eq!(p.deadlock_summands.len(), 1);
    }

    #[test]
    fn test_failed_comm_leaves_process_unchanged() {
        let mut p = sample();
        let a = Action::with_arguments("a", vec![Variable::new("x", Sort::Nat).into()]);
        p.action_summands[0].multi_action.actions = ActionList::from_unsorted(vec![a.clone(), a]);
        let before = p.clone();
        let op = Operator::Comm {
            rules: vec![CommunicationExpression::from_names(&["a", "a"], "tau")],
        };
        let term = Action::with_arguments("Terminate", vec![]);
        let err = p
            .apply(&op, &term, &LinearisationOptions::default(), &Simplifier)
            .unwrap_err();
        assert!(matches!(err, LinearisationError::CommunicationToTau { .. }));
        assert_eq!(p, before);
    }

    #[test]
    fn test_initial_state() {
        let nat = |v| DataExpression::number(Sort::Nat, v);
        let half = || Probability::new(1, 2).unwrap();
        let p = sample().with_initial_state(ProbabilisticState::new(vec![
            (vec![nat(0)], half()),
            (vec![nat(1)], half()),
        ]));
        assert!(p.to_string().ends_with(";\n\ninit 1/2: P(0) + 1/2: P(1);"));

        let json = serde_json::to_string(&p).unwrap();
        let back: LinearProcess = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let dirac = sample().with_initial_state(ProbabilisticState::single(vec![nat(3)]));
        assert!(dirac.to_string().ends_with("init P(3);"));
        assert!(!serde_json::to_string(&sample()).unwrap().contains("initial_state"));
    }

    #[test]
    fn test_initial_state_must_be_a_distribution() {
        let mut value = serde_json::to_value(sample()).unwrap();
        let zero = serde_json::to_value(DataExpression::number(Sort::Nat, 0)).unwrap();
        value["initial_state"] = serde_json::json!([[[zero], "1/3"]]);
        let err = serde_json::from_value::<LinearProcess>(value).unwrap_err();
        assert!(err.to_string().contains("add up to 1/3 instead of 1"));
    }
}
