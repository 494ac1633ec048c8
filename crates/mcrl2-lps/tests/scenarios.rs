//! End-to-end scenarios: operators applied to small linear processes.

use mcrl2_data::{DataExpression, Simplifier, Sort, Variable};
use mcrl2_lps::*;
use mcrl2_process::{Action, ActionList, ActionNameMultiset, CommunicationExpression, RenameExpression};

fn act(name: &str) -> Action {
    Action::with_arguments(name, vec![])
}

fn nat_act(name: &str, v: i64) -> Action {
    Action::with_arguments(name, vec![DataExpression::number(Sort::Nat, v)])
}

fn term() -> Action {
    act("Terminate")
}

fn summand(actions: Vec<Action>) -> StochasticActionSummand {
    ActionSummand::new(
        vec![],
        DataExpression::true_(),
        MultiAction::new(ActionList::from_unsorted(actions)),
        vec![],
    )
    .into()
}

fn timed_summand(actions: Vec<Action>, t: i64) -> StochasticActionSummand {
    ActionSummand::new(
        vec![],
        DataExpression::true_(),
        MultiAction::timed(
            ActionList::from_unsorted(actions),
            DataExpression::number(Sort::Real, t),
        ),
        vec![],
    )
    .into()
}

fn multiset(names: &[&str]) -> ActionNameMultiset {
    names.iter().copied().collect()
}

#[test]
fn test_comm_then_allow_yields_single_summand() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![act("a"), act("b")])], vec![]);
    let ops = vec![
        Operator::Comm {
            rules: vec![CommunicationExpression::from_names(&["a", "b"], "c")],
        },
        Operator::Allow {
            multisets: vec![multiset(&["c"])],
        },
    ];
    p.apply_all(&ops, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();

    assert_eq!(p.action_summands.len(), 1);
    assert_eq!(p.action_summands[0].multi_action.to_string(), "c");
    assert!(p.action_summands[0].condition.is_true());
    assert!(p.deadlock_summands.is_empty());
}

#[test]
fn test_comm_allow_inline_with_ignore_time() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![act("a"), act("b")])], vec![]);
    let op = Operator::CommAllow {
        rules: vec![CommunicationExpression::from_names(&["a", "b"], "c")],
        multisets: vec![multiset(&["c"])],
    };
    let options = LinearisationOptions {
        ignore_time: true,
        ..Default::default()
    };
    p.apply(&op, &term(), &options, &Simplifier).unwrap();

    assert_eq!(p.action_summands.len(), 1);
    assert_eq!(p.action_summands[0].multi_action.to_string(), "c");
    assert_eq!(p.deadlock_summands, vec![DeadlockSummand::universal()]);
}

#[test]
fn test_communication_requires_matching_data() {
    let rules = vec![CommunicationExpression::from_names(&["a", "b"], "c")];

    let mut matching = vec![summand(vec![nat_act("a", 1), nat_act("b", 1)])];
    let mut deadlocks = vec![];
    communication_composition(
        &rules,
        &[],
        false,
        false,
        &mut matching,
        &mut deadlocks,
        &term(),
        &LinearisationOptions::default(),
        &Simplifier,
    )
    .unwrap();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].multi_action.to_string(), "c(1)");

    let mut mismatched = vec![summand(vec![nat_act("a", 1), nat_act("b", 2)])];
    communication_composition(
        &rules,
        &[],
        false,
        false,
        &mut mismatched,
        &mut deadlocks,
        &term(),
        &LinearisationOptions::default(),
        &Simplifier,
    )
    .unwrap();
    assert_eq!(mismatched.len(), 1);
    assert_eq!(mismatched[0].multi_action.to_string(), "a(1)|b(2)");
}

#[test]
fn test_three_party_communication() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![act("c"), act("a"), act("b")])], vec![]);
    let op = Operator::Comm {
        rules: vec![CommunicationExpression::from_names(&["c", "b", "a"], "d")],
    };
    p.apply(&op, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();
    assert_eq!(p.action_summands.len(), 1);
    assert_eq!(p.action_summands[0].multi_action.to_string(), "d");
}

#[test]
fn test_communication_keeps_unmatched_actions() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![act("a"), act("b"), act("e")])], vec![]);
    let op = Operator::Comm {
        rules: vec![CommunicationExpression::from_names(&["a", "b"], "c")],
    };
    p.apply(&op, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();
    assert_eq!(p.action_summands.len(), 1);
    assert_eq!(p.action_summands[0].multi_action.to_string(), "c|e");
}

#[test]
fn test_communication_to_tau_fails() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![act("a"), act("b")])], vec![]);
    let op = Operator::Comm {
        rules: vec![CommunicationExpression::from_names(&["a", "b"], "tau")],
    };
    let err = p
        .apply(&op, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap_err();
    assert!(matches!(err, LinearisationError::CommunicationToTau { .. }));
}

#[test]
fn test_block_with_ignore_time_is_idempotent() {
    let input = LinearProcess::new(
        vec![],
        vec![summand(vec![act("a")]), timed_summand(vec![act("b")], 3)],
        vec![],
    );
    let op = Operator::Block {
        names: multiset(&["b"]),
    };
    let options = LinearisationOptions {
        ignore_time: true,
        ..Default::default()
    };

    let mut once = input.clone();
    once.apply(&op, &term(), &options, &Simplifier).unwrap();
    assert_eq!(once.deadlock_summands, vec![DeadlockSummand::universal()]);

    let mut again = input.clone();
    again.apply(&op, &term(), &options, &Simplifier).unwrap();
    assert_eq!(again, once);

    let mut twice = once.clone();
    twice.apply(&op, &term(), &options, &Simplifier).unwrap();
    assert_eq!(twice.deadlock_summands, vec![DeadlockSummand::universal()]);
}

#[test]
fn test_timed_blocked_summand_leaves_timed_deadlock() {
    let mut p = LinearProcess::new(vec![], vec![timed_summand(vec![act("b")], 3)], vec![]);
    let op = Operator::Block {
        names: multiset(&["b"]),
    };
    p.apply(&op, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();
    assert!(p.action_summands.is_empty());
    assert_eq!(p.deadlock_summands.len(), 1);
    assert_eq!(p.deadlock_summands[0].to_string(), "true -> delta @ 3");
}

#[test]
fn test_termination_action_survives_allow() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![term()]), summand(vec![])], vec![]);
    let op = Operator::Allow { multisets: vec![] };
    p.apply(&op, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();
    assert_eq!(p.action_summands.len(), 2);
}

#[test]
fn test_rename_enables_communication() {
    let mut p = LinearProcess::new(vec![], vec![summand(vec![act("x"), act("b")])], vec![]);
    let ops = vec![
        Operator::Rename {
            rules: vec![RenameExpression::new("x", "a")],
        },
        Operator::Comm {
            rules: vec![CommunicationExpression::from_names(&["a", "b"], "c")],
        },
        Operator::Hide {
            names: vec!["c".into()],
        },
    ];
    p.apply_all(&ops, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();
    assert_eq!(p.action_summands.len(), 1);
    assert!(p.action_summands[0].multi_action.actions.is_empty());
}

#[test]
fn test_sumelm_after_communication() {
    let d = Variable::new("d", Sort::Nat);
    let a = Action::with_arguments("a", vec![d.clone().into()]);
    let mut p = LinearProcess::new(
        vec![],
        vec![ActionSummand::new(
            vec![d],
            DataExpression::true_(),
            MultiAction::new(ActionList::from_unsorted(vec![a, nat_act("b", 4)])),
            vec![],
        )
        .into()],
        vec![],
    );
    let op = Operator::Comm {
        rules: vec![CommunicationExpression::from_names(&["a", "b"], "c")],
    };
    p.apply(&op, &term(), &LinearisationOptions::default(), &Simplifier)
        .unwrap();

    let c = p
        .action_summands
        .iter()
        .find(|s| s.multi_action.actions.names().any(|n| n.as_str() == "c"))
        .unwrap();
    assert!(c.summation_variables.is_empty());
    assert!(c.condition.is_true());
    assert_eq!(c.multi_action.to_string(), "c(4)");
}

#[test]
fn test_linear_process_json_roundtrip() {
    let x = Variable::new("x", Sort::Nat);
    let p = LinearProcess::new(
        vec![x.clone()],
        vec![
            ActionSummand::new(
                vec![],
                DataExpression::equal_to(x.clone().into(), DataExpression::number(Sort::Nat, 0)),
                MultiAction::new(ActionList::singleton(nat_act("a", 1))),
                vec![Assignment::new(x, DataExpression::number(Sort::Nat, 1))],
            )
            .into(),
            timed_summand(vec![act("b")], 2),
        ],
        vec![DeadlockSummand::universal()],
    );
    let json = serde_json::to_string(&p).unwrap();
    let back: LinearProcess = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    assert_eq!(back.to_string(), p.to_string());
}
