use mcrl2_data::{DataExpression, Sort, Variable};
use mcrl2_lps::{ActionSummand, DeadlockSummand, Deadlock, MultiAction, StochasticActionSummand};
use mcrl2_process::{Action, ActionList, ActionNameMultiset};
use proptest::prelude::*;
use std::collections::BTreeMap;

pub const NAMES: &[&str] = &["a", "b", "c"];
pub const BOOL_VARS: &[&str] = &["x", "y", "z"];

/// A value of a closed data expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Num(i64),
}

pub type Env = BTreeMap<String, Value>;

/// Evaluate the boolean and numeral fragment of the data language. Returns
/// `None` for anything outside it or for unbound variables.
pub fn eval(e: &DataExpression, env: &Env) -> Option<Value> {
    if let Some(v) = e.as_variable() {
        return env.get(&v.name).copied();
    }
    if e.is_true() {
        return Some(Value::Bool(true));
    }
    if e.is_false() {
        return Some(Value::Bool(false));
    }
    if let Some(n) = e.numeral_value() {
        return Some(Value::Num(n));
    }
    if let Some((l, r)) = e.and_operands() {
        return Some(Value::Bool(eval_bool(l, env)? && eval_bool(r, env)?));
    }
    if let Some((l, r)) = e.or_operands() {
        return Some(Value::Bool(eval_bool(l, env)? || eval_bool(r, env)?));
    }
    if let Some(a) = e.not_operand() {
        return Some(Value::Bool(!eval_bool(a, env)?));
    }
    if let Some((l, r)) = e.equal_to_operands() {
        return Some(Value::Bool(eval(l, env)? == eval(r, env)?));
    }
    None
}

pub fn eval_bool(e: &DataExpression, env: &Env) -> Option<bool> {
    match eval(e, env)? {
        Value::Bool(b) => Some(b),
        Value::Num(_) => None,
    }
}

/// All assignments of booleans to `BOOL_VARS`.
pub fn bool_envs() -> Vec<Env> {
    (0..1u8 << BOOL_VARS.len())
        .map(|bits| {
            BOOL_VARS
                .iter()
                .enumerate()
                .map(|(i, v)| (v.to_string(), Value::Bool(bits & (1 << i) != 0)))
                .collect()
        })
        .collect()
}

pub fn bool_var(name: &str) -> DataExpression {
    Variable::new(name, Sort::Bool).into()
}

/// Boolean expressions over `BOOL_VARS` built from the raw connectives.
pub fn arb_condition() -> impl Strategy<Value = DataExpression> {
    let leaf = prop_oneof![
        Just(DataExpression::true_()),
        Just(DataExpression::false_()),
        prop::sample::select(BOOL_VARS).prop_map(bool_var),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| DataExpression::and_(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| DataExpression::or_(l, r)),
            inner.prop_map(DataExpression::not_),
        ]
    })
}

pub fn nat(v: i64) -> DataExpression {
    DataExpression::number(Sort::Nat, v)
}

/// Actions named from `NAMES` with zero or one argument, either a numeral or
/// a boolean constant.
pub fn arb_action() -> impl Strategy<Value = Action> {
    let argument = prop_oneof![
        (0i64..3).prop_map(nat),
        any::<bool>().prop_map(DataExpression::bool_),
    ];
    (
        prop::sample::select(NAMES),
        prop::collection::vec(argument, 0..=1),
    )
        .prop_map(|(name, args)| Action::with_arguments(name, args))
}

pub fn arb_action_list(max: usize) -> impl Strategy<Value = ActionList> {
    prop::collection::vec(arb_action(), 0..=max).prop_map(ActionList::from_unsorted)
}

pub fn arb_multiset() -> impl Strategy<Value = ActionNameMultiset> {
    prop::collection::vec(prop::sample::select(NAMES), 0..=3)
        .prop_map(|names| names.into_iter().collect())
}

/// No time, or time 1 or 2.
pub fn arb_time() -> impl Strategy<Value = DataExpression> {
    prop_oneof![
        Just(DataExpression::undefined_real()),
        (1i64..=2).prop_map(|t| DataExpression::number(Sort::Real, t)),
    ]
}

pub fn arb_action_summand() -> impl Strategy<Value = StochasticActionSummand> {
    (arb_condition(), arb_action_list(2), arb_time()).prop_map(|(c, actions, time)| {
        ActionSummand::new(vec![], c, MultiAction::timed(actions, time), vec![]).into()
    })
}

pub fn arb_deadlock_summand() -> impl Strategy<Value = DeadlockSummand> {
    (arb_condition(), arb_time())
        .prop_map(|(c, time)| DeadlockSummand::new(vec![], c, Deadlock::timed(time)))
}

/// The termination action used throughout the properties.
pub fn terminate() -> Action {
    Action::with_arguments("Terminate", vec![])
}
