//! Criterion benchmarks for communication composition.
//!
//! Run with: cargo bench -p mcrl2-lps

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mcrl2_data::{DataExpression, Simplifier, Sort, Variable};
use mcrl2_lps::{
    communication_composition, ActionSummand, LinearisationOptions, MultiAction,
    StochasticActionSummand,
};
use mcrl2_process::{Action, ActionList, CommunicationExpression};

/// `s_0(d_0) | r_0(d_0) | ... | s_{n-1}(d_{n-1}) | r_{n-1}(d_{n-1})` with open
/// data, so every pair yields a guarded alternative.
fn send_receive_summand(n: usize) -> StochasticActionSummand {
    let mut actions = Vec::new();
    let mut vars = Vec::new();
    for i in 0..n {
        let d = Variable::new(format!("d{i}"), Sort::Nat);
        let e = Variable::new(format!("e{i}"), Sort::Nat);
        actions.push(Action::with_arguments(format!("s{i}").as_str(), vec![d.clone().into()]));
        actions.push(Action::with_arguments(format!("r{i}").as_str(), vec![e.clone().into()]));
        vars.push(d);
        vars.push(e);
    }
    ActionSummand::new(
        vars,
        DataExpression::true_(),
        MultiAction::new(ActionList::from_unsorted(actions)),
        vec![],
    )
    .into()
}

fn rules(n: usize) -> Vec<CommunicationExpression> {
    (0..n)
        .map(|i| {
            CommunicationExpression::from_names(
                &[format!("s{i}").as_str(), format!("r{i}").as_str()],
                format!("c{i}").as_str(),
            )
        })
        .collect()
}

fn bench_communication(c: &mut Criterion) {
    let mut group = c.benchmark_group("communication_composition");
    let terminate = Action::with_arguments("Terminate", vec![]);
    let options = LinearisationOptions::default();

    for n in [1usize, 2, 3, 4] {
        let summand = send_receive_summand(n);
        let rules = rules(n);
        group.bench_with_input(BenchmarkId::from_parameter(2 * n), &n, |b, _| {
            b.iter(|| {
                let mut action_summands = vec![summand.clone()];
                let mut deadlock_summands = vec![];
                communication_composition(
                    &rules,
                    &[],
                    false,
                    false,
                    &mut action_summands,
                    &mut deadlock_summands,
                    &terminate,
                    &options,
                    &Simplifier,
                )
                .unwrap();
                action_summands
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_communication);
criterion_main!(benches);
