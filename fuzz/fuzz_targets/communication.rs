#![no_main]
use libfuzzer_sys::fuzz_target;
use mcrl2_data::Simplifier;
use mcrl2_lps::CommunicationAlgorithm;
use mcrl2_process::{Action, ActionList, CommunicationExpression};

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

// Each byte picks an action name; the rules are fixed.
fuzz_target!(|data: &[u8]| {
    let actions: Vec<Action> = data
        .iter()
        .take(6)
        .map(|b| Action::with_arguments(NAMES[(*b % 4) as usize], vec![]))
        .collect();
    let m = ActionList::from_unsorted(actions);
    let rules = vec![
        CommunicationExpression::from_names(&["a", "b"], "c"),
        CommunicationExpression::from_names(&["c", "d", "d"], "e"),
    ];
    let term = Action::with_arguments("Terminate", vec![]);
    let rewriter = Simplifier;
    let mut algorithm = CommunicationAlgorithm::new(&term, &rewriter, &rules, None);
    if let Ok(alternatives) = algorithm.make_multi_action_condition_list(&m) {
        assert!(!alternatives.is_empty());
    }
});
