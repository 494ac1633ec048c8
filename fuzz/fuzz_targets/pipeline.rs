#![no_main]
use libfuzzer_sys::fuzz_target;
use mcrl2_data::Simplifier;
use mcrl2_lps::{LinearProcess, LinearisationOptions, Operator};
use mcrl2_process::Action;
use serde::Deserialize;

#[derive(Deserialize)]
struct Input {
    process: LinearProcess,
    pipeline: Vec<Operator>,
    #[serde(default)]
    ignore_time: bool,
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = serde_json::from_slice::<Input>(data) {
        let mut process = input.process;
        let options = LinearisationOptions {
            ignore_time: input.ignore_time,
            ..LinearisationOptions::default()
        };
        let term = Action::with_arguments("Terminate", vec![]);
        let _ = process.apply_all(&input.pipeline, &term, &options, &Simplifier);
    }
});
