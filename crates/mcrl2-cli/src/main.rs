//! Command-line interface for applying process operators to linear processes.

use clap::{Parser, Subcommand};
use mcrl2_data::Simplifier;
use mcrl2_lps::{LinearProcess, LinearisationOptions, Operator};
use mcrl2_process::Action;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI error with source context for pretty printing.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read file: {message}")]
    IoError { message: String },

    #[error("invalid JSON: {message}")]
    #[diagnostic(code(mcrl2lin::json_error))]
    JsonError {
        message: String,
        #[source_code]
        src: NamedSource<Arc<String>>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("linearisation error: {message}")]
    #[diagnostic(code(mcrl2lin::linearisation_error))]
    LinearisationError { message: String },
}

impl CliError {
    fn from_json_error(e: serde_json::Error, source: Arc<String>, filename: &str) -> Self {
        let offset = line_column_offset(&source, e.line(), e.column());
        CliError::JsonError {
            message: e.to_string(),
            src: NamedSource::new(filename, source),
            span: (offset, 0).into(),
        }
    }
}

/// Byte offset of a 1-based line and column, clamped to the source length.
fn line_column_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "mcrl2lin", version)]
#[command(about = "Apply mCRL2 process operators to linear processes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an operator pipeline to a linear process
    Apply {
        /// Linear process (JSON)
        #[arg(value_name = "LPS")]
        file: PathBuf,

        /// Operators to apply, first to last (JSON list)
        #[arg(value_name = "PIPELINE")]
        pipeline: PathBuf,

        /// Output file for the resulting linear process (JSON); pretty-prints to stdout if absent
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat all deadlocks as untimed
        #[arg(long)]
        ignore_time: bool,

        /// Keep every deadlock summand
        #[arg(long)]
        no_delta_elimination: bool,

        /// Do not apply sum elimination after communication
        #[arg(long)]
        no_sumelm: bool,

        /// Name of the termination action
        #[arg(long, default_value = "Terminate")]
        termination: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Pretty-print a linear process
    Pp {
        /// Linear process (JSON)
        #[arg(value_name = "LPS")]
        file: PathBuf,
    },
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let filter = if matches!(&cli.command, Commands::Apply { verbose: true, .. }) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Apply {
            file,
            pipeline,
            output,
            ignore_time,
            no_delta_elimination,
            no_sumelm,
            termination,
            verbose: _,
        } => cmd_apply(
            &file,
            &pipeline,
            output.as_ref(),
            &termination,
            LinearisationOptions {
                ignore_time,
                no_delta_elimination,
                no_sumelm,
            },
        ),
        Commands::Pp { file } => cmd_pp(&file),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

fn read_source(file: &PathBuf) -> CliResult<Arc<String>> {
    fs::read_to_string(file)
        .map(Arc::new)
        .map_err(|e| CliError::IoError {
            message: format!("{}: {}", file.display(), e),
        })
}

fn load_process(file: &PathBuf) -> CliResult<LinearProcess> {
    let source = read_source(file)?;
    serde_json::from_str(&source)
        .map_err(|e| CliError::from_json_error(e, source.clone(), &file.display().to_string()))
}

fn load_pipeline(file: &PathBuf) -> CliResult<Vec<Operator>> {
    let source = read_source(file)?;
    serde_json::from_str(&source)
        .map_err(|e| CliError::from_json_error(e, source.clone(), &file.display().to_string()))
}

fn cmd_apply(
    file: &PathBuf,
    pipeline: &PathBuf,
    output: Option<&PathBuf>,
    termination: &str,
    options: LinearisationOptions,
) -> CliResult<()> {
    let mut process = load_process(file)?;
    let operators = load_pipeline(pipeline)?;
    let termination_action = Action::with_arguments(termination, vec![]);
    debug!(?options, operators = operators.len(), "loaded pipeline");

    info!(
        action_summands = process.action_summands.len(),
        deadlock_summands = process.deadlock_summands.len(),
        "loaded linear process"
    );

    let start = Instant::now();
    process
        .apply_all(&operators, &termination_action, &options, &Simplifier)
        .map_err(|e| CliError::LinearisationError {
            message: e.to_string(),
        })?;
    info!(
        summands = process.summand_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "pipeline done"
    );

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&process).map_err(|e| CliError::IoError {
            message: e.to_string(),
        })?;
        fs::write(output_path, json).map_err(|e| CliError::IoError {
            message: e.to_string(),
        })?;
        println!("written: {} -> {}", file.display(), output_path.display());
    } else {
        println!("{}", process);
    }

    Ok(())
}

fn cmd_pp(file: &PathBuf) -> CliResult<()> {
    let process = load_process(file)?;
    println!("{}", process);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_offset() {
        let src = "{\n  \"a\": 1,\n  x\n}";
        assert_eq!(line_column_offset(src, 1, 1), 0);
        assert_eq!(line_column_offset(src, 3, 3), 14);
        assert_eq!(line_column_offset(src, 99, 99), src.len());
    }

    #[test]
    fn test_cli_parses_apply() {
        let cli = Cli::try_parse_from([
            "mcrl2lin",
            "apply",
            "p.json",
            "ops.json",
            "--ignore-time",
            "-o",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply {
                ignore_time,
                no_sumelm,
                output,
                termination,
                ..
            } => {
                assert!(ignore_time);
                assert!(!no_sumelm);
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(termination, "Terminate");
            }
            Commands::Pp { .. } => panic!("expected apply"),
        }
    }
}
