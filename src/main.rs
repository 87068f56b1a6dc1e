//! attomodel CLI
//!
//! - `attomodel check <file>` - Check every `check` line of a session file against the models
//! - `attomodel models` - List the built-in models

use anyhow::Context;
use attomodel::{
    checker::{Library, LibraryReport},
    config::{Connectives, EvaluationOptions},
    definitions::NoImports,
    serialization::Session,
    CheckerConfig, ModelKind, Verdict,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attomodel")]
#[command(about = "Refute formulas by evaluating them in small finite models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the formulas of a session file
    Check {
        /// Session file with definitions and checks
        file: PathBuf,
        /// Model to check in, may be repeated (default: all models)
        #[arg(short, long = "model")]
        models: Vec<ModelKind>,
        /// Evaluate every child of a connective, even after its value is known
        #[arg(long)]
        exhaustive: bool,
        /// Do not require members of classes to be sets
        #[arg(long)]
        no_set_check: bool,
        /// Give up on a model after this many evaluations
        #[arg(long)]
        max_passes: Option<u64>,
    },
    /// List the built-in models
    Models,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            file,
            models,
            exhaustive,
            no_set_check,
            max_passes,
        } => {
            let config = CheckerConfig {
                models: if models.is_empty() {
                    ModelKind::ALL.to_vec()
                } else {
                    models
                },
                evaluation: EvaluationOptions {
                    connectives: if exhaustive {
                        Connectives::Exhaustive
                    } else {
                        Connectives::ShortCircuit
                    },
                    class_requires_set: !no_set_check,
                    ..EvaluationOptions::default()
                },
                max_passes,
            };
            check_file(&file, config)
        }
        Commands::Models => {
            for kind in ModelKind::ALL {
                println!(
                    "{:<6} {} entities  {}",
                    kind.name(),
                    kind.entity_count(),
                    kind.description()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check_file(path: &Path, config: CheckerConfig) -> anyhow::Result<ExitCode> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let label = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("main");
    let session = Session::parse(label, &input)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let library = Library::new(config);

    let mut refuted = 0;
    for check in session.checks() {
        let report = library.check(session.module(), &NoImports, &check.formula);
        print_report(&check.title(), &report);
        if report.is_refuted() {
            refuted += 1;
        }
    }
    println!("{} checks, {} refuted", session.checks().len(), refuted);
    Ok(if refuted > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_report(title: &str, report: &LibraryReport) {
    if let Some(countermodel) = report.countermodel() {
        println!("{}: refuted, {}", title, countermodel);
        return;
    }
    println!("{}: no countermodel", title);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(Verdict::Survived { passes }) => {
                println!("  {}: survived {} assignments", outcome.model, passes)
            }
            Ok(Verdict::Abandoned { passes }) => {
                println!("  {}: gave up after {} assignments", outcome.model, passes)
            }
            Ok(Verdict::Refuted(_)) => {}
            Err(e) => println!("  {}: error {}: {}", outcome.model, e.code(), e),
        }
    }
}
