//! Report-view CLI: render a test-execution report in the terminal

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use report_view::parser::parse_report;
use report_view::reporter::ConsoleReporter;
use report_view::viewmodel::{Model, Renderable};
use report_view::Outcome;

/// Render a test-execution report JSON document
#[derive(Parser, Debug)]
#[command(name = "report-view")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report JSON file to render
    path: PathBuf,

    /// Hide passed tests and steps
    #[arg(long)]
    hide_passed: bool,

    /// Hide failed tests and steps
    #[arg(long)]
    hide_failed: bool,

    /// Hide skipped tests and steps
    #[arg(long)]
    hide_skipped: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 1 when any execution failed
    #[arg(long)]
    check: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let json = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read report: {}", args.path.display()))?;
    let tests = parse_report(&json)
        .with_context(|| format!("Failed to parse report: {}", args.path.display()))?;

    let any_failed = tests
        .iter()
        .any(|t| t.executions.iter().any(|e| e.outcome == Outcome::Failed));

    let model = Rc::new(Model::new(tests));

    // Apply filter flags before the renderer registers so only one render
    // runs; each toggle cascades into the per-test models on its own.
    {
        let filters = model.overview().filter_state();
        if args.hide_passed {
            filters.toggle_passed();
        }
        if args.hide_failed {
            filters.toggle_failed();
        }
        if args.hide_skipped {
            filters.toggle_skipped();
        }
        for test_model in model.test_models() {
            if let Some(filters) = test_model.selected_execution_filter_state() {
                if args.hide_passed {
                    filters.toggle_passed();
                }
                if args.hide_failed {
                    filters.toggle_failed();
                }
                if args.hide_skipped {
                    filters.toggle_skipped();
                }
            }
        }
    }

    let mut reporter = ConsoleReporter::new(Rc::downgrade(&model));
    if args.no_color {
        reporter = reporter.without_colors();
    }
    let reporter = Rc::new(reporter);

    model.overview().register(reporter.clone());
    for test_model in model.test_models() {
        test_model.register(reporter.clone());
    }
    reporter.update();

    if args.check && any_failed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
