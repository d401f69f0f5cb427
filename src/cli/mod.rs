//! The Corvid command-line interface.
//!
//! This module is the entry point for the harness binary and drives the
//! whole pipeline: discover test files, extract expectations, run the
//! interpreter, compare, report. Strictly sequential: one file is fully
//! resolved before the next begins.

use std::path::Path;
use std::time::Duration;
use std::{fs, process};

use clap::Parser;
use termcolor::ColorChoice;

use crate::cli::args::CorvidArgs;
use crate::compare::compare;
use crate::discovery::discover_test_files;
use crate::errors::HarnessError;
use crate::expect::TestCase;
use crate::report::{Reporter, Summary};
use crate::runner;

pub mod args;

/// The main entry point for the CLI.
///
/// Exits 0 when every executed case passed, 1 otherwise. A fatal error
/// (unreadable file, unspawnable interpreter) aborts the run; expectation
/// mismatches never do.
pub fn run() {
    let args = CorvidArgs::parse();

    match run_suite(&args) {
        Ok(summary) => {
            process::exit(if summary.failed > 0 { 1 } else { 0 });
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Runs the whole suite and returns the aggregate counts.
pub fn run_suite(args: &CorvidArgs) -> Result<Summary, HarnessError> {
    let mut files = discover_test_files(&args.tests, &args.ext)?;
    if let Some(prefix) = args.filter.as_deref() {
        files.retain(|path| matches_filter(path, &args.tests, prefix));
    }

    let timeout = Duration::from_secs(args.timeout);
    let mut reporter = Reporter::new(ColorChoice::Auto);
    let mut summary = Summary::default();

    for path in files {
        let source = fs::read_to_string(&path).map_err(|source| HarnessError::ReadTest {
            path: path.clone(),
            source,
        })?;
        let case = TestCase::parse(&path, &source);

        if case.skip {
            summary.skipped += 1;
            reporter.skip(&path);
            continue;
        }

        let result = runner::run(&args.interpreter, &path, timeout)?;
        let failures = compare(&case, &result);

        if failures.is_empty() {
            summary.passed += 1;
            reporter.pass(&path);
        } else {
            summary.failed += 1;
            reporter.fail(&path, &failures);
        }
    }

    reporter.summary(&summary);
    Ok(summary)
}

/// True when `path`, relative to the test root, starts with `prefix`.
fn matches_filter(path: &Path, root: &Path, prefix: &str) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .starts_with(prefix)
}
