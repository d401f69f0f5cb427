//! Comparison of observed interpreter behavior against a test case's
//! expectations.
//!
//! The comparator never fails: every mismatch becomes a [`Failure`] value
//! and an empty list means the case passed. Only I/O problems (handled
//! upstream) are fatal to a run.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::expect::TestCase;
use crate::runner::RunResult;

/// Matches the interpreter's diagnostic shape on stderr:
/// `... line <N> col <M>] Error: <message>`.
static ERROR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"line (\d+) col \d+\] Error").unwrap());

/// One reason a case failed. Rendered one per indented report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The interpreter exceeded the deadline and was killed.
    Timeout { limit: Duration },
    /// A diagnostic appeared on a line no directive expected.
    UnexpectedError { line: u32 },
    /// Stderr content that does not look like a diagnostic at all.
    UnexpectedStderr { text: String },
    /// An expected diagnostic never appeared.
    MissingError { line: u32 },
    WrongExit { expected: i32, actual: i32 },
    /// Actual stdout ran past the expected list.
    UnexpectedOutput { text: String },
    /// Positional mismatch; `line` is where the directive was declared.
    WrongOutput {
        expected: String,
        actual: String,
        line: u32,
    },
    /// Expected list ran past actual stdout.
    MissingOutput { text: String, line: u32 },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Timeout { limit } => {
                write!(f, "interpreter timed out after {}s and was killed", limit.as_secs_f64())
            }
            Failure::UnexpectedError { line } => {
                write!(f, "unexpected error on line {line}")
            }
            Failure::UnexpectedStderr { text } => {
                write!(f, "unexpected output on stderr: {text}")
            }
            Failure::MissingError { line } => {
                write!(f, "expected error on line {line} and got none")
            }
            Failure::WrongExit { expected, actual } => {
                write!(f, "expected exit code {expected} and got {actual}")
            }
            Failure::UnexpectedOutput { text } => {
                write!(f, "got output '{text}' when none was expected")
            }
            Failure::WrongOutput { expected, actual, line } => {
                write!(f, "expected '{expected}' on line {line}, got '{actual}'")
            }
            Failure::MissingOutput { text, line } => {
                write!(f, "missing expected output '{text}' (line {line})")
            }
        }
    }
}

/// Diffs one run against one case. Empty result = pass.
pub fn compare(case: &TestCase, result: &RunResult) -> Vec<Failure> {
    // A killed interpreter produced arbitrary partial output; comparing it
    // would only bury the real problem.
    if let Some(limit) = result.timed_out {
        return vec![Failure::Timeout { limit }];
    }

    let mut failures = Vec::new();
    check_errors(case, result, &mut failures);
    check_exit(case, result, &mut failures);
    check_output(case, result, &mut failures);
    failures
}

fn check_errors(case: &TestCase, result: &RunResult, failures: &mut Vec<Failure>) {
    let mut seen = BTreeSet::new();
    for text in result.stderr.lines() {
        if text.trim().is_empty() {
            continue;
        }
        let Some(caps) = ERROR_LINE.captures(text) else {
            failures.push(Failure::UnexpectedStderr { text: text.to_string() });
            continue;
        };
        let Ok(line) = caps[1].parse::<u32>() else {
            failures.push(Failure::UnexpectedStderr { text: text.to_string() });
            continue;
        };
        if case.expected_errors.contains(&line) {
            seen.insert(line);
        } else {
            failures.push(Failure::UnexpectedError { line });
        }
    }

    for &line in case.expected_errors.difference(&seen) {
        failures.push(Failure::MissingError { line });
    }
}

fn check_exit(case: &TestCase, result: &RunResult, failures: &mut Vec<Failure>) {
    if result.exit_code != case.expected_exit {
        failures.push(Failure::WrongExit {
            expected: case.expected_exit,
            actual: result.exit_code,
        });
    }
}

fn check_output(case: &TestCase, result: &RunResult, failures: &mut Vec<Failure>) {
    // lines() drops exactly one trailing empty segment from a final newline,
    // which is the tolerance the contract asks for.
    let actual: Vec<&str> = result.stdout.lines().collect();
    let expected = &case.expected_output;

    for i in 0..actual.len().max(expected.len()) {
        match (actual.get(i), expected.get(i)) {
            (Some(a), None) => failures.push(Failure::UnexpectedOutput { text: a.to_string() }),
            (Some(a), Some(e)) if *a != e.text => failures.push(Failure::WrongOutput {
                expected: e.text.clone(),
                actual: a.to_string(),
                line: e.line,
            }),
            (Some(_), Some(_)) => {}
            (None, Some(e)) => failures.push(Failure::MissingOutput {
                text: e.text.clone(),
                line: e.line,
            }),
            (None, None) => unreachable!(),
        }
    }
}
