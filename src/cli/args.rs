//! Defines the command-line arguments for the Corvid harness.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::Parser;
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "corvid",
    version,
    about = "Runs a language interpreter against annotated test scripts and diffs the observed behavior."
)]
pub struct CorvidArgs {
    /// Only run tests whose path, relative to the test root, starts with
    /// this prefix.
    pub filter: Option<String>,

    /// The interpreter binary under test, invoked once per test file.
    #[arg(short, long)]
    pub interpreter: PathBuf,

    /// The root directory to scan for test scripts.
    #[arg(long, default_value = "tests")]
    pub tests: PathBuf,

    /// The file extension of test scripts; other files are ignored.
    #[arg(long, default_value = "mag")]
    pub ext: String,

    /// Per-test timeout in seconds. A hung interpreter is killed and
    /// reported as a timeout failure.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}
