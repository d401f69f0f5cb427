//! Fatal error taxonomy for the harness.
//!
//! Only environmental failures are represented here: a test file that cannot
//! be read, an interpreter that cannot be spawned, a directory tree that
//! cannot be walked. Expectation mismatches are never errors; they are
//! collected as [`Failure`](crate::compare::Failure) values and reported.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read test file '{path}': {source}")]
    ReadTest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn interpreter '{interpreter}': {source}")]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to capture interpreter output for '{path}': {source}")]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk test directory: {0}")]
    Walk(#[from] walkdir::Error),
}
