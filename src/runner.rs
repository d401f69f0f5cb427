//! Interpreter invocation.
//!
//! Runs `<interpreter> <test-file>` with both output streams piped. Each
//! stream is drained on its own thread so the child can never block on a
//! full pipe, while the parent polls for exit against a deadline. A child
//! that outlives the deadline is killed and the result marked timed out;
//! the comparator turns that into a distinct failure kind rather than a
//! generic mismatch.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::HarnessError;

/// Exit code reported when the child was terminated by a signal (including
/// our own kill on timeout) and carries no code of its own.
const SIGNALED_EXIT: i32 = -1;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured behavior of one interpreter invocation.
///
/// Created per invocation, consumed by the comparator, then discarded.
#[derive(Debug)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// `Some(limit)` when the child was killed after exceeding `limit`.
    pub timed_out: Option<Duration>,
}

/// Invokes the interpreter on one test file and waits for completion,
/// bounded by `timeout`.
///
/// Spawn failure is fatal to the harness; the interpreter is assumed
/// present.
pub fn run(
    interpreter: &Path,
    test_file: &Path,
    timeout: Duration,
) -> Result<RunResult, HarnessError> {
    let mut child = Command::new(interpreter)
        .arg(test_file)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| HarnessError::Spawn {
            interpreter: interpreter.to_path_buf(),
            source,
        })?;

    let stdout_reader = drain(child.stdout.take());
    let stderr_reader = drain(child.stderr.take());

    let capture_err = |source| HarnessError::Capture {
        path: test_file.to_path_buf(),
        source,
    };

    let deadline = Instant::now() + timeout;
    let (status, timed_out) = loop {
        match child.try_wait().map_err(capture_err)? {
            Some(status) => break (status, None),
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let status = child.wait().map_err(capture_err)?;
                break (status, Some(timeout));
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let stdout = join_reader(stdout_reader).map_err(capture_err)?;
    let stderr = join_reader(stderr_reader).map_err(capture_err)?;

    Ok(RunResult {
        stdout,
        stderr,
        exit_code: status.code().unwrap_or(SIGNALED_EXIT),
        timed_out,
    })
}

/// Drains a child stream to a buffer on a dedicated thread.
fn drain<R>(stream: Option<R>) -> thread::JoinHandle<std::io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            stream.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(handle: thread::JoinHandle<std::io::Result<Vec<u8>>>) -> std::io::Result<String> {
    let bytes = handle
        .join()
        .map_err(|_| std::io::Error::other("output reader thread panicked"))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
