//! Per-case reporting and aggregate counts.
//!
//! One line per case with a colorized PASS/FAIL/SKIP tag, an indented line
//! per failure reason, and a summary at the end. Write errors on the report
//! stream are deliberately ignored; a broken pipe should not turn a test
//! run into a crash.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::compare::Failure;

/// Aggregate pass/fail/skip counts for one run.
///
/// Accumulated strictly sequentially as each case resolves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

pub struct Reporter {
    stdout: StandardStream,
}

impl Reporter {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    pub fn pass(&mut self, path: &Path) {
        self.tag("PASS", Color::Green);
        let _ = writeln!(self.stdout, ": {}", path.display());
    }

    pub fn skip(&mut self, path: &Path) {
        self.tag("SKIP", Color::Yellow);
        let _ = writeln!(self.stdout, ": {}", path.display());
    }

    pub fn fail(&mut self, path: &Path, failures: &[Failure]) {
        self.tag("FAIL", Color::Red);
        let _ = writeln!(self.stdout, ": {}", path.display());
        for failure in failures {
            let _ = writeln!(self.stdout, "      {failure}");
        }
    }

    pub fn summary(&mut self, summary: &Summary) {
        let _ = writeln!(self.stdout);
        let all_green = summary.failed == 0;
        self.colored(
            &summary.passed.to_string(),
            if all_green { Color::Green } else { Color::Red },
        );
        let _ = write!(self.stdout, " passed, ");
        self.colored(
            &summary.failed.to_string(),
            if all_green { Color::Green } else { Color::Red },
        );
        let _ = writeln!(self.stdout, " failed");
        if summary.skipped > 0 {
            self.colored(&summary.skipped.to_string(), Color::Yellow);
            let _ = writeln!(self.stdout, " skipped");
        }
    }

    fn tag(&mut self, label: &str, color: Color) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(self.stdout, "{label}");
        let _ = self.stdout.reset();
    }

    fn colored(&mut self, text: &str, color: Color) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = write!(self.stdout, "{text}");
        let _ = self.stdout.reset();
    }
}
