//! End-to-end runs of the corvid binary against scratch test trees, using
//! small shell scripts as stand-in interpreters.
//! Requires: assert_cmd, predicates, tempfile crates in [dev-dependencies]

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

/// Writes an executable shell script and returns its path.
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// An interpreter that echoes back exactly what each `// expect:` directive
/// in the test file asks for, and exits 0.
fn mirror_interpreter(dir: &Path) -> PathBuf {
    write_script(dir, "mirror.sh", r#"sed -n 's|.*// expect: ||p' "$1""#)
}

fn harness(scratch: &TempDir, interpreter: &Path) -> Command {
    let mut cmd = Command::cargo_bin("corvid").unwrap();
    cmd.arg("--interpreter")
        .arg(interpreter)
        .arg("--tests")
        .arg(scratch.path().join("suite"));
    cmd
}

fn write_test(scratch: &TempDir, rel: &str, source: &str) {
    let path = scratch.path().join("suite").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

#[test]
fn faithful_interpreter_passes_the_suite() {
    let scratch = TempDir::new().unwrap();
    let interp = mirror_interpreter(scratch.path());
    write_test(&scratch, "print.mag", "print 1 // expect: 1\nprint 2 // expect: 2\n");
    write_test(&scratch, "nested/more.mag", "print hi // expect: hi\n");

    harness(&scratch, &interp)
        .assert()
        .success()
        .stdout(contains("PASS").and(contains("2 passed, 0 failed")));
}

#[test]
fn wrong_output_fails_with_a_reason() {
    let scratch = TempDir::new().unwrap();
    let interp = write_script(scratch.path(), "wrong.sh", "echo 2");
    write_test(&scratch, "print.mag", "print 1 // expect: 1\n");

    harness(&scratch, &interp)
        .assert()
        .failure()
        .code(1)
        .stdout(
            contains("FAIL")
                .and(contains("expected '1' on line 1, got '2'"))
                .and(contains("0 passed, 1 failed")),
        );
}

#[test]
fn skip_directive_excludes_the_case() {
    let scratch = TempDir::new().unwrap();
    // Interpreter that would fail loudly if the skipped file were executed.
    let interp = write_script(scratch.path(), "angry.sh", "echo BOOM; exit 9");
    write_test(&scratch, "later.mag", "// skip\nprint 1 // expect: 1\n");

    harness(&scratch, &interp)
        .assert()
        .success()
        .stdout(
            contains("SKIP")
                .and(contains("0 passed, 0 failed"))
                .and(contains("1 skipped")),
        );
}

#[test]
fn filter_prefix_restricts_the_run() {
    let scratch = TempDir::new().unwrap();
    let interp = mirror_interpreter(scratch.path());
    write_test(&scratch, "loops/for.mag", "print x // expect: x\n");
    write_test(&scratch, "strings/cat.mag", "print y // expect: y\n");

    harness(&scratch, &interp)
        .arg("loops")
        .assert()
        .success()
        .stdout(contains("1 passed, 0 failed").and(contains("for.mag")));
}

#[test]
fn expected_diagnostic_and_exit_code_pass() {
    let scratch = TempDir::new().unwrap();
    let interp = write_script(
        scratch.path(),
        "erroring.sh",
        r#"printf '[line 2 col 1] Error: boom\n' >&2; exit 1"#,
    );
    write_test(&scratch, "err.mag", "fine\n// expect error line 2\n");

    harness(&scratch, &interp)
        .assert()
        .success()
        .stdout(contains("1 passed, 0 failed"));
}

#[test]
fn silent_interpreter_misses_expected_error_and_exit() {
    let scratch = TempDir::new().unwrap();
    let interp = write_script(scratch.path(), "silent.sh", "exit 0");
    write_test(&scratch, "err.mag", "// expect error line 2\n");

    harness(&scratch, &interp)
        .assert()
        .failure()
        .stdout(
            contains("expected error on line 2 and got none")
                .and(contains("expected exit code 1 and got 0")),
        );
}

#[test]
fn hung_interpreter_is_reported_as_a_timeout() {
    let scratch = TempDir::new().unwrap();
    let interp = write_script(scratch.path(), "hang.sh", "exec sleep 30");
    write_test(&scratch, "hang.mag", "print 1 // expect: 1\n");

    harness(&scratch, &interp)
        .arg("--timeout")
        .arg("1")
        .assert()
        .failure()
        .stdout(contains("timed out"));
}

#[test]
fn missing_interpreter_is_fatal() {
    let scratch = TempDir::new().unwrap();
    write_test(&scratch, "t.mag", "print 1 // expect: 1\n");

    harness(&scratch, Path::new("/nonexistent/interpreter"))
        .assert()
        .failure()
        .stderr(contains("failed to spawn interpreter"));
}

#[test]
fn rerun_is_idempotent() {
    let scratch = TempDir::new().unwrap();
    let interp = mirror_interpreter(scratch.path());
    write_test(&scratch, "a.mag", "print 1 // expect: 1\n");
    write_test(&scratch, "b.mag", "// skip\n");

    for _ in 0..2 {
        harness(&scratch, &interp)
            .assert()
            .success()
            .stdout(contains("1 passed, 0 failed").and(contains("1 skipped")));
    }
}

#[test]
fn non_test_files_are_ignored_not_skipped() {
    let scratch = TempDir::new().unwrap();
    let interp = mirror_interpreter(scratch.path());
    write_test(&scratch, "a.mag", "print 1 // expect: 1\n");
    write_test(&scratch, "README.txt", "not a test\n");

    let assert = harness(&scratch, &interp).assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(out.contains("1 passed, 0 failed"));
    assert!(!out.contains("skipped"));
}
