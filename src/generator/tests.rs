#![cfg(unix)]

use super::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

/// Write an executable stub script and return its absolute path as a
/// string (explicit paths bypass PATH resolution).
fn write_stub(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_string()
}

const LONG_OUTPUT: &str =
    "This stub produces a fixed response that is comfortably longer than fifty characters.";

#[test]
fn successful_call_returns_trimmed_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(&dir, "gen.sh", &format!("printf '{LONG_OUTPUT}\\n'"));
    let out = generate(&stub, None, "prompt", dir.path(), DEFAULT_TIMEOUT).unwrap();
    assert_eq!(out, LONG_OUTPUT);
}

#[test]
fn missing_executable_is_reported_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate(
        "definitely-not-a-real-generator-binary",
        None,
        "prompt",
        dir.path(),
        DEFAULT_TIMEOUT,
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::NotFound(_)));
}

#[test]
fn nonzero_exit_carries_stderr_excerpt() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(&dir, "gen.sh", "echo 'model overloaded' >&2; exit 1");
    let err = generate(&stub, None, "prompt", dir.path(), DEFAULT_TIMEOUT).unwrap_err();
    match err {
        GeneratorError::Failed { stderr, .. } => {
            assert!(stderr.contains("model overloaded"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn stderr_excerpt_is_capped_at_500_chars() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        &dir,
        "gen.sh",
        "i=0; while [ $i -lt 100 ]; do printf 'aaaaaaaaaaaaaaaaaaaa' >&2; i=$((i+1)); done; exit 1",
    );
    let err = generate(&stub, None, "prompt", dir.path(), DEFAULT_TIMEOUT).unwrap_err();
    match err {
        GeneratorError::Failed { stderr, .. } => {
            assert_eq!(stderr.chars().count(), 500);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn short_output_is_degenerate() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(&dir, "gen.sh", "printf '0123456789'");
    let err = generate(&stub, None, "prompt", dir.path(), DEFAULT_TIMEOUT).unwrap_err();
    assert!(matches!(err, GeneratorError::Degenerate { len: 10 }));
}

#[test]
fn whitespace_padding_does_not_rescue_short_output() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(&dir, "gen.sh", "printf '   ten chars   \\n\\n\\n'");
    let err = generate(&stub, None, "prompt", dir.path(), DEFAULT_TIMEOUT).unwrap_err();
    assert!(matches!(err, GeneratorError::Degenerate { .. }));
}

#[test]
fn slow_generator_is_killed_on_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(&dir, "gen.sh", "sleep 5; printf 'too late'");
    let err = generate(
        &stub,
        None,
        "prompt",
        dir.path(),
        Duration::from_millis(500),
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::TimedOut(_)));
}

#[test]
fn model_flag_is_forwarded() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the arguments back so the assertion can see them.
    let stub = write_stub(
        &dir,
        "gen.sh",
        "printf 'args: %s -- and enough padding to clear the degenerate-output floor' \"$*\"",
    );
    let out = generate(&stub, Some("haiku"), "p", dir.path(), DEFAULT_TIMEOUT).unwrap();
    assert!(out.contains("--model haiku"), "got: {out}");
    assert!(out.contains("--output-format text"));
}

#[test]
fn resolve_finds_commands_on_path() {
    assert!(resolve("sh").is_some());
    assert!(resolve("definitely-not-a-real-generator-binary").is_none());
}
