use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run the hook binary with the given stdin payload and extra environment
/// variables, returning (exit code, stdout, stderr).
pub fn run_cli(stdin_json: &str, envs: &[(&str, &str)]) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_handover-hook"));
    for (key, value) in envs {
        cmd.env(key, value);
    }
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin_json.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Write an executable stub generator script into `dir` and return its
/// absolute path.
pub fn write_stub_generator(dir: &Path, body: &str) -> String {
    let path = dir.join("stub-generator.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_str().unwrap().to_string()
}

/// Point the project at a stub generator via `.handover.toml`.
pub fn write_preferences(project_root: &Path, generator: &str) {
    fs::write(
        project_root.join(".handover.toml"),
        format!("generator = \"{generator}\"\n"),
    )
    .unwrap();
}

/// Build the stdin payload the host would send before compacting.
pub fn hook_input(transcript_path: &Path, cwd: &Path) -> String {
    serde_json::json!({
        "session_id": "test-session",
        "transcript_path": transcript_path.to_str().unwrap(),
        "cwd": cwd.to_str().unwrap(),
        "hook_event_name": "PreCompact",
        "trigger": "auto"
    })
    .to_string()
}

/// List the handover files currently present under `<root>/handovers/`.
pub fn handover_files(project_root: &Path) -> Vec<String> {
    let dir = project_root.join("handovers");
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
