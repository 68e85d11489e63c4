use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Hard ceiling on a single generator call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Trimmed outputs shorter than this are treated as degenerate and never
/// persisted.
pub const MIN_OUTPUT_CHARS: usize = 50;

/// How much of the generator's stderr is kept for diagnostics.
const STDERR_EXCERPT_CHARS: usize = 500;

/// Why a generator call produced no usable handover text.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator `{0}` not found on PATH")]
    NotFound(String),
    #[error("failed to spawn generator `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("generator timed out after {0:?}")]
    TimedOut(Duration),
    #[error("generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("generator produced degenerate output ({len} chars)")]
    Degenerate { len: usize },
    #[error("waiting for generator: {0}")]
    Wait(#[source] std::io::Error),
}

/// Resolve `command` against `PATH`. A command containing a path
/// separator is treated as an explicit path instead.
pub fn resolve(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(command))
        .find(|p| p.is_file())
}

/// Run the generator in print mode with `prompt`, working directory set
/// to `cwd`, and return its trimmed stdout.
///
/// The timeout is enforced by polling the child and killing it on
/// expiry; a timed-out call never yields partial output.
pub fn generate(
    command: &str,
    model: Option<&str>,
    prompt: &str,
    cwd: &Path,
    timeout: Duration,
) -> Result<String, GeneratorError> {
    let program = resolve(command).ok_or_else(|| GeneratorError::NotFound(command.to_string()))?;

    let mut cmd = Command::new(&program);
    cmd.arg("-p")
        .arg(prompt)
        .args(["--output-format", "text"])
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(model) = model {
        cmd.args(["--model", model]);
    }

    let mut child = cmd.spawn().map_err(|source| GeneratorError::Spawn {
        command: command.to_string(),
        source,
    })?;

    // Drain stdout/stderr on threads so a chatty child can't fill the
    // pipe buffers and stall while we poll for exit.
    let stdout_reader = spawn_drain(child.stdout.take());
    let stderr_reader = spawn_drain(child.stderr.take());

    let status = match wait_with_timeout(&mut child, timeout)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(GeneratorError::TimedOut(timeout));
        }
    };

    let stdout = join_drain(stdout_reader);
    let stderr = join_drain(stderr_reader);

    if !status.success() {
        return Err(GeneratorError::Failed {
            status: status.to_string(),
            stderr: excerpt(&stderr, STDERR_EXCERPT_CHARS),
        });
    }

    let output = stdout.trim();
    if output.chars().count() < MIN_OUTPUT_CHARS {
        return Err(GeneratorError::Degenerate {
            len: output.chars().count(),
        });
    }
    Ok(output.to_string())
}

fn spawn_drain<R: Read + Send + 'static>(
    source: Option<R>,
) -> Option<thread::JoinHandle<Vec<u8>>> {
    source.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_drain(handle: Option<thread::JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Poll the child until it exits or the timeout elapses. Returns `None`
/// on timeout; the caller is responsible for killing the child.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> Result<Option<std::process::ExitStatus>, GeneratorError> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    return Ok(None);
                }
                thread::sleep(poll_interval);
            }
            Err(e) => return Err(GeneratorError::Wait(e)),
        }
    }
}

/// First `max_chars` characters of `text`, on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests;
