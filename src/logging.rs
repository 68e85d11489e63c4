use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILENAME: &str = "handover.log";

/// Where diagnostics go: `HANDOVER_LOG_FILE` if set, otherwise
/// `handover.log` next to the executable.
fn log_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("HANDOVER_LOG_FILE") {
        return Some(PathBuf::from(path));
    }
    let exe = env::current_exe().ok()?;
    Some(exe.parent()?.join(LOG_FILENAME))
}

/// Initialize the process-wide diagnostic sink: timestamped lines
/// appended to the log file, level controlled by `RUST_LOG` (default
/// `info`). If the log file can't be opened the tool simply runs
/// without diagnostics; logging must never break the hook.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}
