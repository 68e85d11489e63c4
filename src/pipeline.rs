use crate::generator;
use crate::output;
use crate::preferences::Preferences;
use crate::prompt;
use crate::transcript;
use crate::types::HookInput;
use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// Terminal states of a single run.
#[derive(Debug)]
pub enum Outcome {
    /// A handover file was written.
    Written(PathBuf),
    /// Some gate short-circuited; nothing was written.
    Skipped,
}

/// Run the whole pipeline on the raw stdin payload.
///
/// Every gate that fails logs why and returns `Outcome::Skipped`; an
/// `Err` here means an unexpected internal fault, which the caller logs
/// and likewise turns into a no-op. Nothing is retried and nothing is
/// partially committed.
pub fn run(raw_input: &str) -> Result<Outcome> {
    if raw_input.trim().is_empty() {
        warn!("no input received on stdin");
        return Ok(Outcome::Skipped);
    }

    let input: HookInput = match serde_json::from_str(raw_input) {
        Ok(input) => input,
        Err(e) => {
            error!("failed to parse stdin JSON: {e}");
            return Ok(Outcome::Skipped);
        }
    };

    if input.transcript_path.is_empty() {
        warn!("no transcript_path in hook input");
        return Ok(Outcome::Skipped);
    }

    let project_root = match resolve_project_root(&input.cwd) {
        Some(root) => root,
        None => return Ok(Outcome::Skipped),
    };

    let prefs = Preferences::load(&project_root);

    // Fail before extracting anything if the generator can't run at all.
    if generator::resolve(&prefs.generator).is_none() {
        error!("generator `{}` not found on PATH", prefs.generator);
        return Ok(Outcome::Skipped);
    }

    let conversation = transcript::extract_conversation(
        Path::new(&input.transcript_path),
        prefs.max_transcript_chars,
    );
    if conversation.is_empty() {
        warn!("no conversation content extracted, skipping handover");
        return Ok(Outcome::Skipped);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prompt = prompt::build_prompt(&today, &conversation)?;

    info!("calling `{}` to generate handover", prefs.generator);
    let handover = match generator::generate(
        &prefs.generator,
        prefs.model.as_deref(),
        &prompt,
        &project_root,
        Duration::from_secs(prefs.timeout_secs),
    ) {
        Ok(text) => text,
        Err(e) => {
            error!("{e}");
            return Ok(Outcome::Skipped);
        }
    };

    let path = match output::next_handover_path(&project_root, &today) {
        Ok(path) => path,
        Err(e) => {
            error!("choosing handover path: {e:#}");
            return Ok(Outcome::Skipped);
        }
    };
    if let Err(e) = output::write_handover(&path, &handover) {
        error!("failed to write handover file: {e:#}");
        return Ok(Outcome::Skipped);
    }

    info!(
        "handover written to {} ({} chars)",
        path.display(),
        handover.chars().count()
    );
    Ok(Outcome::Written(path))
}

/// Resolve the project root from the hook's `cwd`, falling back to a
/// location derived from the binary itself (hooks conventionally live at
/// `<root>/.claude/hooks/<bin>`, so the root is three ancestors up).
fn resolve_project_root(cwd: &str) -> Option<PathBuf> {
    let root = if cwd.is_empty() {
        warn!("no cwd in hook input, deriving project root from executable location");
        let exe = match env::current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                error!("cannot locate own executable: {e}");
                return None;
            }
        };
        let Some(root) = exe.ancestors().nth(3).map(Path::to_path_buf) else {
            error!("executable path too shallow to derive a project root");
            return None;
        };
        root
    } else {
        PathBuf::from(cwd)
    };
    if !root.is_dir() {
        error!("project root is not a directory: {}", root.display());
        return None;
    }
    Some(root)
}
