use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory of the project root that collects handover documents.
pub const HANDOVER_DIR: &str = "handovers";

/// Compute the next free `handovers/HANDOVER-<date>[-<n>].md` path,
/// creating the directory if needed. Same-day handovers get `-2`, `-3`,
/// ... suffixes so nothing is ever overwritten.
pub fn next_handover_path(project_root: &Path, date: &str) -> Result<PathBuf> {
    let dir = project_root.join(HANDOVER_DIR);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let base = dir.join(format!("HANDOVER-{date}.md"));
    if !base.exists() {
        return Ok(base);
    }
    let mut counter = 2u32;
    loop {
        let candidate = dir.join(format!("HANDOVER-{date}-{counter}.md"));
        if !candidate.exists() {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Write the handover text verbatim (UTF-8).
pub fn write_handover(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
