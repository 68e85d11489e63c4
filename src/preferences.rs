use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

const FILENAME: &str = ".handover.toml";

fn default_generator() -> String {
    "claude".into()
}

fn default_max_transcript_chars() -> usize {
    crate::transcript::DEFAULT_MAX_CHARS
}

fn default_timeout_secs() -> u64 {
    100
}

/// Optional per-project settings stored in `<project_root>/.handover.toml`.
/// Missing keys fall back to defaults via serde.
#[derive(Debug, Deserialize)]
pub struct Preferences {
    /// Executable name (or explicit path) of the text generator.
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Model passed through as `--model`, when set.
    #[serde(default)]
    pub model: Option<String>,

    /// Cap on extracted conversation size, in characters.
    #[serde(default = "default_max_transcript_chars")]
    pub max_transcript_chars: usize,

    /// Hard timeout on the generator call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            model: None,
            max_transcript_chars: default_max_transcript_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Preferences {
    /// Load preferences from `<project_root>/.handover.toml`.
    ///
    /// A missing file yields defaults without writing anything back (a
    /// hook must not dirty the project). An unreadable or unparseable
    /// file is logged and also yields defaults, so bad config can never
    /// block a handover.
    pub fn load(project_root: &Path) -> Self {
        let path = project_root.join(FILENAME);
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!("ignoring unparseable {}: {e}", path.display());
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => {
                warn!("ignoring unreadable {}: {e}", path.display());
                Preferences::default()
            }
        }
    }
}
