mod generator;
mod logging;
mod output;
mod pipeline;
mod preferences;
mod prompt;
mod transcript;
mod types;

use anyhow::Result;
use std::io::{self, Read};
use tracing::error;

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Outer error boundary: whatever happens inside, this hook exits 0.
/// The host must never see compaction blocked because a handover could
/// not be generated; failures are diagnostic only.
fn main() {
    logging::init();

    let input = match read_stdin() {
        Ok(input) => input,
        Err(err) => {
            error!("failed to read stdin: {err}");
            return;
        }
    };

    if let Err(err) = pipeline::run(&input) {
        error!("unexpected error generating handover: {err:#}");
    }
}
