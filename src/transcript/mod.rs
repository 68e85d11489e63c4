use crate::types::{ContentBlock, RecordContent, TranscriptRecord, TypedBlock};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, warn};

/// Separator between formatted conversation turns.
pub const SEPARATOR: &str = "\n\n---\n\n";

/// Default cap on extracted conversation size, in characters.
pub const DEFAULT_MAX_CHARS: usize = 50_000;

/// Extract conversation content from a JSONL transcript, capped at
/// `max_chars` characters.
///
/// Returns an empty string when the transcript is missing, empty, or
/// contains no user/assistant dialogue. Lines that fail to parse are
/// skipped individually.
pub fn extract_conversation(path: &Path, max_chars: usize) -> String {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("transcript file not found: {}", path.display());
            return String::new();
        }
        Err(e) => {
            error!("error reading transcript {}: {e}", path.display());
            return String::new();
        }
    };
    if contents.is_empty() {
        warn!("transcript file is empty: {}", path.display());
        return String::new();
    }

    let mut messages = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(record) = serde_json::from_str::<TranscriptRecord>(line) else {
            continue;
        };
        if record.role != "user" && record.role != "assistant" {
            continue;
        }
        let content = flatten_content(&record.content);
        if content.trim().is_empty() {
            continue;
        }
        messages.push(format!("**{}:** {}", record.role, content));
    }

    if messages.is_empty() {
        return String::new();
    }

    truncate_to_boundary(messages.join(SEPARATOR), max_chars)
}

/// Flatten record content into plain text. Block lists keep text blocks
/// and replace tool traffic with short placeholders so tool payloads
/// never leak into the handover prompt.
fn flatten_content(content: &RecordContent) -> String {
    match content {
        RecordContent::Text(s) => s.clone(),
        RecordContent::Blocks(blocks) => {
            let parts: Vec<String> = blocks.iter().filter_map(flatten_block).collect();
            parts.join("\n")
        }
        // Anything else (numbers, objects, ...) is kept as its JSON text.
        RecordContent::Other(value) => value.to_string(),
    }
}

fn flatten_block(block: &ContentBlock) -> Option<String> {
    match block {
        ContentBlock::Text(s) => Some(s.clone()),
        ContentBlock::Typed(TypedBlock::Text { text }) => Some(text.clone()),
        ContentBlock::Typed(TypedBlock::ToolResult) => Some("[tool result]".into()),
        ContentBlock::Typed(TypedBlock::ToolUse { name }) => Some(format!(
            "[used tool: {}]",
            name.as_deref().unwrap_or("unknown")
        )),
        ContentBlock::Other(_) => None,
    }
}

/// Keep the trailing `max_chars` characters of `text`, then re-align to
/// the first turn boundary inside that window so the result never starts
/// mid-message. If the window contains no boundary, the raw cut stands.
fn truncate_to_boundary(text: String, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    let cut = text
        .char_indices()
        .nth(total - max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let tail = &text[cut..];
    match tail.find(SEPARATOR) {
        Some(pos) => tail[pos + SEPARATOR.len()..].to_string(),
        None => tail.to_string(),
    }
}
