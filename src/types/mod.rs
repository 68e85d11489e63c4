use serde::Deserialize;

// ===================================================================
// Hook Input (received via stdin, snake_case JSON)
// ===================================================================

/// The hook payload the host sends on stdin when it is about to compact
/// a session. Only the fields we act on are modeled; everything else
/// (session_id, trigger, hook_event_name, ...) is ignored.
#[derive(Debug, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub transcript_path: String,
    #[serde(default)]
    pub cwd: String,
}

// ===================================================================
// Transcript records — one per JSONL line
// ===================================================================

/// A single line of the transcript file: a role plus content that is
/// either plain text or a list of content blocks.
#[derive(Debug, Deserialize)]
pub struct TranscriptRecord {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: RecordContent,
}

/// `content` can be a plain string (user text), an array of content
/// blocks (assistant responses, tool traffic), or any other JSON value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Other(serde_json::Value),
}

impl Default for RecordContent {
    fn default() -> Self {
        RecordContent::Text(String::new())
    }
}

/// One element of block-list content. Plain strings appear verbatim in
/// some host versions, so they are accepted alongside typed blocks.
/// Typed blocks we don't recognize fall through to `Other`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Text(String),
    Typed(TypedBlock),
    Other(serde_json::Value),
}

/// Typed content blocks, discriminated by the `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TypedBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        name: Option<String>,
    },
    #[serde(rename = "tool_result")]
    ToolResult,
}
