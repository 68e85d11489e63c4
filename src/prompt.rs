use anyhow::{Context, Result};
use minijinja::{Environment, context};

/// The handover prompt. The generator is asked to fill the fixed section
/// structure; `today` and `transcript` are the only substitutions.
const HANDOVER_TEMPLATE: &str = "\
You are generating a session handover document for a coding session that is about to be compacted.

Below is the conversation transcript from the session. Analyze it and produce a structured handover document.

IMPORTANT:
- Be thorough but concise — aim for a document that takes 2-3 minutes to read
- Focus on information that would be LOST when session context resets
- Don't include generic project info — focus on session-specific context
- Include specific file paths, error messages, and code snippets where relevant
- If the session was short or uneventful, say so

Use this exact structure:

# Session Handover — {{ today }}

## Session Summary
What was being worked on and what got done.

## What Worked / What Didn't
Bugs encountered, failed approaches, and how they were resolved.

## Key Decisions
Architectural or design decisions made and the reasoning behind them.

## Lessons Learned & Gotchas
Anything the next session should watch out for.

## Next Steps
- [ ] Clear, actionable items for the next session

## Important Files Map
Files created, modified, or relevant to continue the work.

## Current State
Is anything broken? Are tests passing? Any uncommitted changes?

---

CONVERSATION TRANSCRIPT:

{{ transcript }}
";

/// Render the handover prompt for today's date and the extracted
/// conversation text.
pub fn build_prompt(today: &str, transcript: &str) -> Result<String> {
    let env = Environment::new();
    let tmpl = env
        .template_from_str(HANDOVER_TEMPLATE)
        .context("parsing handover prompt template")?;
    tmpl.render(context! { today, transcript })
        .context("rendering handover prompt template")
}
