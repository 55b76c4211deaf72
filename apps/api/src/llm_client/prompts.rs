// Shared prompt fragments. Each feature module that calls the LLM keeps its
// own prompts.rs alongside it and composes these where needed.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "Always respond with valid, parseable JSON only — \
    no prose, no markdown, no preamble.";
