use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::infrastructure::observability::log_preview;

static JSON_ARRAY_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*").unwrap());

const CLOSING_FENCE: &str = "```";

/// Outcome of searching a model completion for JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonCandidate<'a> {
    Recovered(&'a str),
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("no JSON found in model response")]
    NoJsonFound,
    #[error("candidate is not a valid JSON array: {reason}")]
    Malformed { candidate: String, reason: String },
}

/// Two-stage search: the outermost `[`..`]` span first, then the trimmed text
/// with surrounding code fences removed.
pub fn locate_json_array(raw: &str) -> JsonCandidate<'_> {
    if let Some(span) = JSON_ARRAY_SPAN.find(raw) {
        return JsonCandidate::Recovered(span.as_str());
    }

    let stripped = strip_code_fences(raw);
    if stripped.is_empty() {
        return JsonCandidate::NotFound;
    }

    tracing::warn!(
        candidate = %log_preview(stripped),
        "No array span in model response, falling back to fence stripping"
    );
    JsonCandidate::Recovered(stripped)
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_opening = match OPENING_FENCE.find(trimmed) {
        Some(fence) => &trimmed[fence.end()..],
        None => trimmed,
    };
    let without_closing = without_opening
        .trim_end()
        .strip_suffix(CLOSING_FENCE)
        .unwrap_or(without_opening);
    without_closing.trim()
}

/// Extracts and decodes the JSON array a model embedded in its completion.
///
/// Extraction is permissive; decoding is strict. Anything other than a JSON
/// array is rejected.
pub fn recover_flashcards(raw: &str) -> Result<Vec<Value>, RecoveryError> {
    let candidate = match locate_json_array(raw) {
        JsonCandidate::Recovered(candidate) => candidate,
        JsonCandidate::NotFound => {
            tracing::error!(raw_response = %log_preview(raw), "Model response holds no JSON");
            return Err(RecoveryError::NoJsonFound);
        }
    };

    let reason = match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(items)) => return Ok(items),
        Ok(other) => format!("expected an array, found {}", value_kind(&other)),
        Err(e) => e.to_string(),
    };

    tracing::error!(
        reason = %reason,
        raw_response = %log_preview(raw),
        candidate = %log_preview(candidate),
        "Failed to decode JSON from model response"
    );
    tracing::debug!(raw_response = %raw, candidate = %candidate, "Full model output");

    Err(RecoveryError::Malformed {
        candidate: candidate.to_string(),
        reason,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
