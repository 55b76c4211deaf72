//! Response extraction — recovers a single JSON object from model text.
//!
//! Models are told to return bare JSON but sometimes wrap it in code fences or
//! add a sentence before/after. Recovery order:
//! 1. strip fence markers, trim
//! 2. strict parse of the whole text
//! 3. strict parse of the span from the first `{` to the last `}`
//!
//! Nothing is guessed beyond that. The result is either a full object or an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Opening or closing fence, with an optional language tag (```json, ```JSON, ```).
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("valid regex"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response was not valid JSON: {0}")]
    NotJson(String),

    #[error("response JSON did not match the expected shape: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Removes every code-fence marker and trims the result.
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}

/// Extracts the JSON object the model meant to return.
pub fn extract_json_object(raw: &str) -> Result<Value, ExtractError> {
    let cleaned = strip_fences(raw);

    let direct_err = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value @ Value::Object(_)) => return Ok(value),
        Ok(_) => "top-level value is not an object".to_string(),
        Err(e) => e.to_string(),
    };

    if let Some(span) = outer_brace_span(&cleaned) {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(span) {
            debug!("Recovered JSON object from brace span after direct parse failed");
            return Ok(value);
        }
    }

    Err(ExtractError::NotJson(direct_err))
}

/// Extracts the JSON object and deserializes it into `T`.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let value = extract_json_object(raw)?;
    Ok(serde_json::from_value(value)?)
}

/// Greedy span: first `{` through last `}` inclusive.
fn outer_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
