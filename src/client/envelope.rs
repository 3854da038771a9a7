//! Uniform result envelope returned by every tool.
//!
//! Classification is purely about whether the body parses as JSON. A 404 with
//! a JSON body is reported as `data`; callers inspect `status_code` to detect
//! upstream failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of characters kept in `raw_text` for non-JSON bodies.
pub const RAW_TEXT_LIMIT: usize = 1000;

/// Maximum number of characters returned for textual (CSV/TSV) reports.
pub const REPORT_TEXT_LIMIT: usize = 5000;

/// Result of one tool call.
///
/// Variant order matters for deserialization: the untagged representation
/// tries `ParseFailure` before `Data` since a missing `data` key would
/// otherwise deserialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// Body was not valid JSON.
    ParseFailure {
        status_code: u16,
        error: String,
        /// First [`RAW_TEXT_LIMIT`] characters of the body, `null` when empty.
        raw_text: Option<String>,
    },

    /// Body parsed as JSON (or a textual report passed through as a string).
    Data { status_code: u16, data: Value },

    /// Request never left the process.
    Rejected { error: String },
}

impl Envelope {
    /// Normalizes a completed response into an envelope.
    pub fn normalize(status_code: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(data) => Envelope::Data { status_code, data },
            Err(e) => Envelope::ParseFailure {
                status_code,
                error: e.to_string(),
                raw_text: if body.is_empty() {
                    None
                } else {
                    Some(truncate_chars(body, RAW_TEXT_LIMIT).to_string())
                },
            },
        }
    }

    /// Passes a textual body through without JSON parsing.
    pub fn text(status_code: u16, body: &str, limit: usize) -> Self {
        Envelope::Data {
            status_code,
            data: Value::String(truncate_chars(body, limit).to_string()),
        }
    }

    /// Envelope for a verb the generic dispatcher does not support.
    pub fn unsupported_method(method: &str) -> Self {
        Envelope::Rejected {
            error: format!("Unsupported method: {}", method),
        }
    }

    /// HTTP status of the upstream response, if a request was made.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Envelope::ParseFailure { status_code, .. } | Envelope::Data { status_code, .. } => {
                Some(*status_code)
            }
            Envelope::Rejected { .. } => None,
        }
    }

    /// Parsed body, when the body was JSON.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Data { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Error description, for parse failures and rejected requests.
    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::ParseFailure { error, .. } | Envelope::Rejected { error } => Some(error),
            Envelope::Data { .. } => None,
        }
    }

    /// Converts the envelope to its JSON wire shape.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Returns at most `limit` characters from the start of `text`.
pub(crate) fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
