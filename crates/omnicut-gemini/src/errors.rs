//! Gemini client errors and API error body parsing.

use omnicut_core::{FailureKind, classify_failure};
use serde_json::Value;

/// Errors from the Gemini REST client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// HTTP transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
        /// Google status code (e.g., `RESOURCE_EXHAUSTED`).
        code: Option<String>,
    },

    /// A long-running operation finished with an error.
    #[error("operation failed ({code}): {message}")]
    Operation {
        /// RPC status code.
        code: i32,
        /// Error message.
        message: String,
    },

    /// The request could not be built (e.g., a key that is not a valid header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GeminiError {
    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::Operation { code, .. } => rpc_code_to_http(*code),
            Self::Json(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Classify for user-facing reporting.
    pub fn failure_kind(&self) -> FailureKind {
        let text = match self {
            Self::Api { message, code, .. } => {
                format!("{message} {}", code.as_deref().unwrap_or_default())
            }
            other => other.to_string(),
        };
        classify_failure(self.status(), &text)
    }
}

/// Map a `google.rpc.Code` to the HTTP status the REST gateway would use.
fn rpc_code_to_http(code: i32) -> Option<u16> {
    match code {
        3 | 9 | 11 => Some(400),
        16 => Some(401),
        7 => Some(403),
        5 => Some(404),
        8 => Some(429),
        13 | 2 | 15 => Some(500),
        14 => Some(503),
        4 => Some(504),
        _ => None,
    }
}

/// Parse a Google error envelope: `{"error": {"message": "...", "status": "..."}}`.
///
/// Returns `(message, code)`. Non-JSON bodies become `HTTP {status}: {body}`.
pub fn parse_api_error(body: &str, status: u16) -> (String, Option<String>) {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json["error"]["message"].as_str() {
            let code = json["error"]["status"].as_str().map(String::from);
            return (message.to_string(), code);
        }
        return (format!("HTTP {status}: {body}"), None);
    }
    let body = body.trim();
    if body.is_empty() {
        (format!("HTTP {status}"), None)
    } else {
        (format!("HTTP {status}: {body}"), None)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
