//! Failure classification for remote service errors.
//!
//! Remote failures arrive as an HTTP status (when there was a response) and
//! free-form error text. [`classify_failure`] maps them onto a small set of
//! [`FailureKind`]s by walking an ordered pattern table; the first match wins.
//! Each kind carries a user-facing message and suggestion.

use serde::{Deserialize, Serialize};

/// Category of a remote failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing, invalid, or unauthorized API credential.
    Credential,
    /// Rate limit or quota exhausted.
    Quota,
    /// Output withheld for safety/policy reasons.
    ContentPolicy,
    /// Model or endpoint does not exist.
    NotFound,
    /// Anything else: server errors, transport failures, malformed responses.
    Service,
}

impl FailureKind {
    /// Short user-facing description.
    pub fn message(self) -> &'static str {
        match self {
            Self::Credential => "The API key is invalid or lacks permission",
            Self::Quota => "The usage quota is exhausted",
            Self::ContentPolicy => "The content was not generated because of safety policy",
            Self::NotFound => "The requested model was not found (404)",
            Self::Service => "The remote service reported a problem",
        }
    }

    /// Suggested user action, if any.
    pub fn suggestion(self) -> Option<&'static str> {
        match self {
            Self::Credential => {
                Some("Set GEMINI_API_KEY or run \"omnicut auth set-key\" with a valid key")
            }
            Self::Quota => Some("Wait a while and try again"),
            Self::ContentPolicy => Some("Revise the prompt and try again"),
            Self::NotFound | Self::Service => None,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credential => write!(f, "credential"),
            Self::Quota => write!(f, "quota"),
            Self::ContentPolicy => write!(f, "content_policy"),
            Self::NotFound => write!(f, "not_found"),
            Self::Service => write!(f, "service"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern matching
// ─────────────────────────────────────────────────────────────────────────────

struct FailurePattern {
    check: fn(Option<u16>, &str) -> bool,
    kind: FailureKind,
}

/// Known failure patterns, checked in order. `text` is already lowercased.
fn patterns() -> &'static [FailurePattern] {
    static PATTERNS: &[FailurePattern] = &[
        // An HTTP status, when present, outranks anything in the message.
        FailurePattern {
            check: |status, _| matches!(status, Some(401 | 403)),
            kind: FailureKind::Credential,
        },
        FailurePattern {
            check: |status, _| status == Some(429),
            kind: FailureKind::Quota,
        },
        FailurePattern {
            check: |status, _| status == Some(404),
            kind: FailureKind::NotFound,
        },
        // Credentials
        FailurePattern {
            check: |_, s| s.contains("api key") || s.contains("api_key"),
            kind: FailureKind::Credential,
        },
        FailurePattern {
            check: |_, s| s.contains("permission_denied") || s.contains("unauthenticated"),
            kind: FailureKind::Credential,
        },
        // Quota
        FailurePattern {
            check: |_, s| {
                s.contains("quota")
                    || s.contains("resource_exhausted")
                    || (s.contains("rate") && s.contains("limit"))
            },
            kind: FailureKind::Quota,
        },
        // Content policy
        FailurePattern {
            check: |_, s| s.contains("safety") || s.contains("blocked"),
            kind: FailureKind::ContentPolicy,
        },
        FailurePattern {
            check: |_, s| s.contains("prohibited") || s.contains("responsible ai"),
            kind: FailureKind::ContentPolicy,
        },
        // Not found
        FailurePattern {
            check: |_, s| s.contains("not_found"),
            kind: FailureKind::NotFound,
        },
        // Bare status codes in transport errors that carried no status.
        FailurePattern {
            check: |status, s| status.is_none() && (s.contains("403") || s.contains("401")),
            kind: FailureKind::Credential,
        },
        FailurePattern {
            check: |status, s| status.is_none() && s.contains("429"),
            kind: FailureKind::Quota,
        },
        FailurePattern {
            check: |status, s| status.is_none() && s.contains("404"),
            kind: FailureKind::NotFound,
        },
    ];
    PATTERNS
}

/// Classify a remote failure from its HTTP status and error text.
pub fn classify_failure(status: Option<u16>, text: &str) -> FailureKind {
    let lower = text.to_lowercase();
    patterns()
        .iter()
        .find(|p| (p.check)(status, &lower))
        .map_or(FailureKind::Service, |p| p.kind)
}

/// Render a failure for display: message, suggestion, and the raw detail.
pub fn format_failure(kind: FailureKind, detail: &str) -> String {
    let mut out = kind.message().to_string();
    if let Some(suggestion) = kind.suggestion() {
        out.push_str(". ");
        out.push_str(suggestion);
    }
    let detail = detail.trim();
    if !detail.is_empty() {
        out.push_str(" (");
        out.push_str(truncate(detail, 300));
        out.push(')');
    }
    out
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
