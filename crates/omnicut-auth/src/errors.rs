//! Auth error types.

/// Errors that can occur while resolving or storing credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A key was supplied but is unusable (empty, whitespace, control characters).
    #[error("invalid API key: {0}")]
    InvalidKey(String),

    /// `auth.json` exists but cannot be used.
    #[error("auth file {} is unusable ({reason}); run \"omnicut auth set-key\" to rewrite it", path.display())]
    UnusableFile {
        /// Auth file.
        path: std::path::PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// No provider could supply a key.
    #[error("no API key configured (checked: {0})")]
    NotConfigured(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
