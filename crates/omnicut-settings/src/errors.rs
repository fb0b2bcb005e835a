//! Settings error types.

use std::path::PathBuf;

/// Why `settings.json` could not be turned into usable settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The settings file is not valid JSON, or a field has the wrong type.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },

    /// A setting parsed but cannot be used.
    #[error("{field}: {reason}")]
    Invalid {
        /// camelCase path of the setting, e.g. `video.pollIntervalMs`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl SettingsError {
    /// Build an [`Invalid`](Self::Invalid) error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// The offending setting, for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { field, .. } => Some(field),
            Self::Read { .. } | Self::Parse { .. } => None,
        }
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
