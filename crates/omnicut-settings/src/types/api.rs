//! Remote API and logging settings.

use serde::{Deserialize, Serialize};

/// Default Generative Language API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Remote API connection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Largest accepted upload in bytes. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: 300_000,
            max_upload_bytes: None,
        }
    }
}

/// Remote model identifiers, one per pipeline stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    /// Video generation model.
    pub video: String,
    /// Audio understanding / translation model.
    pub translation: String,
    /// Text-to-speech model.
    pub speech: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            video: "veo-3.1-fast-generate-preview".to_string(),
            translation: "gemini-2.5-flash-native-audio-preview-12-2025".to_string(),
            speech: "gemini-2.5-flash-preview-tts".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
