//! Credential and storage types.

use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// Current `auth.json` schema version.
pub const AUTH_STORAGE_VERSION: u32 = 1;

/// A validated API key.
///
/// `Debug` and `Display` redact the secret; use [`ApiKey::expose`] to read it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate and wrap a raw key. Surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AuthError> {
        let key = raw.as_ref().trim();
        if key.is_empty() {
            return Err(AuthError::InvalidKey("key is empty".to_string()));
        }
        if key.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(AuthError::InvalidKey(
                "key contains whitespace or control characters".to_string(),
            ));
        }
        Ok(Self(key.to_string()))
    }

    /// The secret value, for placing in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short form safe to print: the last four characters.
    pub fn redacted(&self) -> String {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{tail}")
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// On-disk layout of `auth.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStorage {
    /// Schema version.
    pub version: u32,
    /// Stored Gemini API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// RFC 3339 timestamp of the last save.
    #[serde(default)]
    pub last_updated: String,
}

impl AuthStorage {
    /// Empty storage at the current version.
    pub fn new() -> Self {
        Self {
            version: AUTH_STORAGE_VERSION,
            api_key: None,
            last_updated: String::new(),
        }
    }
}

impl Default for AuthStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
