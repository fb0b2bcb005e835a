//! Credential providers.
//!
//! The studio never reads keys from global state; it is handed a
//! [`CredentialProvider`] and asks it for a key before each flow.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AuthError;
use crate::storage::get_api_key;
use crate::types::ApiKey;

/// Environment variables checked by [`EnvCredentials::standard`], in order.
pub const API_KEY_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// Source of the API key for remote calls.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Resolve a key, or [`AuthError::NotConfigured`] if this source has none.
    async fn api_key(&self) -> Result<ApiKey, AuthError>;

    /// Human-readable name of this source.
    fn name(&self) -> String;
}

/// A fixed key.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    key: ApiKey,
}

impl StaticCredentials {
    /// Wrap a validated key.
    pub fn new(key: ApiKey) -> Self {
        Self { key }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn api_key(&self) -> Result<ApiKey, AuthError> {
        Ok(self.key.clone())
    }

    fn name(&self) -> String {
        "static".to_string()
    }
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the key from environment variables, first non-empty wins.
#[derive(Clone)]
pub struct EnvCredentials {
    vars: Vec<String>,
    lookup: Lookup,
}

impl EnvCredentials {
    /// Check `GEMINI_API_KEY`, `GOOGLE_API_KEY`, then `API_KEY`.
    pub fn standard() -> Self {
        Self::new(API_KEY_ENV_VARS)
    }

    /// Check the given variables in order.
    pub fn new<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
            lookup: Arc::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replace the variable source (tests, embedding).
    #[must_use]
    pub fn with_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.lookup = Arc::new(lookup);
        self
    }
}

impl std::fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredentials")
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn api_key(&self) -> Result<ApiKey, AuthError> {
        for var in &self.vars {
            let Some(value) = (self.lookup)(var).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            tracing::debug!(var = %var, "using API key from environment");
            return ApiKey::new(value);
        }
        Err(AuthError::NotConfigured(self.name()))
    }

    fn name(&self) -> String {
        format!("env ({})", self.vars.join(", "))
    }
}

/// Reads the key saved in `auth.json`.
#[derive(Clone, Debug)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    /// Read from the given auth file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialProvider for FileCredentials {
    async fn api_key(&self) -> Result<ApiKey, AuthError> {
        match get_api_key(&self.path)? {
            Some(key) => {
                tracing::debug!(path = %self.path.display(), "using API key from auth file");
                Ok(key)
            }
            None => Err(AuthError::NotConfigured(self.name())),
        }
    }

    fn name(&self) -> String {
        format!("auth file {}", self.path.display())
    }
}

/// Tries providers in order.
///
/// A provider reporting [`AuthError::NotConfigured`] is skipped; any other
/// error stops the chain.
#[derive(Clone, Default)]
pub struct ChainCredentials {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainCredentials {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider.
    #[must_use]
    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Environment first, then the given auth file.
    pub fn standard(auth_path: impl Into<PathBuf>) -> Self {
        Self::new()
            .with(EnvCredentials::standard())
            .with(FileCredentials::new(auth_path))
    }
}

impl std::fmt::Debug for ChainCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.name()))
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for ChainCredentials {
    async fn api_key(&self) -> Result<ApiKey, AuthError> {
        for provider in &self.providers {
            match provider.api_key().await {
                Err(AuthError::NotConfigured(_)) => {}
                other => return other,
            }
        }
        Err(AuthError::NotConfigured(self.name()))
    }

    fn name(&self) -> String {
        self.providers
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
