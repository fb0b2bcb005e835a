//! The [`Studio`] orchestrator.

use std::sync::Arc;
use std::time::Duration;

use omnicut_auth::{ApiKey, CredentialProvider};
use omnicut_core::SourceMedia;
use omnicut_gemini::{GeminiClient, GeminiConfig};
use omnicut_settings::OmnicutSettings;
use tracing::warn;

use crate::backend::GenerativeBackend;
use crate::config::StudioConfig;
use crate::errors::{Result, StudioError};
use crate::progress::{LogProgress, Progress, ProgressSink};

/// Sequences remote calls for video generation and translate-and-dub.
///
/// Flows are in [`Studio::generate_video`] and [`Studio::translate_and_dub`].
/// A studio holds no per-flow state and may run flows from several tasks.
pub struct Studio {
    pub(crate) backend: Arc<dyn GenerativeBackend>,
    credentials: Arc<dyn CredentialProvider>,
    progress: Arc<dyn ProgressSink>,
    pub(crate) config: StudioConfig,
}

impl Studio {
    /// Create a studio over an arbitrary backend.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        credentials: Arc<dyn CredentialProvider>,
        config: StudioConfig,
    ) -> Self {
        Self {
            backend,
            credentials,
            progress: Arc::new(LogProgress),
            config,
        }
    }

    /// Create a studio talking to the Gemini API as configured in `settings`.
    pub fn from_settings(
        settings: &OmnicutSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let client = GeminiClient::new(&GeminiConfig {
            base_url: settings.api.base_url.clone(),
            timeout: Duration::from_millis(settings.api.request_timeout_ms),
        })?;
        Ok(Self::new(
            Arc::new(client),
            credentials,
            StudioConfig::from(settings),
        ))
    }

    /// Replace the progress sink.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub(crate) fn report(&self, progress: Progress) {
        self.progress.report(progress);
    }

    pub(crate) async fn api_key(&self) -> Result<ApiKey> {
        self.credentials.api_key().await.map_err(|e| {
            warn!(source = %self.credentials.name(), error = %e, "no usable API key");
            StudioError::from(e)
        })
    }

    /// Reject empty uploads and uploads over the configured cap.
    pub(crate) fn check_upload(&self, media: &SourceMedia, what: &str) -> Result<()> {
        if media.is_empty() {
            return Err(StudioError::Input(format!("{what} is empty")));
        }
        if let Some(cap) = self.config.max_upload_bytes {
            let len = u64::try_from(media.len()).unwrap_or(u64::MAX);
            if len > cap {
                return Err(StudioError::Input(format!(
                    "{what} is {len} bytes, over the {cap}-byte upload limit"
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("credentials", &self.credentials.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
