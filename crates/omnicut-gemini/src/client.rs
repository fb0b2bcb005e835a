//! Gemini REST client.
//!
//! Thin, stateless wrapper over the Generative Language API. Every call takes
//! the API key explicitly; the key travels in the `x-goog-api-key` header and
//! never appears in URLs or logs.

use std::time::Duration;

use bytes::Bytes;
use omnicut_auth::ApiKey;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use crate::errors::{GeminiError, parse_api_error};
use crate::types::{
    GenerateContentRequest, GenerateContentResponse, Operation, PredictLongRunningRequest,
};

/// Default Generative Language API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client configuration.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Gemini REST client.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client with its own connection pool.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(&config.base_url, client))
    }

    /// Create a client with a shared HTTP client.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Gemini client initialized");
        Self { base_url, client }
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn model_url(&self, model: &str, action: &str) -> String {
        format!("{}/models/{model}:{action}", self.base_url)
    }

    fn operation_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }

    fn headers(key: &ApiKey) -> Result<HeaderMap, GeminiError> {
        let mut value = HeaderValue::from_str(key.expose())
            .map_err(|_| GeminiError::InvalidRequest("API key is not a valid header value".into()))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        let _ = headers.insert(API_KEY_HEADER, value);
        Ok(headers)
    }

    /// `POST models/{model}:generateContent`.
    #[instrument(skip_all, fields(model = %model))]
    pub async fn generate_content(
        &self,
        key: &ApiKey,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.model_url(model, "generateContent");
        self.post_json(key, &url, request).await
    }

    /// `POST models/{model}:predictLongRunning`. Returns the pending operation.
    #[instrument(skip_all, fields(model = %model))]
    pub async fn predict_long_running(
        &self,
        key: &ApiKey,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> Result<Operation, GeminiError> {
        let url = self.model_url(model, "predictLongRunning");
        let operation: Operation = self.post_json(key, &url, request).await?;
        if operation.name.is_empty() {
            return Err(GeminiError::InvalidRequest(
                "operation response carried no name".into(),
            ));
        }
        debug!(operation = %operation.name, "video job submitted");
        Ok(operation)
    }

    /// `GET {name}`: current state of a long-running operation.
    #[instrument(skip_all, fields(operation = %name))]
    pub async fn get_operation(&self, key: &ApiKey, name: &str) -> Result<Operation, GeminiError> {
        let url = self.operation_url(name);
        let response = self
            .client
            .get(&url)
            .headers(Self::headers(key)?)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Download a generated file by URI.
    #[instrument(skip_all)]
    pub async fn download(&self, key: &ApiKey, uri: &str) -> Result<Bytes, GeminiError> {
        let response = self
            .client
            .get(uri)
            .headers(Self::headers(key)?)
            .send()
            .await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "download complete");
        Ok(bytes)
    }

    async fn post_json<B, T>(&self, key: &ApiKey, url: &str, body: &B) -> Result<T, GeminiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .headers(Self::headers(key)?)
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GeminiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body_text = response.text().await.unwrap_or_default();
    let (message, code) = parse_api_error(&body_text, status.as_u16());
    error!(
        status = status.as_u16(),
        code = code.as_deref().unwrap_or("unknown"),
        "Gemini API error"
    );
    Err(GeminiError::Api {
        status: status.as_u16(),
        message,
        code,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
