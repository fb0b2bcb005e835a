//! Remote generation backend seam.

use async_trait::async_trait;
use bytes::Bytes;
use omnicut_auth::ApiKey;
use omnicut_gemini::{
    GeminiClient, GeminiError, GenerateContentRequest, GenerateContentResponse, Operation,
    PredictLongRunningRequest,
};

/// The remote calls the studio flows make.
///
/// [`GeminiClient`] is the production implementation; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run a single `generateContent` call.
    async fn generate_content(
        &self,
        key: &ApiKey,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;

    /// Submit a video job.
    async fn submit_video(
        &self,
        key: &ApiKey,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> Result<Operation, GeminiError>;

    /// Fetch the current state of a job.
    async fn poll_operation(&self, key: &ApiKey, name: &str) -> Result<Operation, GeminiError>;

    /// Fetch a produced file.
    async fn download(&self, key: &ApiKey, uri: &str) -> Result<Bytes, GeminiError>;
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(
        &self,
        key: &ApiKey,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        GeminiClient::generate_content(self, key, model, request).await
    }

    async fn submit_video(
        &self,
        key: &ApiKey,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> Result<Operation, GeminiError> {
        self.predict_long_running(key, model, request).await
    }

    async fn poll_operation(&self, key: &ApiKey, name: &str) -> Result<Operation, GeminiError> {
        self.get_operation(key, name).await
    }

    async fn download(&self, key: &ApiKey, uri: &str) -> Result<Bytes, GeminiError> {
        GeminiClient::download(self, key, uri).await
    }
}
