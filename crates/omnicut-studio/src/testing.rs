//! In-memory backend for flow tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use omnicut_auth::{ApiKey, EnvCredentials, StaticCredentials};
use omnicut_gemini::{
    Candidate, Content, GeminiError, GenerateContentRequest, GenerateContentResponse,
    GenerateVideoResponse, GeneratedSample, Operation, OperationResponse, Part,
    PredictLongRunningRequest, VideoRef,
};
use tokio::time::Instant;

use crate::backend::GenerativeBackend;
use crate::config::StudioConfig;
use crate::progress::Progress;
use crate::studio::Studio;

/// Scripted backend. Queues are consumed front to back; an exhausted poll
/// queue keeps answering "not done".
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub content: Mutex<VecDeque<Result<GenerateContentResponse, GeminiError>>>,
    pub submit: Mutex<Option<Result<Operation, GeminiError>>>,
    pub polls: Mutex<VecDeque<Result<Operation, GeminiError>>>,
    pub download: Mutex<Option<Result<Bytes, GeminiError>>>,

    pub content_requests: Mutex<Vec<(String, GenerateContentRequest)>>,
    pub video_requests: Mutex<Vec<(String, PredictLongRunningRequest)>>,
    pub poll_times: Mutex<Vec<Instant>>,
    pub poll_names: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<String>>,
    pub keys: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeBackend {
    pub fn with_content(self, response: Result<GenerateContentResponse, GeminiError>) -> Self {
        self.content.lock().unwrap().push_back(response);
        self
    }

    pub fn with_submit(self, response: Result<Operation, GeminiError>) -> Self {
        *self.submit.lock().unwrap() = Some(response);
        self
    }

    pub fn with_poll(self, response: Result<Operation, GeminiError>) -> Self {
        self.polls.lock().unwrap().push_back(response);
        self
    }

    pub fn with_download(self, response: Result<Bytes, GeminiError>) -> Self {
        *self.download.lock().unwrap() = Some(response);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.content_requests.lock().unwrap().len()
            + self.video_requests.lock().unwrap().len()
            + self.poll_names.lock().unwrap().len()
            + self.downloads.lock().unwrap().len()
    }

    fn record_key(&self, key: &ApiKey) {
        self.keys.lock().unwrap().push(key.expose().to_string());
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate_content(
        &self,
        key: &ApiKey,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.record_key(key);
        self.content_requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.content
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerateContentResponse::default()))
    }

    async fn submit_video(
        &self,
        key: &ApiKey,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> Result<Operation, GeminiError> {
        self.record_key(key);
        self.video_requests
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.submit
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(pending("operations/fake")))
    }

    async fn poll_operation(&self, key: &ApiKey, name: &str) -> Result<Operation, GeminiError> {
        self.record_key(key);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        self.poll_times.lock().unwrap().push(Instant::now());
        self.poll_names.lock().unwrap().push(name.to_string());
        tokio::task::yield_now().await;
        let next = self
            .polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pending(name)));
        let _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next
    }

    async fn download(&self, key: &ApiKey, uri: &str) -> Result<Bytes, GeminiError> {
        self.record_key(key);
        self.downloads.lock().unwrap().push(uri.to_string());
        self.download
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Bytes::new()))
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────────

pub(crate) fn pending(name: &str) -> Operation {
    Operation {
        name: name.to_string(),
        ..Operation::default()
    }
}

pub(crate) fn done_with_video(name: &str, uri: &str) -> Operation {
    Operation {
        name: name.to_string(),
        done: true,
        response: Some(OperationResponse {
            generate_video_response: Some(GenerateVideoResponse {
                generated_samples: vec![GeneratedSample {
                    video: Some(VideoRef {
                        uri: Some(uri.to_string()),
                    }),
                }],
                ..GenerateVideoResponse::default()
            }),
        }),
        error: None,
    }
}

pub(crate) fn candidate_with(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts,
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        prompt_feedback: None,
    }
}

pub(crate) fn text_response(text: &str) -> GenerateContentResponse {
    candidate_with(vec![Part::text(text)])
}

pub(crate) fn audio_response(mime_type: &str, pcm: &[u8]) -> GenerateContentResponse {
    candidate_with(vec![Part::inline_data(
        mime_type,
        omnicut_core::media::encode_base64(pcm),
    )])
}

/// Studio over `backend` with a static key, recording progress.
pub(crate) fn studio_with(
    backend: FakeBackend,
    config: StudioConfig,
) -> (Studio, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    let creds = Arc::new(StaticCredentials::new(
        ApiKey::new("fake-key").expect("valid key"),
    ));
    let studio = Studio::new(backend.clone(), creds, config);
    (studio, backend)
}

/// Studio over `backend` whose credential chain finds no key.
pub(crate) fn studio_without_key(
    backend: FakeBackend,
    config: StudioConfig,
) -> (Studio, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    let creds = Arc::new(EnvCredentials::new(["GEMINI_API_KEY"]).with_lookup(|_| None));
    let studio = Studio::new(backend.clone(), creds, config);
    (studio, backend)
}

/// Progress recorder.
pub(crate) fn recorder() -> (Arc<Mutex<Vec<Progress>>>, Arc<dyn crate::ProgressSink>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = seen.clone();
    let sink: Arc<dyn crate::ProgressSink> =
        Arc::new(move |p: Progress| sink_seen.lock().unwrap().push(p));
    (seen, sink)
}
