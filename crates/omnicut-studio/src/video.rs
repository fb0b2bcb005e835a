//! Prompt-to-video flow.
//!
//! Submit a long-running job, poll it at a fixed interval until it reports
//! done, then download the first generated video. Polls are strictly
//! sequential: each status check is awaited before the next sleep starts.

use omnicut_auth::ApiKey;
use omnicut_core::MediaArtifact;
use omnicut_core::media::{FALLBACK_IMAGE_MIME, MP4_MIME};
use omnicut_gemini::{
    GeminiError, ImageInput, Operation, PredictLongRunningRequest, VideoInstance, VideoParameters,
};
use tracing::{debug, info, instrument, warn};

use crate::errors::{Result, Stage, StudioError};
use crate::progress::Progress;
use crate::request::{AspectRatio, Resolution, VideoRequest};
use crate::studio::Studio;

/// File name given to generated videos.
pub const VIDEO_FILE_NAME: &str = "omnicut-video.mp4";

impl Studio {
    /// Generate a video from a prompt and optional reference image.
    #[instrument(skip_all, fields(model = %self.config.video_model))]
    pub async fn generate_video(&self, request: VideoRequest) -> Result<MediaArtifact> {
        let body = self.build_video_request(&request)?;
        let key = self.api_key().await?;

        self.report(Progress::Submitting);
        let operation = self
            .backend
            .submit_video(&key, &self.config.video_model, &body)
            .await?;
        info!(operation = %operation.name, "video job submitted");

        let operation = self.wait_for_completion(&key, operation).await?;
        let uri = finished_video_uri(&operation)?;

        self.report(Progress::Downloading);
        let bytes = self.backend.download(&key, uri).await?;
        if bytes.is_empty() {
            return Err(StudioError::EmptyResult {
                stage: Stage::Download,
            });
        }
        info!(len = bytes.len(), "video downloaded");

        self.report(Progress::VideoReady);
        Ok(MediaArtifact::new(bytes, MP4_MIME, VIDEO_FILE_NAME))
    }

    /// Validate a request against the enabled features and build the job body.
    fn build_video_request(&self, request: &VideoRequest) -> Result<PredictLongRunningRequest> {
        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(StudioError::Input("prompt is empty".into()));
        }

        let features = self.config.features;
        let image = match &request.image {
            Some(_) if !features.reference_image => {
                return Err(StudioError::Input(
                    "reference images are not enabled".into(),
                ));
            }
            Some(image) => {
                self.check_upload(image, "reference image")?;
                self.report(Progress::PreparingImage);
                let mime_type = if image.mime_type.trim().is_empty() {
                    FALLBACK_IMAGE_MIME.to_string()
                } else {
                    image.mime_type.clone()
                };
                Some(ImageInput {
                    bytes_base64_encoded: image.to_base64(),
                    mime_type,
                })
            }
            None => None,
        };

        let (resolution, aspect_ratio) = if features.format_choice {
            (request.resolution, request.aspect_ratio)
        } else {
            if request.resolution != Resolution::default()
                || request.aspect_ratio != AspectRatio::default()
            {
                debug!(
                    requested_resolution = %request.resolution,
                    requested_aspect = %request.aspect_ratio,
                    "format choice disabled, using 720p 16:9"
                );
            }
            (Resolution::default(), AspectRatio::default())
        };

        let prompt = if features.style_presets {
            request.style.apply(prompt)
        } else {
            prompt.to_string()
        };

        Ok(PredictLongRunningRequest {
            instances: vec![VideoInstance { prompt, image }],
            parameters: VideoParameters {
                aspect_ratio: aspect_ratio.as_str().to_string(),
                resolution: resolution.as_str().to_string(),
                sample_count: 1,
            },
        })
    }

    /// Poll until the job reports done or the attempt cap is reached.
    async fn wait_for_completion(&self, key: &ApiKey, mut operation: Operation) -> Result<Operation> {
        let policy = self.config.poll;
        let mut attempts: u32 = 0;

        while !operation.done {
            if policy.max_attempts.is_some_and(|max| attempts >= max) {
                warn!(operation = %operation.name, attempts, "video job poll limit reached");
                return Err(StudioError::PollTimeout {
                    operation: operation.name,
                    attempts,
                });
            }
            tokio::time::sleep(policy.interval).await;
            attempts += 1;
            self.report(Progress::Rendering {
                attempt: attempts,
                max_attempts: policy.max_attempts,
            });

            let name = operation.name;
            operation = self.backend.poll_operation(key, &name).await?;
            if operation.name.is_empty() {
                operation.name = name;
            }
            debug!(attempt = attempts, done = operation.done, "polled video job");
        }

        if let Some(err) = operation.error.take() {
            warn!(operation = %operation.name, code = err.code, "video job failed");
            return Err(GeminiError::Operation {
                code: err.code,
                message: err.message,
            }
            .into());
        }
        Ok(operation)
    }
}

/// URI of the finished video, or why there is none.
fn finished_video_uri(operation: &Operation) -> Result<&str> {
    if let Some(uri) = operation.video_uri() {
        return Ok(uri);
    }
    let reasons = operation.filtered_reasons();
    if !reasons.is_empty() {
        return Err(StudioError::ContentPolicy(reasons.join("; ")));
    }
    Err(StudioError::EmptyResult {
        stage: Stage::Video,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
