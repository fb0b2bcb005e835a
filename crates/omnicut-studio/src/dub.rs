//! Translate-and-dub flow.
//!
//! Uploaded audio or video goes to the audio-understanding model with the
//! translation instruction. The English transcript then goes to the speech
//! model, and the raw PCM it returns is wrapped in a WAV container.

use omnicut_core::media::{FALLBACK_AUDIO_MIME, WAV_MIME, decode_base64};
use omnicut_core::wav::pcm_rate_from_mime;
use omnicut_core::{MediaArtifact, SourceMedia};
use omnicut_gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use tracing::{debug, info, instrument, warn};

use crate::errors::{Result, Stage, StudioError};
use crate::progress::Progress;
use crate::studio::Studio;

/// File name given to dubbed audio.
pub const DUB_FILE_NAME: &str = "omnicut-dub.wav";

/// Finish reasons that mean the candidate was withheld.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
    "IMAGE_SAFETY",
];

/// Output of [`Studio::translate_and_dub`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DubResult {
    /// English transcript of the source.
    pub translated_text: String,
    /// Synthesized speech as a WAV file.
    pub audio: MediaArtifact,
}

impl Studio {
    /// Translate the speech in `source` to English and synthesize a dub.
    #[instrument(skip_all, fields(file = %source.file_name, len = source.len()))]
    pub async fn translate_and_dub(&self, source: SourceMedia) -> Result<DubResult> {
        self.check_upload(&source, "source file")?;
        self.config.pcm.validate()?;
        let key = self.api_key().await?;

        self.report(Progress::PreparingUpload);
        let mime_type = if source.mime_type.trim().is_empty() {
            FALLBACK_AUDIO_MIME
        } else {
            source.mime_type.as_str()
        };
        let translate = GenerateContentRequest {
            contents: vec![Content::from_parts(vec![
                Part::inline_data(mime_type, source.to_base64()),
                Part::text(self.config.instruction.clone()),
            ])],
            generation_config: None,
        };

        self.report(Progress::Translating);
        let response = self
            .backend
            .generate_content(&key, &self.config.translation_model, &translate)
            .await?;
        check_blocked(&response)?;
        let translated_text = response
            .text()
            .map(|t| t.trim().to_string())
            .ok_or(StudioError::EmptyResult {
                stage: Stage::Translation,
            })?;
        info!(chars = translated_text.chars().count(), "translation received");

        self.report(Progress::Synthesizing);
        let speak = GenerateContentRequest {
            contents: vec![Content::from_parts(vec![Part::text(translated_text.clone())])],
            generation_config: Some(GenerationConfig::speech(self.config.voice.clone())),
        };
        let response = self
            .backend
            .generate_content(&key, &self.config.speech_model, &speak)
            .await?;
        check_blocked(&response)?;
        let audio = response.inline_data().ok_or(StudioError::EmptyResult {
            stage: Stage::Speech,
        })?;
        let pcm = decode_base64(&audio.data)
            .map_err(|e| StudioError::Service(format!("speech audio is not valid base64: {e}")))?;
        if pcm.is_empty() {
            return Err(StudioError::EmptyResult {
                stage: Stage::Speech,
            });
        }
        if let Some(rate) = pcm_rate_from_mime(&audio.mime_type) {
            if rate != self.config.pcm.sample_rate {
                warn!(
                    reported = rate,
                    configured = self.config.pcm.sample_rate,
                    "speech rate differs from configured format, using configured"
                );
            }
        }
        debug!(pcm_len = pcm.len(), mime_type = %audio.mime_type, "speech received");

        self.report(Progress::Encoding);
        let wav = self.config.pcm.encode_wav(&pcm)?;

        self.report(Progress::DubReady);
        Ok(DubResult {
            translated_text,
            audio: MediaArtifact::new(wav, WAV_MIME, DUB_FILE_NAME),
        })
    }
}

/// Reject responses the service withheld for policy reasons.
fn check_blocked(response: &GenerateContentResponse) -> Result<()> {
    if let Some(reason) = response.block_reason() {
        return Err(StudioError::ContentPolicy(format!("prompt blocked: {reason}")));
    }
    match response.finish_reason() {
        Some(reason) if BLOCKING_FINISH_REASONS.contains(&reason) => Err(
            StudioError::ContentPolicy(format!("response withheld: {reason}")),
        ),
        _ => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
