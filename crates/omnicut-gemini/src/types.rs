//! Gemini API request and response types.
//!
//! Field names follow the REST wire format (camelCase). Response types are
//! lenient: unknown fields are ignored and most fields are optional, since the
//! service omits empty values.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// generateContent
// ─────────────────────────────────────────────────────────────────────────────

/// A content turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The role (`user` or `model`). Omitted for single-turn requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn made of the given parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }
}

/// A content part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data (audio, video, images).
    InlineData {
        /// The inline data details.
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Any part kind this client does not interpret.
    Other(serde_json::Value),
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Inline data part from already-encoded base64.
    pub fn inline_data(mime_type: impl Into<String>, data_base64: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data_base64.into(),
            },
        }
    }
}

/// Inline binary data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type (e.g., `audio/mp3`, `audio/L16;codec=pcm;rate=24000`).
    pub mime_type: String,
    /// Base64-encoded data.
    pub data: String,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents.
    pub contents: Vec<Content>,
    /// Generation options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Generation options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output modalities, e.g. `["AUDIO"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    /// Speech synthesis options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

impl GenerationConfig {
    /// Audio output spoken by a prebuilt voice.
    pub fn speech(voice_name: impl Into<String>) -> Self {
        Self {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice_name.into(),
                    },
                },
            }),
        }
    }
}

/// Speech synthesis options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Voice selection.
    pub voice_config: VoiceConfig,
}

/// Voice selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// A named prebuilt voice.
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// A named prebuilt voice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice name (e.g., `Kore`).
    pub voice_name: String,
}

/// Response from `generateContent`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Response candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback on the prompt (present when the prompt itself was blocked).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate, if it has any non-blank text.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// First inline data part of the first candidate.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| match p {
            Part::InlineData { inline_data } => Some(inline_data),
            _ => None,
        })
    }

    /// Finish reason of the first candidate.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    /// Why the prompt was blocked, if it was.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

/// A response candidate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of this candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Finish reason (e.g., `STOP`, `MAX_TOKENS`, `SAFETY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Prompt feedback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason (e.g., `SAFETY`, `PROHIBITED_CONTENT`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// predictLongRunning (video)
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for `models/{model}:predictLongRunning`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictLongRunningRequest {
    /// One instance per requested generation.
    pub instances: Vec<VideoInstance>,
    /// Output parameters.
    pub parameters: VideoParameters,
}

/// A single video prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInstance {
    /// Text prompt.
    pub prompt: String,
    /// Optional starting frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageInput>,
}

/// Reference image for a video prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    /// Base64-encoded image bytes.
    pub bytes_base64_encoded: String,
    /// Image MIME type.
    pub mime_type: String,
}

/// Video output parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    /// `16:9` or `9:16`.
    pub aspect_ratio: String,
    /// `720p` or `1080p`.
    pub resolution: String,
    /// Number of videos to generate.
    pub sample_count: u32,
}

/// A long-running operation handle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Resource name, e.g. `models/veo/operations/abc123`.
    #[serde(default)]
    pub name: String,
    /// Whether the operation has finished (successfully or not).
    #[serde(default)]
    pub done: bool,
    /// Result payload, once done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<OperationResponse>,
    /// Failure, once done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

impl Operation {
    fn video_response(&self) -> Option<&GenerateVideoResponse> {
        self.response.as_ref()?.generate_video_response.as_ref()
    }

    /// URI of the first generated video.
    pub fn video_uri(&self) -> Option<&str> {
        self.video_response()?
            .generated_samples
            .iter()
            .find_map(|s| s.video.as_ref()?.uri.as_deref())
            .filter(|uri| !uri.trim().is_empty())
    }

    /// Reasons the service withheld generated media.
    pub fn filtered_reasons(&self) -> &[String] {
        self.video_response()
            .map(|r| r.rai_media_filtered_reasons.as_slice())
            .unwrap_or_default()
    }
}

/// Operation failure status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// RPC status code.
    #[serde(default)]
    pub code: i32,
    /// Error message.
    #[serde(default)]
    pub message: String,
}

/// Operation result payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    /// Present for video generation operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Video generation result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// Generated videos.
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
    /// Number of videos withheld by safety filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rai_media_filtered_count: Option<u32>,
    /// Why videos were withheld.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rai_media_filtered_reasons: Vec<String>,
}

/// One generated video.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSample {
    /// Video reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoRef>,
}

/// Downloadable video reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    /// Download URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
