//! Video and dubbing pipeline settings.

use serde::{Deserialize, Serialize};

/// Instruction sent alongside uploaded audio to obtain an English translation.
pub const DEFAULT_TRANSLATION_INSTRUCTION: &str = "Listen to this audio carefully. Translate any spoken words or lyrics directly into English. Do NOT add any introductory text. Just output the English translation.";

/// Video generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSettings {
    /// Delay between job status polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Give up after this many polls. `None` polls until the job finishes.
    pub max_poll_attempts: Option<u32>,
    /// Optional request features.
    pub features: FeatureSettings,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5_000,
            max_poll_attempts: Some(120),
            features: FeatureSettings::default(),
        }
    }
}

/// Toggles for the optional parts of a video request.
///
/// With everything disabled a request is a bare prompt rendered at 720p 16:9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureSettings {
    /// Accept a reference image.
    pub reference_image: bool,
    /// Allow choosing resolution and aspect ratio.
    pub format_choice: bool,
    /// Prefix prompts with a style preset.
    pub style_presets: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            reference_image: true,
            format_choice: true,
            style_presets: true,
        }
    }
}

/// Translate-and-dub settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DubSettings {
    /// Instruction sent with the uploaded audio.
    pub instruction: String,
    /// Prebuilt voice for speech synthesis.
    pub voice: String,
    /// Sample rate of the synthesized PCM.
    pub sample_rate: u32,
    /// Channel count of the synthesized PCM.
    pub channel_count: u16,
}

impl Default for DubSettings {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_TRANSLATION_INSTRUCTION.to_string(),
            voice: "Kore".to_string(),
            sample_rate: 24_000,
            channel_count: 1,
        }
    }
}
