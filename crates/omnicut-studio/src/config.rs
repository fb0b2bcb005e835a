//! Studio configuration.

use std::time::Duration;

use omnicut_core::PcmFormat;
use omnicut_settings::{
    DEFAULT_TRANSLATION_INSTRUCTION, FeatureSettings, ModelSettings, OmnicutSettings,
};

/// How to wait for a video job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before each status check.
    pub interval: Duration,
    /// Maximum status checks. `None` waits indefinitely.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: Some(120),
        }
    }
}

/// Optional parts of a video request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudioFeatures {
    /// Accept a reference image.
    pub reference_image: bool,
    /// Honor the requested resolution and aspect ratio.
    pub format_choice: bool,
    /// Prefix the prompt with the style preset.
    pub style_presets: bool,
}

impl StudioFeatures {
    /// Everything enabled.
    pub const FULL: Self = Self {
        reference_image: true,
        format_choice: true,
        style_presets: true,
    };

    /// Bare prompt, fixed 720p 16:9, no image.
    pub const BASIC: Self = Self {
        reference_image: false,
        format_choice: false,
        style_presets: false,
    };
}

impl Default for StudioFeatures {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<FeatureSettings> for StudioFeatures {
    fn from(f: FeatureSettings) -> Self {
        Self {
            reference_image: f.reference_image,
            format_choice: f.format_choice,
            style_presets: f.style_presets,
        }
    }
}

/// Everything a [`Studio`](crate::Studio) needs besides its backend and credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudioConfig {
    /// Video generation model.
    pub video_model: String,
    /// Audio translation model.
    pub translation_model: String,
    /// Speech synthesis model.
    pub speech_model: String,
    /// Instruction sent with uploaded audio.
    pub instruction: String,
    /// Prebuilt synthesis voice.
    pub voice: String,
    /// Format of the PCM returned by the speech model.
    pub pcm: PcmFormat,
    /// Video job polling.
    pub poll: PollPolicy,
    /// Largest accepted upload in bytes. `None` means unlimited.
    pub max_upload_bytes: Option<u64>,
    /// Optional video request features.
    pub features: StudioFeatures,
}

impl Default for StudioConfig {
    fn default() -> Self {
        let models = ModelSettings::default();
        Self {
            video_model: models.video,
            translation_model: models.translation,
            speech_model: models.speech,
            instruction: DEFAULT_TRANSLATION_INSTRUCTION.to_string(),
            voice: "Kore".to_string(),
            pcm: PcmFormat::SPEECH,
            poll: PollPolicy::default(),
            max_upload_bytes: None,
            features: StudioFeatures::FULL,
        }
    }
}

impl From<&OmnicutSettings> for StudioConfig {
    fn from(s: &OmnicutSettings) -> Self {
        Self {
            video_model: s.models.video.clone(),
            translation_model: s.models.translation.clone(),
            speech_model: s.models.speech.clone(),
            instruction: s.dub.instruction.clone(),
            voice: s.dub.voice.clone(),
            pcm: PcmFormat {
                sample_rate: s.dub.sample_rate,
                channel_count: s.dub.channel_count,
            },
            poll: PollPolicy {
                interval: Duration::from_millis(s.video.poll_interval_ms),
                max_attempts: s.video.max_poll_attempts,
            },
            max_upload_bytes: s.api.max_upload_bytes,
            features: s.video.features.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_default_settings() {
        let from_settings = StudioConfig::from(&OmnicutSettings::default());
        assert_eq!(from_settings, StudioConfig::default());
    }

    #[test]
    fn defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.voice, "Kore");
        assert_eq!(config.pcm, PcmFormat::SPEECH);
        assert_eq!(config.poll.interval, Duration::from_secs(5));
        assert_eq!(config.poll.max_attempts, Some(120));
        assert_eq!(config.max_upload_bytes, None);
        assert_eq!(config.features, StudioFeatures::FULL);
    }

    #[test]
    fn from_settings_copies_overrides() {
        let mut s = OmnicutSettings::default();
        s.video.poll_interval_ms = 1500;
        s.video.max_poll_attempts = None;
        s.video.features.reference_image = false;
        s.dub.sample_rate = 16_000;
        s.dub.channel_count = 2;
        s.api.max_upload_bytes = Some(10);

        let config = StudioConfig::from(&s);
        assert_eq!(config.poll.interval, Duration::from_millis(1500));
        assert_eq!(config.poll.max_attempts, None);
        assert!(!config.features.reference_image);
        assert!(config.features.format_choice);
        assert_eq!(config.pcm.sample_rate, 16_000);
        assert_eq!(config.pcm.channel_count, 2);
        assert_eq!(config.max_upload_bytes, Some(10));
    }

    #[test]
    fn basic_features() {
        let f = StudioFeatures::BASIC;
        assert!(!f.reference_image && !f.format_choice && !f.style_presets);
    }
}
