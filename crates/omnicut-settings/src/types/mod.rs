//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and `#[serde(default)]`,
//! so a settings file only needs the fields it changes.

mod api;
mod generation;

pub use api::*;
pub use generation::*;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// ```json
/// {
///   "api": { "maxUploadBytes": 52428800 },
///   "video": { "pollIntervalMs": 10000, "features": { "referenceImage": false } },
///   "dub": { "voice": "Puck" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OmnicutSettings {
    /// Remote API connection.
    pub api: ApiSettings,
    /// Model identifiers.
    pub models: ModelSettings,
    /// Video generation.
    pub video: VideoSettings,
    /// Translate-and-dub.
    pub dub: DubSettings,
    /// Logging.
    pub logging: LoggingSettings,
}

impl OmnicutSettings {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: &str| -> Result<()> {
            Err(SettingsError::invalid(field, reason))
        };

        if self.api.base_url.trim().is_empty() {
            return invalid("api.baseUrl", "must not be empty");
        }
        if self.api.request_timeout_ms == 0 {
            return invalid("api.requestTimeoutMs", "must be positive");
        }
        if self.api.max_upload_bytes == Some(0) {
            return invalid("api.maxUploadBytes", "must be positive when set");
        }
        for (field, model) in [
            ("models.video", &self.models.video),
            ("models.translation", &self.models.translation),
            ("models.speech", &self.models.speech),
        ] {
            if model.trim().is_empty() {
                return invalid(field, "must name a model");
            }
        }
        if self.video.poll_interval_ms == 0 {
            return invalid("video.pollIntervalMs", "must be positive");
        }
        if self.video.max_poll_attempts == Some(0) {
            return invalid("video.maxPollAttempts", "must be positive when set");
        }
        if self.dub.voice.trim().is_empty() {
            return invalid("dub.voice", "must name a prebuilt voice");
        }
        let pcm = omnicut_core::PcmFormat {
            sample_rate: self.dub.sample_rate,
            channel_count: self.dub.channel_count,
        };
        if let Err(e) = pcm.validate() {
            let field = if self.dub.sample_rate == 0 {
                "dub.sampleRate"
            } else {
                "dub.channelCount"
            };
            return Err(SettingsError::invalid(
                field,
                format!(
                    "{} Hz with {} channels cannot be written as WAV ({e})",
                    self.dub.sample_rate, self.dub.channel_count
                ),
            ));
        }
        if omnicut_core::logging::normalize_level(&self.logging.level).is_none() {
            return Err(SettingsError::invalid(
                "logging.level",
                format!(
                    "'{}' is not one of {}",
                    self.logging.level,
                    omnicut_core::logging::LEVELS.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults() {
        let s = OmnicutSettings::default();
        assert_eq!(s.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(s.api.max_upload_bytes, None);
        assert_eq!(s.models.video, "veo-3.1-fast-generate-preview");
        assert_eq!(s.models.speech, "gemini-2.5-flash-preview-tts");
        assert_eq!(s.video.poll_interval_ms, 5_000);
        assert_eq!(s.video.max_poll_attempts, Some(120));
        assert!(s.video.features.reference_image);
        assert!(s.video.features.format_choice);
        assert!(s.video.features.style_presets);
        assert_eq!(s.dub.voice, "Kore");
        assert_eq!(s.dub.sample_rate, 24_000);
        assert_eq!(s.dub.channel_count, 1);
        assert!(s.dub.instruction.starts_with("Listen to this audio carefully."));
        assert_eq!(s.logging.level, "warn");
        s.validate().unwrap();
    }

    #[test]
    fn serializes_camel_case_and_skips_unset_cap() {
        let json = serde_json::to_value(OmnicutSettings::default()).unwrap();
        assert_eq!(json["api"]["requestTimeoutMs"], 300_000);
        assert!(json["api"].get("maxUploadBytes").is_none());
        assert_eq!(json["video"]["features"]["referenceImage"], true);
        assert_eq!(json["dub"]["channelCount"], 1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: OmnicutSettings =
            serde_json::from_str(r#"{"dub": {"voice": "Puck"}}"#).unwrap();
        assert_eq!(s.dub.voice, "Puck");
        assert_eq!(s.dub.sample_rate, 24_000);
        assert_eq!(s.video.poll_interval_ms, 5_000);
    }

    #[test]
    fn validate_rejects_zero_poll_interval() {
        let mut s = OmnicutSettings::default();
        s.video.poll_interval_ms = 0;
        assert_eq!(s.validate().unwrap_err().field(), Some("video.pollIntervalMs"));
    }

    #[test]
    fn validate_rejects_zero_attempt_cap() {
        let mut s = OmnicutSettings::default();
        s.video.max_poll_attempts = Some(0);
        assert!(s.validate().is_err());
        s.video.max_poll_attempts = None;
        s.validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_model() {
        let mut s = OmnicutSettings::default();
        s.models.translation = "  ".to_string();
        assert_matches!(
            s.validate(),
            Err(SettingsError::Invalid { field: "models.translation", .. })
        );
    }

    #[test]
    fn validate_rejects_bad_pcm_format() {
        let mut s = OmnicutSettings::default();
        s.dub.channel_count = 0;
        assert_eq!(s.validate().unwrap_err().field(), Some("dub.channelCount"));
        let mut s = OmnicutSettings::default();
        s.dub.sample_rate = 0;
        assert_eq!(s.validate().unwrap_err().field(), Some("dub.sampleRate"));
    }

    #[test]
    fn validate_rejects_unencodable_pcm_format() {
        let mut s = OmnicutSettings::default();
        s.dub.channel_count = 40_000;
        assert_matches!(
            s.validate(),
            Err(SettingsError::Invalid { field: "dub.channelCount", reason })
                if reason.contains("40000 channels") && reason.contains("block align")
        );

        let mut s = OmnicutSettings::default();
        s.dub.sample_rate = u32::MAX;
        s.dub.channel_count = 2;
        assert_matches!(
            s.validate(),
            Err(SettingsError::Invalid { field: "dub.channelCount", reason }) if reason.contains("byte rate")
        );
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let mut s = OmnicutSettings::default();
        s.logging.level = "loud".to_string();
        assert_matches!(
            s.validate(),
            Err(SettingsError::Invalid { field: "logging.level", reason }) if reason.contains("'loud'")
        );
    }

    #[test]
    fn validate_rejects_zero_upload_cap() {
        let mut s = OmnicutSettings::default();
        s.api.max_upload_bytes = Some(0);
        assert!(s.validate().is_err());
    }
}
