//! Video request options.

use std::str::FromStr;

use omnicut_core::SourceMedia;
use serde::{Deserialize, Serialize};

/// A value did not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Output resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// 1280x720.
    #[default]
    #[serde(rename = "720p")]
    Hd720,
    /// 1920x1080.
    #[serde(rename = "1080p")]
    Hd1080,
}

impl Resolution {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hd720 => "720p",
            Self::Hd1080 => "1080p",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "720p" | "720" => Ok(Self::Hd720),
            "1080p" | "1080" => Ok(Self::Hd1080),
            _ => Err(ParseOptionError::new("resolution", s, &["720p", "1080p"])),
        }
    }
}

/// Frame shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Landscape.
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// Portrait.
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "16:9" | "landscape" => Ok(Self::Landscape),
            "9:16" | "portrait" => Ok(Self::Portrait),
            _ => Err(ParseOptionError::new("aspect ratio", s, &["16:9", "9:16"])),
        }
    }
}

/// Style preset prepended to the prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoStyle {
    /// Dramatic movie look.
    #[default]
    Cinematic,
    /// 2D Japanese animation.
    Anime,
    /// Neon sci-fi.
    Cyberpunk,
    /// Retro film grain.
    Vintage,
    /// Stylized 3D animation.
    #[serde(rename = "3d-render")]
    Render3d,
    /// Photorealistic documentary.
    Realistic,
}

impl VideoStyle {
    /// All presets, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Cinematic,
        Self::Anime,
        Self::Cyberpunk,
        Self::Vintage,
        Self::Render3d,
        Self::Realistic,
    ];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cinematic => "Cinematic",
            Self::Anime => "Anime",
            Self::Cyberpunk => "Cyberpunk",
            Self::Vintage => "Vintage",
            Self::Render3d => "3D Render",
            Self::Realistic => "Realistic",
        }
    }

    /// Text prepended to the prompt.
    pub fn description(self) -> &'static str {
        match self {
            Self::Cinematic => "Cinematic, high quality, dramatic lighting, movie scene",
            Self::Anime => "Anime style, japanese animation, 2D, vibrant colors",
            Self::Cyberpunk => "Cyberpunk, neon lights, futuristic, high contrast, sci-fi",
            Self::Vintage => "Vintage film, grain, retro look, 90s style, VHS effect",
            Self::Render3d => "3D render, Pixar style, cute, smooth, unreal engine 5",
            Self::Realistic => "Photorealistic, 8k, highly detailed, nature documentary style",
        }
    }

    /// `"{description}. {prompt}"`.
    pub fn apply(self, prompt: &str) -> String {
        format!("{}. {prompt}", self.description())
    }
}

impl std::fmt::Display for VideoStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VideoStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match norm.as_str() {
            "cinematic" => Ok(Self::Cinematic),
            "anime" => Ok(Self::Anime),
            "cyberpunk" => Ok(Self::Cyberpunk),
            "vintage" => Ok(Self::Vintage),
            "3drender" | "3d" | "render3d" | "render" => Ok(Self::Render3d),
            "realistic" => Ok(Self::Realistic),
            _ => Err(ParseOptionError::new(
                "style",
                s,
                &Self::ALL.map(VideoStyle::label),
            )),
        }
    }
}

/// Input to [`Studio::generate_video`](crate::Studio::generate_video).
#[derive(Clone, Debug, Default)]
pub struct VideoRequest {
    /// What to show.
    pub prompt: String,
    /// Optional starting frame.
    pub image: Option<SourceMedia>,
    /// Output resolution.
    pub resolution: Resolution,
    /// Frame shape.
    pub aspect_ratio: AspectRatio,
    /// Style preset.
    pub style: VideoStyle,
}

impl VideoRequest {
    /// Request with default options.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Attach a reference image.
    #[must_use]
    pub fn with_image(mut self, image: SourceMedia) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the style preset.
    #[must_use]
    pub fn with_style(mut self, style: VideoStyle) -> Self {
        self.style = style;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
