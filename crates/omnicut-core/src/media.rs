//! Binary media crossing the system boundary.
//!
//! [`SourceMedia`] is an uploaded input (audio/video to dub, reference image
//! for a video prompt). [`MediaArtifact`] is a produced resource handed back to
//! the caller for playback or download. Both own their bytes; dropping them
//! releases the buffer.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

/// MIME type assumed for uploaded audio/video when none can be inferred.
pub const FALLBACK_AUDIO_MIME: &str = "audio/mp3";
/// MIME type assumed for reference images when none can be inferred.
pub const FALLBACK_IMAGE_MIME: &str = "image/png";
/// MIME type of encoded WAV artifacts.
pub const WAV_MIME: &str = "audio/wav";
/// MIME type of generated videos.
pub const MP4_MIME: &str = "video/mp4";

/// Encode bytes as standard (padded) base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64, tolerating surrounding whitespace.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data.trim())
}

/// Guess a MIME type from a file extension.
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp3" => "audio/mp3",
        "wav" | "wave" => "audio/wav",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mpeg" | "mpg" => "video/mpeg",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => return None,
    };
    Some(mime)
}

/// An input file supplied by the user.
#[derive(Clone, Debug)]
pub struct SourceMedia {
    /// Raw file contents.
    pub bytes: Bytes,
    /// MIME type sent to the remote service.
    pub mime_type: String,
    /// Original file name, for display.
    pub file_name: String,
}

impl SourceMedia {
    /// Wrap in-memory bytes.
    pub fn new(
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension.
    pub fn read(path: &Path, fallback_mime: &str) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime_type = mime_from_extension(path).unwrap_or(fallback_mime);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::debug!(
            path = %path.display(),
            mime_type,
            len = bytes.len(),
            "read source media"
        );
        Ok(Self::new(bytes, mime_type, file_name))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Contents as base64, the form the remote API expects for inline data.
    pub fn to_base64(&self) -> String {
        encode_base64(&self.bytes)
    }

    /// Whether the file is a video (as opposed to audio or image).
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

/// A produced resource: generated video or dubbed audio.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaArtifact {
    bytes: Bytes,
    mime_type: String,
    file_name: String,
}

impl MediaArtifact {
    /// Wrap produced bytes.
    pub fn new(
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Suggested download file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the artifact, returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// `data:` URL suitable for embedding in HTML.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, encode_base64(&self.bytes))
    }

    /// Write the artifact to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.bytes)?;
        tracing::info!(path = %path.display(), len = self.bytes.len(), mime_type = %self.mime_type, "artifact written");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
