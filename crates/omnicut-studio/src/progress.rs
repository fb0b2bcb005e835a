//! Flow progress reporting.

/// A status update from a running flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Encoding the reference image.
    PreparingImage,
    /// Submitting the video job.
    Submitting,
    /// Waiting on the video job; `attempt` counts status checks from 1.
    Rendering {
        /// Status check number.
        attempt: u32,
        /// Cap on status checks, if any.
        max_attempts: Option<u32>,
    },
    /// Fetching the finished video.
    Downloading,
    /// Video ready.
    VideoReady,
    /// Encoding the uploaded file.
    PreparingUpload,
    /// Translating the uploaded audio.
    Translating,
    /// Synthesizing English speech.
    Synthesizing,
    /// Packaging the synthesized audio.
    Encoding,
    /// Dub ready.
    DubReady,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreparingImage => write!(f, "Processing reference image..."),
            Self::Submitting => write!(f, "Starting the video model..."),
            Self::Rendering {
                attempt,
                max_attempts: Some(max),
            } => write!(f, "Rendering video (check {attempt}/{max})..."),
            Self::Rendering { attempt, .. } => write!(f, "Rendering video (check {attempt})..."),
            Self::Downloading => write!(f, "Downloading video..."),
            Self::VideoReady => write!(f, "Video created successfully!"),
            Self::PreparingUpload => write!(f, "Processing file..."),
            Self::Translating => write!(f, "Translating speech and lyrics into English..."),
            Self::Synthesizing => write!(f, "Creating English dub..."),
            Self::Encoding => write!(f, "Packaging audio..."),
            Self::DubReady => write!(f, "Translation complete!"),
        }
    }
}

/// Receives [`Progress`] updates.
pub trait ProgressSink: Send + Sync {
    /// Handle one update.
    fn report(&self, progress: Progress);
}

/// Logs updates at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, progress: Progress) {
        tracing::info!(status = %progress, "progress");
    }
}

impl<F> ProgressSink for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn report(&self, progress: Progress) {
        self(progress);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
