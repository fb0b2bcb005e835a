//! Studio error taxonomy.
//!
//! Every failure a flow can hit lands in one of these variants. Remote
//! failures are classified by status and error text; see
//! [`omnicut_core::classify_failure`].

use omnicut_auth::AuthError;
use omnicut_core::{FailureKind, WavError, format_failure};
use omnicut_gemini::GeminiError;

/// Pipeline stage that produced no usable payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Video job finished without a video.
    Video,
    /// Video download returned no bytes.
    Download,
    /// Audio translation returned no text.
    Translation,
    /// Speech synthesis returned no audio.
    Speech,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video generation"),
            Self::Download => write!(f, "video download"),
            Self::Translation => write!(f, "translation"),
            Self::Speech => write!(f, "speech synthesis"),
        }
    }
}

/// Errors from studio flows.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// Invalid or missing input. Raised before any remote call.
    #[error("invalid input: {0}")]
    Input(String),

    /// Missing or rejected API key.
    #[error("credential error: {0}")]
    Credential(String),

    /// Rate limit or quota exhausted.
    #[error("quota exceeded: {0}")]
    Quota(String),

    /// Output withheld by safety filters.
    #[error("blocked by content policy: {0}")]
    ContentPolicy(String),

    /// Unknown model or endpoint.
    #[error("not found: {0}")]
    NotFound(String),

    /// The call succeeded but carried nothing usable.
    #[error("{stage} returned no result")]
    EmptyResult {
        /// Stage that came back empty.
        stage: Stage,
    },

    /// Packaging synthesized audio failed.
    #[error("audio encoding failed: {0}")]
    Encoding(#[from] WavError),

    /// Any other remote failure.
    #[error("service error: {0}")]
    Service(String),

    /// The video job never reported completion.
    #[error("video job {operation} not done after {attempts} polls")]
    PollTimeout {
        /// Operation name.
        operation: String,
        /// Polls issued.
        attempts: u32,
    },
}

/// Result type for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;

impl StudioError {
    /// Build the variant for a classified remote failure.
    pub fn from_kind(kind: FailureKind, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match kind {
            FailureKind::Credential => Self::Credential(detail),
            FailureKind::Quota => Self::Quota(detail),
            FailureKind::ContentPolicy => Self::ContentPolicy(detail),
            FailureKind::NotFound => Self::NotFound(detail),
            FailureKind::Service => Self::Service(detail),
        }
    }

    /// Remote failure category, if this is a remote failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Credential(_) => Some(FailureKind::Credential),
            Self::Quota(_) => Some(FailureKind::Quota),
            Self::ContentPolicy(_) => Some(FailureKind::ContentPolicy),
            Self::NotFound(_) => Some(FailureKind::NotFound),
            Self::Service(_) => Some(FailureKind::Service),
            Self::Input(_) | Self::EmptyResult { .. } | Self::Encoding(_) | Self::PollTimeout { .. } => {
                None
            }
        }
    }

    /// Readable message with a suggestion, for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Credential(d)
            | Self::Quota(d)
            | Self::ContentPolicy(d)
            | Self::NotFound(d)
            | Self::Service(d) => {
                let kind = self.failure_kind().unwrap_or(FailureKind::Service);
                format_failure(kind, d)
            }
            Self::Input(d) => format!("Invalid input: {d}"),
            Self::EmptyResult { stage } => {
                format!("The {stage} step returned no usable result. Try again or adjust the input")
            }
            Self::Encoding(e) => format!("Could not package the synthesized audio: {e}"),
            Self::PollTimeout { attempts, .. } => format!(
                "The video was not ready after {attempts} status checks. Try again later"
            ),
        }
    }
}

impl From<GeminiError> for StudioError {
    fn from(err: GeminiError) -> Self {
        let kind = err.failure_kind();
        let detail = match &err {
            GeminiError::Api { message, .. } | GeminiError::Operation { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        };
        Self::from_kind(kind, detail)
    }
}

impl From<AuthError> for StudioError {
    fn from(err: AuthError) -> Self {
        Self::Credential(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
