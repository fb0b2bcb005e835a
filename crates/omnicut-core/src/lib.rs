//! # omnicut-core
//!
//! Shared building blocks for Omnicut:
//!
//! - **WAV encoding**: [`wav::encode`] wraps raw 16-bit PCM in a RIFF/WAVE container
//! - **Media**: [`SourceMedia`] inputs and [`MediaArtifact`] outputs, base64 and MIME helpers
//! - **Failure classification**: [`classify_failure`] maps remote errors onto [`FailureKind`]
//! - **Logging**: [`logging::init_subscriber`]

#![deny(unsafe_code)]

pub mod errors;
pub mod logging;
pub mod media;
pub mod wav;

pub use errors::{FailureKind, classify_failure, format_failure};
pub use media::{MediaArtifact, SourceMedia};
pub use wav::{PcmFormat, WavError, WavHeader, encode};
