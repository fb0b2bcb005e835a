//! # omnicut-studio
//!
//! Orchestrates the two remote pipelines:
//!
//! - [`Studio::generate_video`]: prompt (plus optional reference image) to MP4
//! - [`Studio::translate_and_dub`]: uploaded audio/video to an English WAV dub
//!
//! Remote calls go through [`GenerativeBackend`]; failures surface as
//! [`StudioError`] with a user-facing message.

#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod dub;
pub mod errors;
pub mod progress;
pub mod request;
pub mod studio;
pub mod video;

#[cfg(test)]
mod testing;

pub use backend::GenerativeBackend;
pub use config::{PollPolicy, StudioConfig, StudioFeatures};
pub use dub::{DUB_FILE_NAME, DubResult};
pub use errors::{Result, Stage, StudioError};
pub use progress::{LogProgress, Progress, ProgressSink};
pub use request::{AspectRatio, ParseOptionError, Resolution, VideoRequest, VideoStyle};
pub use studio::Studio;
pub use video::VIDEO_FILE_NAME;
