//! # omnicut-gemini
//!
//! REST client for the Gemini Generative Language API:
//!
//! - `generateContent` for audio understanding and speech synthesis
//! - `predictLongRunning` plus operation polling for video generation
//! - authenticated file download

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod types;

pub use client::{DEFAULT_BASE_URL, GeminiClient, GeminiConfig};
pub use errors::{GeminiError, parse_api_error};
pub use types::*;
