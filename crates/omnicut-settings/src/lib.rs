//! # omnicut-settings
//!
//! Layered configuration for Omnicut.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`OmnicutSettings::default()`]
//! 2. **User file**: `~/.omnicut/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `OMNICUT_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_overrides, deep_merge, load_settings, load_settings_from_path, omnicut_home,
    settings_path,
};
pub use types::*;
