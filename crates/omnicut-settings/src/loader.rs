//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`OmnicutSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over the defaults
//! 3. Apply `OMNICUT_*` environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::OmnicutSettings;

/// Directory holding Omnicut's user files (`~/.omnicut`).
pub fn omnicut_home() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".omnicut")
}

/// Resolve the path to the settings file (`~/.omnicut/settings.json`).
pub fn settings_path() -> PathBuf {
    omnicut_home().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<OmnicutSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON or invalid values are errors.
pub fn load_settings_from_path(path: &Path) -> Result<OmnicutSettings> {
    load_settings_with(path, &|name| std::env::var(name).ok())
}

/// Load settings from `path`, reading overrides through `lookup`.
pub fn load_settings_with(
    path: &Path,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<OmnicutSettings> {
    let parse_err = |source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let defaults = serde_json::to_value(OmnicutSettings::default()).map_err(parse_err)?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let user: Value = serde_json::from_str(&content).map_err(parse_err)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: OmnicutSettings = serde_json::from_value(merged).map_err(parse_err)?;
    apply_overrides(&mut settings, lookup);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides read through `lookup`.
///
/// Integers must parse and fall within range; booleans accept
/// `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`. Invalid values are
/// logged and ignored.
pub fn apply_overrides(settings: &mut OmnicutSettings, lookup: &dyn Fn(&str) -> Option<String>) {
    let env = EnvReader { lookup };

    // ── API ─────────────────────────────────────────────────────────
    if let Some(v) = env.string("OMNICUT_API_BASE_URL") {
        settings.api.base_url = v.trim_end_matches('/').to_string();
    }
    if let Some(v) = env.u64("OMNICUT_REQUEST_TIMEOUT_MS", 1_000, 3_600_000) {
        settings.api.request_timeout_ms = v;
    }
    if let Some(v) = env.u64("OMNICUT_MAX_UPLOAD_BYTES", 1, u64::MAX) {
        settings.api.max_upload_bytes = Some(v);
    }

    // ── Models ──────────────────────────────────────────────────────
    if let Some(v) = env.string("OMNICUT_VIDEO_MODEL") {
        settings.models.video = v;
    }
    if let Some(v) = env.string("OMNICUT_TRANSLATION_MODEL") {
        settings.models.translation = v;
    }
    if let Some(v) = env.string("OMNICUT_SPEECH_MODEL") {
        settings.models.speech = v;
    }

    // ── Video ───────────────────────────────────────────────────────
    if let Some(v) = env.u64("OMNICUT_POLL_INTERVAL_MS", 100, 600_000) {
        settings.video.poll_interval_ms = v;
    }
    if let Some(v) = env.u32("OMNICUT_MAX_POLL_ATTEMPTS", 1, 100_000) {
        settings.video.max_poll_attempts = Some(v);
    }
    if let Some(v) = env.bool("OMNICUT_FEATURE_REFERENCE_IMAGE") {
        settings.video.features.reference_image = v;
    }
    if let Some(v) = env.bool("OMNICUT_FEATURE_FORMAT_CHOICE") {
        settings.video.features.format_choice = v;
    }
    if let Some(v) = env.bool("OMNICUT_FEATURE_STYLE_PRESETS") {
        settings.video.features.style_presets = v;
    }

    // ── Dub ─────────────────────────────────────────────────────────
    if let Some(v) = env.string("OMNICUT_VOICE") {
        settings.dub.voice = v;
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = env.string("OMNICUT_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvReader<'_> {
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn bool(&self, name: &str) -> Option<bool> {
        let val = (self.lookup)(name)?;
        let result = parse_bool(&val);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
        }
        result
    }

    fn u32(&self, name: &str, min: u32, max: u32) -> Option<u32> {
        let val = (self.lookup)(name)?;
        let result = parse_u32_range(&val, min, max);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid u32 env var, ignoring");
        }
        result
    }

    fn u64(&self, name: &str, min: u64, max: u64) -> Option<u64> {
        let val = (self.lookup)(name)?;
        let result = parse_u64_range(&val, min, max);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
        }
        result
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
