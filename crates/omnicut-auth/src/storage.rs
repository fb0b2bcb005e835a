//! `~/.omnicut/auth.json`: the stored Gemini API key.
//!
//! The file is small and versioned:
//!
//! ```json
//! { "version": 1, "apiKey": "AIza...", "lastUpdated": "2026-10-18T09:00:00+00:00" }
//! ```
//!
//! It is written with owner-only permissions (0o600). A missing file simply
//! means no stored key; a file that exists but cannot be used is an error, so
//! a damaged key file is reported instead of silently ignored.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::AuthError;
use crate::types::{AUTH_STORAGE_VERSION, ApiKey, AuthStorage};

const AUTH_FILE_NAME: &str = "auth.json";

/// Auth file inside an Omnicut data directory.
pub fn auth_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(AUTH_FILE_NAME)
}

/// Default auth file path (`~/.omnicut/auth.json`).
pub fn default_auth_file_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    auth_file_path(&PathBuf::from(home).join(".omnicut"))
}

fn unusable(path: &Path, reason: impl Into<String>) -> AuthError {
    AuthError::UnusableFile {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Read `auth.json`. `Ok(None)` when the file does not exist.
pub fn load_auth_storage(path: &Path) -> Result<Option<AuthStorage>, AuthError> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(unusable(path, e.to_string())),
    };
    let storage: AuthStorage =
        serde_json::from_str(&data).map_err(|e| unusable(path, format!("invalid JSON: {e}")))?;
    if storage.version != AUTH_STORAGE_VERSION {
        return Err(unusable(
            path,
            format!("schema version {} is not supported", storage.version),
        ));
    }
    Ok(Some(storage))
}

/// Write `auth.json`, stamping `lastUpdated` and restricting permissions.
pub fn save_auth_storage(path: &Path, storage: &mut AuthStorage) -> Result<(), AuthError> {
    storage.last_updated = chrono::Utc::now().to_rfc3339();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(storage)?)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    debug!(path = %path.display(), "auth file written");
    Ok(())
}

/// Validate and store an API key.
///
/// An unusable existing file is replaced rather than preserved, so
/// `omnicut auth set-key` always repairs it.
pub fn save_api_key(path: &Path, api_key: &str) -> Result<(), AuthError> {
    let key = ApiKey::new(api_key)?;
    let mut storage = match load_auth_storage(path) {
        Ok(existing) => existing.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "replacing unusable auth file");
            AuthStorage::default()
        }
    };
    storage.api_key = Some(key.expose().to_string());
    save_auth_storage(path, &mut storage)
}

/// Remove the stored API key. Returns whether one was present.
pub fn clear_api_key(path: &Path) -> Result<bool, AuthError> {
    let Some(mut storage) = load_auth_storage(path)? else {
        return Ok(false);
    };
    if storage.api_key.take().is_none() {
        return Ok(false);
    }
    save_auth_storage(path, &mut storage)?;
    Ok(true)
}

/// The stored API key, validated. `Ok(None)` when no key is stored.
pub fn get_api_key(path: &Path) -> Result<Option<ApiKey>, AuthError> {
    let Some(raw) = load_auth_storage(path)?.and_then(|s| s.api_key) else {
        return Ok(None);
    };
    ApiKey::new(raw)
        .map(Some)
        .map_err(|e| unusable(path, format!("stored apiKey is invalid: {e}")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn auth_json(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("auth.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    // ── load ────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_no_storage() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_auth_storage(&dir.path().join("auth.json")).unwrap().is_none());
        assert!(get_api_key(&dir.path().join("auth.json")).unwrap().is_none());
    }

    #[test]
    fn reads_camel_case_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(
            &dir,
            r#"{"version": 1, "apiKey": "AIzaSyStored", "lastUpdated": "2026-10-01T08:00:00+00:00"}"#,
        );
        let storage = load_auth_storage(&path).unwrap().unwrap();
        assert_eq!(storage.api_key.as_deref(), Some("AIzaSyStored"));
        assert_eq!(get_api_key(&path).unwrap().unwrap().expose(), "AIzaSyStored");
    }

    #[test]
    fn file_without_api_key_has_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(&dir, r#"{"version": 1}"#);
        assert!(get_api_key(&path).unwrap().is_none());
    }

    #[test]
    fn corrupt_json_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(&dir, r#"{"version": 1, "apiKey": "#);
        assert_matches!(
            load_auth_storage(&path),
            Err(AuthError::UnusableFile { reason, .. }) if reason.starts_with("invalid JSON")
        );
    }

    #[test]
    fn future_version_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(&dir, r#"{"version": 2, "apiKey": "AIzaSyNext"}"#);
        assert_matches!(
            get_api_key(&path),
            Err(AuthError::UnusableFile { reason, .. }) if reason.contains("version 2")
        );
    }

    #[test]
    fn blank_stored_key_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(&dir, r#"{"version": 1, "apiKey": "   "}"#);
        assert_matches!(
            get_api_key(&path),
            Err(AuthError::UnusableFile { reason, .. }) if reason.contains("apiKey")
        );
    }

    // ── save ────────────────────────────────────────────────────────

    #[test]
    fn save_writes_api_key_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("auth.json");
        save_api_key(&path, "  AIzaSyNew ").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["apiKey"], "AIzaSyNew");
        assert!(raw["lastUpdated"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn save_rejects_blank_key_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        assert_matches!(save_api_key(&path, "   "), Err(AuthError::InvalidKey(_)));
        assert!(!path.exists());
    }

    #[test]
    fn save_repairs_unusable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(&dir, "garbage");
        save_api_key(&path, "AIzaSyFixed").unwrap();
        assert_eq!(get_api_key(&path).unwrap().unwrap().expose(), "AIzaSyFixed");
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        save_api_key(&path, "AIzaSyPrivate").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    // ── clear ───────────────────────────────────────────────────────

    #[test]
    fn clear_reports_whether_a_key_was_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        assert!(!clear_api_key(&path).unwrap());
        save_api_key(&path, "AIzaSyGone").unwrap();
        assert!(clear_api_key(&path).unwrap());
        assert!(get_api_key(&path).unwrap().is_none());
        assert!(!clear_api_key(&path).unwrap());
    }

    #[test]
    fn clear_refuses_unusable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = auth_json(&dir, r#"{"version": 9}"#);
        assert_matches!(clear_api_key(&path), Err(AuthError::UnusableFile { .. }));
    }

    #[test]
    fn default_path_is_under_omnicut_home() {
        assert!(default_auth_file_path().ends_with(".omnicut/auth.json"));
    }
}
