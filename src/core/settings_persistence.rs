//! Viewer settings and their persistence
//!
//! Saves and loads [`ViewerSettings`] to/from a JSON file in the platform
//! configuration directory.
//!
//! # Precedence
//!
//! 1. `settings.json` (defaults if missing or unreadable)
//! 2. environment variables (a `.env` file is honoured by the binary)
//!    - `SCORESHEET_EXTRACTION_URL`
//!    - `SCORESHEET_ENGINE_URL`
//!    - `SCORESHEET_TIMEOUT_SECS`
//! 3. command-line flags, applied by the CLI
//!
//! # Error Handling
//!
//! Load failures fall back to default settings and are logged. Save failures
//! are returned to the caller.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::AppResult;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

pub const ENV_EXTRACTION_URL: &str = "SCORESHEET_EXTRACTION_URL";
pub const ENV_ENGINE_URL: &str = "SCORESHEET_ENGINE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SCORESHEET_TIMEOUT_SECS";

/// User preferences for the viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Endpoint accepting scoresheet image uploads
    pub extraction_url: String,
    /// Endpoint answering `{ fen }` with `{ move }`
    pub engine_url: String,
    /// Per-request timeout for both services
    pub request_timeout_secs: u64,
    /// Unicode piece glyphs instead of letters
    pub unicode_pieces: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            extraction_url: "http://localhost:8001/api/extract".to_string(),
            engine_url: "http://localhost:8001/api/engine/move".to_string(),
            request_timeout_secs: 60,
            unicode_pieces: true,
        }
    }
}

impl ViewerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Self {
        let mut settings = Self::load_from(&settings_path());
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Load from a specific file; defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ViewerSettings>(&contents) {
                Ok(settings) => {
                    info!("[SETTINGS] Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!(
                        "[SETTINGS] Failed to parse settings file at {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to read settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Write to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    /// Apply overrides from an environment lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_EXTRACTION_URL) {
            self.extraction_url = url;
        }
        if let Some(url) = lookup(ENV_ENGINE_URL) {
            self.engine_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(e) => warn!("[SETTINGS] Ignoring {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e),
            }
        }
    }
}

/// Path to `settings.json` in the user's configuration directory
///
/// Falls back to a local `settings.json` if the system config dir cannot be
/// found.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "scoresheet", "ScoresheetViewer") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = ViewerSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(SETTINGS_FILENAME);
        let settings = ViewerSettings {
            extraction_url: "http://ocr.local/extract".to_string(),
            unicode_pieces: false,
            ..ViewerSettings::default()
        };

        settings.save_to(&path).expect("save");

        assert_eq!(ViewerSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(&path, r#"{ "request_timeout_secs": 5 }"#).expect("write");

        let settings = ViewerSettings::load_from(&path);

        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.engine_url, ViewerSettings::default().engine_url);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILENAME);
        fs::write(&path, "{ not json").expect("write");

        assert_eq!(ViewerSettings::load_from(&path), ViewerSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = ViewerSettings::default();
        settings.apply_overrides(|key| match key {
            ENV_ENGINE_URL => Some("http://engine:9000/move".to_string()),
            ENV_TIMEOUT_SECS => Some("not a number".to_string()),
            _ => None,
        });

        assert_eq!(settings.engine_url, "http://engine:9000/move");
        assert_eq!(settings.request_timeout_secs, 60, "bad timeout is ignored");
        assert_eq!(settings.extraction_url, ViewerSettings::default().extraction_url);
    }
}
