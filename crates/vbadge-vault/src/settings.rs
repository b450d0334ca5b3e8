//! File-backed settings store.
//!
//! Mirrors the extension's local storage: a JSON file uses the stored
//! camelCase keys, anything else is read as TOML.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vbadge_core::{BadgeError, ConnectionSettings, Result, SettingsSource};

/// Reads [`ConnectionSettings`] from disk on every [`SettingsSource::load`].
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    }

    fn parse(&self, raw: &str) -> Result<ConnectionSettings> {
        if self.is_json() {
            serde_json::from_str(raw).map_err(|e| BadgeError::Settings(e.to_string()))
        } else {
            toml::from_str(raw).map_err(|e| BadgeError::Settings(e.to_string()))
        }
    }
}

#[async_trait]
impl SettingsSource for FileSettingsStore {
    async fn load(&self) -> Result<Option<ConnectionSettings>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BadgeError::Io(e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        self.parse(&raw).map(Some)
    }
}
