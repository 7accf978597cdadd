//! Configuration management

use crate::error::{JournalError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the per-journal metadata directory
pub const JOURNAL_DIR: &str = ".babyjournal";

/// Environment variable that overrides the configured backend
pub const BACKEND_ENV: &str = "BABYJOURNAL_BACKEND";

/// Which storage backend a journal uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// JSON documents on this machine
    #[default]
    Local,
    /// Spreadsheet workbook plus photo folder
    Sheet,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "sheet" | "cloud" => Ok(BackendKind::Sheet),
            _ => Err(format!(
                "Invalid backend: '{}'. Valid backends are: local, sheet",
                s
            )),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => f.write_str("local"),
            BackendKind::Sheet => f.write_str("sheet"),
        }
    }
}

/// Credentials for the sheet backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSettings {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub account: String,
}

impl SheetSettings {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendKind,
    pub owner: String,
    #[serde(default)]
    pub sheet: SheetSettings,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(backend: BackendKind) -> Self {
        Config {
            backend,
            owner: Self::detect_owner(),
            sheet: SheetSettings::default(),
            created: Utc::now(),
        }
    }

    /// Load config from .babyjournal/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(JOURNAL_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                JournalError::NotJournalDirectory(path.to_path_buf())
            } else {
                JournalError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .babyjournal/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let journal_dir = path.join(JOURNAL_DIR);
        let config_path = journal_dir.join("config.toml");

        if !journal_dir.exists() {
            fs::create_dir(&journal_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Backend to use for this process, honouring BABYJOURNAL_BACKEND
    pub fn effective_backend(&self) -> Result<BackendKind> {
        match std::env::var(BACKEND_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                BackendKind::from_str(&value).map_err(JournalError::Config)
            }
            _ => Ok(self.backend),
        }
    }

    /// Detect a display name for the local identity
    fn detect_owner() -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "parent".to_string())
    }
}
