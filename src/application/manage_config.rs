//! Config management use case

use crate::error::{JournalError, Result};
use crate::infrastructure::{BackendKind, Config, FileSystemRepository, JournalRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "backend, owner, sheet.client_id, sheet.api_key, sheet.account";

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "backend" => Ok(config.backend.to_string()),
            "owner" => Ok(config.owner),
            "sheet.client_id" => Ok(config.sheet.client_id),
            "sheet.api_key" => Ok(config.sheet.api_key),
            "sheet.account" => Ok(config.sheet.account),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "backend" => {
                config.backend = BackendKind::from_str(value).map_err(JournalError::Config)?;
            }
            "owner" => config.owner = value.to_string(),
            "sheet.client_id" => config.sheet.client_id = value.to_string(),
            "sheet.api_key" => config.sheet.api_key = value.to_string(),
            "sheet.account" => config.sheet.account = value.to_string(),
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        tracing::info!("Config {} updated", key);
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> JournalError {
    JournalError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}
