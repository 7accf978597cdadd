//! Error types for babyjournal

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for babyjournal
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Not a babyjournal directory: {0}")]
    NotJournalDirectory(PathBuf),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Provisioning error: {0}")]
    Provision(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No baby profile has been set up")]
    ProfileMissing,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl JournalError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JournalError::Connection(_) => 2,
            JournalError::Auth(_) => 3,
            JournalError::NotJournalDirectory(_) => 4,
            JournalError::InvalidDate(_) => 5,
            JournalError::EntryNotFound(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JournalError::NotJournalDirectory(path) => {
                format!(
                    "Not a babyjournal directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'babyjournal init' in this directory to create a new journal\n\
                    • Navigate to an existing journal directory\n\
                    • Set BABYJOURNAL_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            JournalError::Connection(msg) => {
                format!(
                    "Connection error: {}\n\n\
                    Suggestions:\n\
                    • Check the configured backend: babyjournal config backend\n\
                    • For the sheet backend set sheet.client_id and sheet.api_key\n\
                    • Retry once the storage location is reachable",
                    msg
                )
            }
            JournalError::Auth(msg) => {
                format!(
                    "Authentication failed: {}\n\n\
                    Suggestions:\n\
                    • Set the account to sign in with: babyjournal config sheet.account you@example.com\n\
                    • Try again",
                    msg
                )
            }
            JournalError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2024-05-17)\n\
                    • Timestamps: 2024-05-17T08:30:00Z",
                    input
                )
            }
            JournalError::ProfileMissing => "No baby profile has been set up\n\n\
                Suggestions:\n\
                • Create one first: babyjournal profile --name Mali --birth-date 2023-04-01"
                .to_string(),
            JournalError::EntryNotFound(id) => {
                format!(
                    "Entry not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'babyjournal list' to see entry ids",
                    id
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JournalError
pub type Result<T> = std::result::Result<T, JournalError>;
