//! Storage capability shared by every backend

use crate::domain::{BabyProfile, EntryPatch, JournalEntry, RawPhoto};
use crate::error::{JournalError, Result};
use crate::infrastructure::config::BackendKind;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Who the store is acting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Locations created by [`JournalStore::provision_storage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageHandles {
    pub folder_id: String,
    pub spreadsheet_id: String,
}

/// Persistence for the profile, entries and tag list.
///
/// Every mutation is a full read-modify-write of the stored data. There is no
/// locking between processes: the last writer wins.
pub trait JournalStore {
    /// Which backend this is
    fn backend(&self) -> BackendKind;

    /// Check the backend is reachable and configured
    fn initialize(&mut self) -> Result<()>;

    /// Sign in and return the acting identity
    fn authenticate(&mut self) -> Result<Identity>;

    /// Find or create the storage locations used by the other operations
    fn provision_storage(&mut self) -> Result<StorageHandles>;

    fn get_profile(&self) -> Result<Option<BabyProfile>>;

    fn save_profile(&mut self, profile: &BabyProfile) -> Result<()>;

    /// All entries, most recently created first
    fn get_entries(&self) -> Result<Vec<JournalEntry>>;

    /// Create or update an entry, storing `photos` and freezing its age
    /// against `birth_date`
    fn save_entry(
        &mut self,
        patch: EntryPatch,
        birth_date: NaiveDate,
        photos: Vec<RawPhoto>,
    ) -> Result<JournalEntry>;

    /// Remove an entry. Unknown ids are ignored.
    fn delete_entry(&mut self, id: &str) -> Result<()>;

    /// Known tag labels, falling back to the default set
    fn get_tags(&self) -> Result<Vec<String>>;

    fn save_tags(&mut self, tags: &[String]) -> Result<()>;
}

/// Read a JSON document, returning `None` when the file does not exist
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let value = serde_json::from_str(&contents).map_err(|e| {
        JournalError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    Ok(Some(value))
}

/// Write a JSON document using a best-effort atomic replace:
/// write to a temp file in the same directory, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(value)?;

    let tmp_name = format!(
        "{}.tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("data.json"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
