//! Local JSON backend
//!
//! Keeps one JSON document per key under `.babyjournal/local/`. Photos are not
//! copied; each photo points at the file it was added from.

use crate::domain::entry::generate_id;
use crate::domain::tags::{default_tags, normalize_tags};
use crate::domain::{BabyProfile, EntryPatch, JournalEntry, Photo, RawPhoto};
use crate::error::{JournalError, Result};
use crate::infrastructure::config::{BackendKind, JOURNAL_DIR};
use crate::infrastructure::store::{read_json, write_json, Identity, JournalStore, StorageHandles};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

const ENTRIES_KEY: &str = "bpj_entries";
const PROFILE_KEY: &str = "bpj_profile";
const TAGS_KEY: &str = "bpj_tags";

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
    owner: String,
}

impl LocalStore {
    /// Create a store for the journal at `root`
    pub fn new(root: &Path, owner: impl Into<String>) -> Self {
        LocalStore {
            dir: root.join(JOURNAL_DIR).join("local"),
            owner: owner.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn write_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        write_json(&self.key_path(ENTRIES_KEY), entries)
    }

    fn attach_photo(raw: &RawPhoto) -> Result<Photo> {
        let url = fs::canonicalize(&raw.source).map_err(|e| {
            JournalError::Validation(format!(
                "Cannot read photo {}: {}",
                raw.source.display(),
                e
            ))
        })?;

        Ok(Photo {
            id: format!("local-{}", generate_id()),
            url: url.to_string_lossy().to_string(),
            mime_type: raw.mime_type.clone(),
        })
    }
}

impl JournalStore for LocalStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Local
    }

    fn initialize(&mut self) -> Result<()> {
        tracing::debug!("Initializing local store at {}", self.dir.display());
        fs::create_dir_all(&self.dir).map_err(|e| {
            JournalError::Connection(format!(
                "Cannot open local storage {}: {}",
                self.dir.display(),
                e
            ))
        })
    }

    fn authenticate(&mut self) -> Result<Identity> {
        Ok(Identity {
            id: format!("local-{}", self.owner),
            name: self.owner.clone(),
            email: None,
        })
    }

    fn provision_storage(&mut self) -> Result<StorageHandles> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| JournalError::Provision(format!("{}: {}", self.dir.display(), e)))?;
        Ok(StorageHandles {
            folder_id: "local".to_string(),
            spreadsheet_id: "local".to_string(),
        })
    }

    fn get_profile(&self) -> Result<Option<BabyProfile>> {
        read_json(&self.key_path(PROFILE_KEY))
    }

    fn save_profile(&mut self, profile: &BabyProfile) -> Result<()> {
        tracing::info!("Saving profile for {}", profile.name);
        write_json(&self.key_path(PROFILE_KEY), profile)
    }

    fn get_entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(read_json(&self.key_path(ENTRIES_KEY))?.unwrap_or_default())
    }

    fn save_entry(
        &mut self,
        patch: EntryPatch,
        birth_date: NaiveDate,
        photos: Vec<RawPhoto>,
    ) -> Result<JournalEntry> {
        let mut entries = self.get_entries()?;

        let existing = match &patch.id {
            Some(id) => Some(
                entries
                    .iter()
                    .position(|e| &e.id == id)
                    .ok_or_else(|| JournalError::EntryNotFound(id.clone()))?,
            ),
            None => None,
        };

        let uploaded = photos
            .iter()
            .map(Self::attach_photo)
            .collect::<Result<Vec<Photo>>>()?;

        let saved = match existing {
            Some(index) => {
                let merged = patch.apply_to(&entries[index], birth_date, uploaded);
                entries[index] = merged.clone();
                tracing::info!("Updated entry {}", merged.id);
                merged
            }
            None => {
                let created = patch.into_new_entry(generate_id(), birth_date, uploaded)?;
                entries.insert(0, created.clone());
                tracing::info!("Created entry {}", created.id);
                created
            }
        };

        self.write_entries(&entries)?;
        Ok(saved)
    }

    fn delete_entry(&mut self, id: &str) -> Result<()> {
        let mut entries = self.get_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            tracing::warn!("Delete requested for unknown entry {}", id);
        } else {
            tracing::info!("Deleted entry {}", id);
        }

        self.write_entries(&entries)
    }

    fn get_tags(&self) -> Result<Vec<String>> {
        let saved: Option<Vec<String>> = read_json(&self.key_path(TAGS_KEY))?;
        Ok(saved.unwrap_or_else(default_tags))
    }

    fn save_tags(&mut self, tags: &[String]) -> Result<()> {
        write_json(&self.key_path(TAGS_KEY), &normalize_tags(tags))
    }
}
