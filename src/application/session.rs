//! Journal session: the loaded state of one journal and its mutations

use crate::domain::tags::{merge_tags, normalize_tag};
use crate::domain::{
    calculate_age, AgeDuration, BabyProfile, EntryCatalog, EntryFilter, EntryPatch, JournalEntry,
    RawPhoto,
};
use crate::error::{JournalError, Result};
use crate::infrastructure::{Identity, JournalStore, StorageHandles};
use chrono::NaiveDate;

/// Everything a caller needs to work with one journal.
///
/// Built once at startup from an already selected store. Mutating methods
/// take `&mut self`, so at most one save or delete is in flight at a time.
pub struct JournalSession {
    store: Box<dyn JournalStore>,
    identity: Identity,
    handles: StorageHandles,
    profile: Option<BabyProfile>,
    entries: Vec<JournalEntry>,
}

impl JournalSession {
    /// Connect, sign in, provision storage and load the journal
    pub fn open(mut store: Box<dyn JournalStore>) -> Result<Self> {
        store.initialize()?;
        let identity = store.authenticate()?;
        let handles = store.provision_storage()?;
        tracing::info!(
            "Signed in as {} ({} backend, workbook {})",
            identity.name,
            store.backend(),
            handles.spreadsheet_id
        );

        let profile = store.get_profile()?;
        let entries = if profile.is_some() {
            store.get_entries()?
        } else {
            Vec::new()
        };

        Ok(JournalSession {
            store,
            identity,
            handles,
            profile,
            entries,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn handles(&self) -> &StorageHandles {
        &self.handles
    }

    pub fn profile(&self) -> Option<&BabyProfile> {
        self.profile.as_ref()
    }

    /// Entries as loaded, most recently created first
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn catalog(&self) -> EntryCatalog<'_> {
        EntryCatalog::new(&self.entries)
    }

    pub fn filter_entries(&self, filter: &EntryFilter) -> Vec<&JournalEntry> {
        self.catalog().filter(filter)
    }

    pub fn find_entry(&self, id: &str) -> Result<&JournalEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| JournalError::EntryNotFound(id.to_string()))
    }

    /// Age of the child on `today`, if a profile exists
    pub fn current_age(&self, today: NaiveDate) -> Option<AgeDuration> {
        self.profile
            .as_ref()
            .map(|profile| calculate_age(profile.birth_date, today))
    }

    /// Store a new or edited profile and reload entries.
    ///
    /// Ages already frozen on existing entries are left as they are.
    pub fn save_profile(&mut self, profile: BabyProfile) -> Result<()> {
        if profile.name.trim().is_empty() {
            return Err(JournalError::Validation(
                "the profile needs a name".to_string(),
            ));
        }

        self.store.save_profile(&profile)?;
        self.profile = Some(profile);
        self.reload_entries()
    }

    /// Create or edit an entry, storing any new photos.
    ///
    /// Tags used by the entry that are not yet known are added to the tag list.
    pub fn save_entry(&mut self, patch: EntryPatch, photos: Vec<RawPhoto>) -> Result<JournalEntry> {
        let birth_date = self
            .profile
            .as_ref()
            .map(|profile| profile.birth_date)
            .ok_or(JournalError::ProfileMissing)?;

        if let Some(date) = patch.date {
            if date < birth_date {
                tracing::warn!(
                    "Entry date {} is before the birth date {}; age will read as zero",
                    date,
                    birth_date
                );
            }
        }

        let saved = self.store.save_entry(patch, birth_date, photos)?;
        self.reload_entries()?;

        // The entry is already stored; a failed tag update must not report it as lost
        if let Err(e) = self.register_tags(&saved.tags) {
            tracing::warn!("Saved entry {} but could not update known tags: {}", saved.id, e);
        }

        Ok(saved)
    }

    fn register_tags(&mut self, tags: &[String]) -> Result<()> {
        let known = self.store.get_tags()?;
        let merged = merge_tags(&known, tags);
        if merged != known {
            self.store.save_tags(&merged)?;
        }
        Ok(())
    }

    /// Delete an entry from storage and from the loaded list
    pub fn delete_entry(&mut self, id: &str) -> Result<()> {
        self.store.delete_entry(id)?;
        self.entries.retain(|e| e.id != id);
        Ok(())
    }

    /// Known tag labels
    pub fn tags(&self) -> Result<Vec<String>> {
        self.store.get_tags()
    }

    /// Add a label to the known tags, returning the updated list
    pub fn add_tag(&mut self, tag: &str) -> Result<Vec<String>> {
        let tag = normalize_tag(tag)
            .ok_or_else(|| JournalError::Validation("tag cannot be empty".to_string()))?;

        let known = self.store.get_tags()?;
        let merged = merge_tags(&known, &[tag]);
        if merged != known {
            self.store.save_tags(&merged)?;
        }
        Ok(merged)
    }

    fn reload_entries(&mut self) -> Result<()> {
        self.entries = self.store.get_entries()?;
        tracing::debug!("Loaded {} entries", self.entries.len());
        Ok(())
    }
}
