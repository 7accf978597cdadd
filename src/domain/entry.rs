//! Journal entries, photos and the baby profile

use crate::domain::age::{calculate_age, AgeDuration};
use crate::domain::tags::normalize_tags;
use crate::error::{JournalError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The child whose milestones are being recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabyProfile {
    pub name: String,
    pub birth_date: NaiveDate,
}

impl BabyProfile {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        BabyProfile {
            name: name.into(),
            birth_date,
        }
    }
}

/// A stored photo reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    pub mime_type: String,
}

impl Photo {
    /// Placeholder photos created by a client before upload carry this id prefix
    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with("temp-")
    }
}

/// A photo on local disk that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPhoto {
    pub source: PathBuf,
    pub mime_type: String,
}

impl RawPhoto {
    /// Create a raw photo, inferring the MIME type from the file extension
    pub fn from_path(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let mime_type = mime_type_for(&source).to_string();
        RawPhoto { source, mime_type }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// One dated journal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Snapshot taken when the entry was saved; not refreshed on profile edits
    pub age_at_time: AgeDuration,
}

impl JournalEntry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Field-wise update for an entry.
///
/// Without an `id` the patch creates a new entry. With an `id`, every `Some`
/// field overwrites the stored value and every `None` field keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub photos: Option<Vec<Photo>>,
}

impl EntryPatch {
    /// Patch that creates an entry on the given date
    pub fn create(date: NaiveDate) -> Self {
        EntryPatch {
            date: Some(date),
            ..Default::default()
        }
    }

    /// Patch that edits the entry with the given id
    pub fn update(id: impl Into<String>) -> Self {
        EntryPatch {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = Some(photos);
        self
    }

    /// Build a brand new entry from this patch.
    ///
    /// `uploaded` photos are appended after any photos carried by the patch.
    pub fn into_new_entry(
        self,
        id: String,
        birth_date: NaiveDate,
        uploaded: Vec<Photo>,
    ) -> Result<JournalEntry> {
        let date = self
            .date
            .ok_or_else(|| JournalError::Validation("an entry needs a date".to_string()))?;

        let mut photos = self.photos.unwrap_or_default();
        photos.extend(uploaded);

        Ok(JournalEntry {
            id,
            date,
            notes: self.notes.unwrap_or_default(),
            tags: normalize_tags(self.tags.unwrap_or_default()),
            photos,
            age_at_time: calculate_age(birth_date, date),
        })
    }

    /// Merge this patch over an existing entry.
    ///
    /// The age snapshot is recomputed from `birth_date` and the merged date.
    pub fn apply_to(
        self,
        existing: &JournalEntry,
        birth_date: NaiveDate,
        uploaded: Vec<Photo>,
    ) -> JournalEntry {
        let date = self.date.unwrap_or(existing.date);

        let mut photos = self.photos.unwrap_or_else(|| existing.photos.clone());
        photos.extend(uploaded);

        JournalEntry {
            id: existing.id.clone(),
            date,
            notes: self.notes.unwrap_or_else(|| existing.notes.clone()),
            tags: self
                .tags
                .map(normalize_tags)
                .unwrap_or_else(|| existing.tags.clone()),
            photos,
            age_at_time: calculate_age(birth_date, date),
        }
    }
}

/// Generate an opaque identifier for entries and photos
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
