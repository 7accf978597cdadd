//! Spreadsheet backend
//!
//! Stores the journal as a workbook of string rows inside an app folder, the
//! way a cloud spreadsheet plus file store would hold it. Uploaded photos are
//! copied into the same folder.

use crate::domain::age::{calculate_age, AgeDuration};
use crate::domain::entry::generate_id;
use crate::domain::tags::{default_tags, merge_tags, normalize_tags};
use crate::domain::{parse_date, BabyProfile, EntryPatch, JournalEntry, Photo, RawPhoto};
use crate::error::{JournalError, Result};
use crate::infrastructure::config::{BackendKind, SheetSettings};
use crate::infrastructure::store::{read_json, write_json, Identity, JournalStore, StorageHandles};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_FOLDER_NAME: &str = "BabyPhotoJournal_Data";
pub const SPREADSHEET_NAME: &str = "BabyJournal_Database.json";

const ENTRIES_SHEET: &str = "Entries";
const PROFILE_SHEET: &str = "Profile";
const TAGS_SHEET: &str = "Tags";

const ENTRIES_HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Notes",
    "Tags (JSON)",
    "Photos (JSON)",
    "Age Years",
    "Age Months",
    "Age Days",
];
const PROFILE_HEADER: [&str; 2] = ["Name", "BirthDate"];
const TAGS_HEADER: [&str; 1] = ["TagName"];

type Row = Vec<String>;

fn header(cells: &[&str]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

/// On-disk workbook: named sheets of rows, first row is the header
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Workbook {
    spreadsheet_id: String,
    folder_id: String,
    sheets: BTreeMap<String, Vec<Row>>,
}

impl Workbook {
    fn create(folder_id: String) -> Self {
        let mut sheets = BTreeMap::new();
        sheets.insert(ENTRIES_SHEET.to_string(), vec![header(&ENTRIES_HEADER)]);
        sheets.insert(PROFILE_SHEET.to_string(), vec![header(&PROFILE_HEADER)]);
        sheets.insert(TAGS_SHEET.to_string(), vec![header(&TAGS_HEADER)]);

        Workbook {
            spreadsheet_id: generate_id(),
            folder_id,
            sheets,
        }
    }

    /// Data rows of a sheet, header excluded
    fn rows(&self, title: &str) -> &[Row] {
        self.sheets
            .get(title)
            .map(|rows| rows.get(1..).unwrap_or(&[]))
            .unwrap_or(&[])
    }

    /// Replace the data rows of a sheet, keeping (or creating) its header
    fn set_rows(&mut self, title: &str, default_header: &[&str], rows: Vec<Row>) {
        let sheet = self
            .sheets
            .entry(title.to_string())
            .or_insert_with(|| vec![header(default_header)]);
        sheet.truncate(1);
        if sheet.is_empty() {
            sheet.push(header(default_header));
        }
        sheet.extend(rows);
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Merge or append the entry in `rows`, returning what was stored
fn place_entry(
    rows: &mut Vec<Row>,
    existing: Option<(usize, JournalEntry)>,
    patch: EntryPatch,
    birth_date: NaiveDate,
    uploaded: Vec<Photo>,
) -> Result<JournalEntry> {
    match existing {
        Some((index, current)) => {
            let merged = patch.apply_to(&current, birth_date, uploaded);
            rows[index] = entry_to_row(&merged)?;
            tracing::info!("Updated entry row {} ({})", index + 2, merged.id);
            Ok(merged)
        }
        None => {
            let created = patch.into_new_entry(generate_id(), birth_date, uploaded)?;
            rows.push(entry_to_row(&created)?);
            tracing::info!("Appended entry {}", created.id);
            Ok(created)
        }
    }
}

fn entry_to_row(entry: &JournalEntry) -> Result<Row> {
    Ok(vec![
        entry.id.clone(),
        entry.date.format("%Y-%m-%d").to_string(),
        entry.notes.clone(),
        serde_json::to_string(&entry.tags)?,
        serde_json::to_string(&entry.photos)?,
        entry.age_at_time.years.to_string(),
        entry.age_at_time.months.to_string(),
        entry.age_at_time.days.to_string(),
    ])
}

/// Parse an entries row. Rows written before the age columns existed get
/// their age from `birth_date`, or zero when there is no profile.
fn row_to_entry(row: &[String], birth_date: Option<NaiveDate>) -> Result<JournalEntry> {
    let id = cell(row, 0).to_string();
    if id.is_empty() {
        return Err(JournalError::Storage("entry row without an id".to_string()));
    }

    let date = parse_date(cell(row, 1))?;

    let tags = match cell(row, 3) {
        "" => Vec::new(),
        json => serde_json::from_str(json)?,
    };
    let photos = match cell(row, 4) {
        "" => Vec::new(),
        json => serde_json::from_str(json)?,
    };

    let stored_age = (
        cell(row, 5).parse::<u32>(),
        cell(row, 6).parse::<u32>(),
        cell(row, 7).parse::<u32>(),
    );
    let age_at_time = match stored_age {
        (Ok(years), Ok(months), Ok(days)) => AgeDuration::new(years, months, days),
        _ => birth_date
            .map(|birth| calculate_age(birth, date))
            .unwrap_or(AgeDuration::ZERO),
    };

    Ok(JournalEntry {
        id,
        date,
        notes: cell(row, 2).to_string(),
        tags,
        photos,
        age_at_time,
    })
}

fn profile_from_rows(rows: &[Row]) -> Result<Option<BabyProfile>> {
    match rows.first() {
        Some(row) if !cell(row, 1).is_empty() => Ok(Some(BabyProfile {
            name: cell(row, 0).to_string(),
            birth_date: parse_date(cell(row, 1))?,
        })),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct SheetStore {
    folder: PathBuf,
    settings: SheetSettings,
    initialized: bool,
    handles: Option<StorageHandles>,
}

impl SheetStore {
    /// Create a store whose app folder lives under `root`
    pub fn new(root: &Path, settings: SheetSettings) -> Self {
        SheetStore {
            folder: root.join(APP_FOLDER_NAME),
            settings,
            initialized: false,
            handles: None,
        }
    }

    fn workbook_path(&self) -> PathBuf {
        self.folder.join(SPREADSHEET_NAME)
    }

    /// Load the workbook, or `None` before provisioning
    fn load_workbook(&self) -> Result<Option<Workbook>> {
        if self.handles.is_none() {
            return Ok(None);
        }
        read_json(&self.workbook_path())
    }

    fn require_workbook(&self) -> Result<Workbook> {
        self.load_workbook()?
            .ok_or_else(|| JournalError::Provision("storage not provisioned".to_string()))
    }

    fn save_workbook(&self, workbook: &Workbook) -> Result<()> {
        write_json(&self.workbook_path(), workbook)
            .map_err(|e| JournalError::Storage(format!("Failed to write workbook: {}", e)))
    }

    fn upload_photo(&self, raw: &RawPhoto) -> Result<Photo> {
        let id = generate_id();
        let filename = match raw.extension() {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.clone(),
        };
        let target = self.folder.join(&filename);

        fs::copy(&raw.source, &target).map_err(|e| {
            JournalError::Storage(format!(
                "Failed to upload photo {}: {}",
                raw.source.display(),
                e
            ))
        })?;
        tracing::debug!("Uploaded {} as {}", raw.source.display(), filename);

        Ok(Photo {
            id,
            url: target.to_string_lossy().to_string(),
            mime_type: raw.mime_type.clone(),
        })
    }

    /// Remove photo copies that no stored row points at
    fn discard_uploads(photos: &[Photo]) {
        for photo in photos {
            if let Err(e) = fs::remove_file(&photo.url) {
                tracing::warn!("Failed to remove orphaned photo {}: {}", photo.url, e);
            }
        }
    }

    fn birth_date(workbook: &Workbook) -> Option<NaiveDate> {
        profile_from_rows(workbook.rows(PROFILE_SHEET))
            .ok()
            .flatten()
            .map(|profile| profile.birth_date)
    }
}

impl JournalStore for SheetStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Sheet
    }

    fn initialize(&mut self) -> Result<()> {
        if !self.settings.is_configured() {
            return Err(JournalError::Connection(
                "sheet backend needs sheet.client_id and sheet.api_key".to_string(),
            ));
        }

        let parent = self.folder.parent().unwrap_or(&self.folder);
        if !parent.is_dir() {
            return Err(JournalError::Connection(format!(
                "storage location {} is not reachable",
                parent.display()
            )));
        }

        tracing::debug!("Sheet client initialized for {}", parent.display());
        self.initialized = true;
        Ok(())
    }

    fn authenticate(&mut self) -> Result<Identity> {
        if !self.initialized {
            return Err(JournalError::Connection(
                "sheet client has not been initialized".to_string(),
            ));
        }

        let account = self.settings.account.trim();
        if account.is_empty() {
            return Err(JournalError::Auth(
                "no account configured for the sheet backend".to_string(),
            ));
        }

        let name = account.split('@').next().unwrap_or(account).to_string();
        Ok(Identity {
            id: account.to_lowercase(),
            name,
            email: Some(account.to_string()),
        })
    }

    fn provision_storage(&mut self) -> Result<StorageHandles> {
        if !self.folder.is_dir() {
            tracing::info!("Creating app folder {}", self.folder.display());
            fs::create_dir_all(&self.folder).map_err(|e| {
                JournalError::Provision(format!("{}: {}", self.folder.display(), e))
            })?;
        }

        let workbook = match read_json::<Workbook>(&self.workbook_path())? {
            Some(workbook) => workbook,
            None => {
                tracing::info!("Creating workbook {}", self.workbook_path().display());
                let workbook = Workbook::create(generate_id());
                write_json(&self.workbook_path(), &workbook)
                    .map_err(|e| JournalError::Provision(e.to_string()))?;
                workbook
            }
        };

        let handles = StorageHandles {
            folder_id: workbook.folder_id,
            spreadsheet_id: workbook.spreadsheet_id,
        };
        self.handles = Some(handles.clone());
        Ok(handles)
    }

    fn get_profile(&self) -> Result<Option<BabyProfile>> {
        match self.load_workbook()? {
            Some(workbook) => profile_from_rows(workbook.rows(PROFILE_SHEET)),
            None => Ok(None),
        }
    }

    fn save_profile(&mut self, profile: &BabyProfile) -> Result<()> {
        let mut workbook = self.require_workbook()?;
        workbook.set_rows(
            PROFILE_SHEET,
            &PROFILE_HEADER,
            vec![vec![
                profile.name.clone(),
                profile.birth_date.format("%Y-%m-%d").to_string(),
            ]],
        );
        tracing::info!("Saving profile for {}", profile.name);
        self.save_workbook(&workbook)
    }

    fn get_entries(&self) -> Result<Vec<JournalEntry>> {
        let Some(workbook) = self.load_workbook()? else {
            return Ok(Vec::new());
        };
        let birth_date = Self::birth_date(&workbook);

        let mut entries = Vec::new();
        for (index, row) in workbook.rows(ENTRIES_SHEET).iter().enumerate() {
            match row_to_entry(row, birth_date) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("Skipping unreadable entry row {}: {}", index + 2, e),
            }
        }

        // Rows are appended oldest first
        entries.reverse();
        Ok(entries)
    }

    fn save_entry(
        &mut self,
        mut patch: EntryPatch,
        birth_date: NaiveDate,
        photos: Vec<RawPhoto>,
    ) -> Result<JournalEntry> {
        let mut workbook = self.require_workbook()?;
        let mut rows = workbook.rows(ENTRIES_SHEET).to_vec();

        let existing = match &patch.id {
            Some(id) => {
                let index = rows
                    .iter()
                    .position(|row| cell(row, 0) == id)
                    .ok_or_else(|| JournalError::EntryNotFound(id.clone()))?;
                Some((index, row_to_entry(&rows[index], Some(birth_date))?))
            }
            None => None,
        };

        if let Some(kept) = patch.photos.take() {
            patch.photos = Some(kept.into_iter().filter(|p| !p.is_placeholder()).collect());
        }

        let mut uploaded = Vec::with_capacity(photos.len());
        for raw in &photos {
            match self.upload_photo(raw) {
                Ok(photo) => uploaded.push(photo),
                Err(e) => {
                    Self::discard_uploads(&uploaded);
                    return Err(e);
                }
            }
        }
        let copied = uploaded.clone();

        let written = place_entry(&mut rows, existing, patch, birth_date, uploaded).and_then(
            |saved| {
                workbook.set_rows(ENTRIES_SHEET, &ENTRIES_HEADER, rows);
                self.save_workbook(&workbook).map(|_| saved)
            },
        );

        if written.is_err() {
            Self::discard_uploads(&copied);
        }
        written
    }

    fn delete_entry(&mut self, id: &str) -> Result<()> {
        let mut workbook = self.require_workbook()?;
        let mut rows = workbook.rows(ENTRIES_SHEET).to_vec();

        let Some(index) = rows.iter().position(|row| cell(row, 0) == id) else {
            tracing::warn!("Delete requested for unknown entry {}", id);
            return Ok(());
        };

        rows.remove(index);
        workbook.set_rows(ENTRIES_SHEET, &ENTRIES_HEADER, rows);
        tracing::info!("Deleted entry {}", id);
        self.save_workbook(&workbook)
    }

    fn get_tags(&self) -> Result<Vec<String>> {
        let Some(workbook) = self.load_workbook()? else {
            return Ok(default_tags());
        };

        let saved: Vec<String> = workbook
            .rows(TAGS_SHEET)
            .iter()
            .map(|row| cell(row, 0).to_string())
            .collect();

        if saved.is_empty() {
            Ok(default_tags())
        } else {
            Ok(merge_tags(&default_tags(), &saved))
        }
    }

    fn save_tags(&mut self, tags: &[String]) -> Result<()> {
        let mut workbook = self.require_workbook()?;
        let rows = normalize_tags(tags)
            .into_iter()
            .map(|tag| vec![tag])
            .collect();
        workbook.set_rows(TAGS_SHEET, &TAGS_HEADER, rows);
        self.save_workbook(&workbook)
    }
}
