//! Domain layer - Age arithmetic, entries and catalog filtering

pub mod age;
pub mod catalog;
pub mod date_ref;
pub mod entry;
pub mod tags;

pub use age::{calculate_age, format_age, AgeDuration};
pub use catalog::{EntryCatalog, EntryFilter};
pub use date_ref::{parse_date, DateReference};
pub use entry::{BabyProfile, EntryPatch, JournalEntry, Photo, RawPhoto};
