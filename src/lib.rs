//! babyjournal - Photo journal for a child's milestones
//!
//! Dated entries of notes, tags and photos, each stamped with the child's age
//! on the day it happened. Storage is either local JSON documents or a
//! spreadsheet workbook with a photo folder, chosen per journal.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::JournalError;
