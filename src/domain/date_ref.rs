//! Date reference parsing and resolution

use crate::error::{JournalError, Result};
use chrono::{DateTime, Duration, NaiveDate};

/// A user supplied date that can be resolved to a calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateReference {
    /// Current day
    Today,
    /// Previous day
    Yesterday,
    /// Specific date
    SpecificDate(NaiveDate),
}

impl DateReference {
    /// Parse a date reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DateReference::Today),
            "yesterday" => Ok(DateReference::Yesterday),
            _ => parse_date(input).map(DateReference::SpecificDate),
        }
    }

    /// Resolve this reference against the given current date
    pub fn resolve(&self, base_date: NaiveDate) -> NaiveDate {
        match self {
            DateReference::Today => base_date,
            DateReference::Yesterday => base_date - Duration::days(1),
            DateReference::SpecificDate(date) => *date,
        }
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar day of their own offset.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| JournalError::InvalidDate(input.to_string()))
}
