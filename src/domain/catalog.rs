//! Entry filtering and filter facets
//!
//! Everything here is recomputed from the current entry list on each call.
//! Nothing is cached between calls.

use crate::domain::entry::JournalEntry;
use std::collections::BTreeSet;

/// Active filter criteria. Every active criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Case-insensitive substring of the notes; empty matches everything
    pub search: String,
    /// Exact tag the entry must carry
    pub tag: Option<String>,
    /// Exact `age_at_time.years` the entry must have
    pub age_year: Option<u32>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_age_year(mut self, age_year: Option<u32>) -> Self {
        self.age_year = age_year;
        self
    }

    /// True when no criterion is active
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.tag.is_none() && self.age_year.is_none()
    }

    pub fn matches(&self, entry: &JournalEntry) -> bool {
        self.matches_search(entry) && self.matches_tag(entry) && self.matches_age(entry)
    }

    fn matches_search(&self, entry: &JournalEntry) -> bool {
        self.search.is_empty()
            || entry
                .notes
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    fn matches_tag(&self, entry: &JournalEntry) -> bool {
        self.tag.as_deref().is_none_or(|tag| entry.has_tag(tag))
    }

    fn matches_age(&self, entry: &JournalEntry) -> bool {
        self.age_year
            .is_none_or(|years| entry.age_at_time.years == years)
    }
}

/// Read-only view over an entry list
#[derive(Debug, Clone, Copy)]
pub struct EntryCatalog<'a> {
    entries: &'a [JournalEntry],
}

impl<'a> EntryCatalog<'a> {
    pub fn new(entries: &'a [JournalEntry]) -> Self {
        EntryCatalog { entries }
    }

    pub fn entries(&self) -> &'a [JournalEntry] {
        self.entries
    }

    /// Entries matching `filter`, in their original order
    pub fn filter(&self, filter: &EntryFilter) -> Vec<&'a JournalEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    /// Distinct tags in first-seen order
    pub fn distinct_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.entries.iter().flat_map(|e| e.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// Distinct ages in whole years, ascending
    pub fn distinct_age_years(&self) -> Vec<u32> {
        self.entries
            .iter()
            .map(|e| e.age_at_time.years)
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::age::AgeDuration;
    use chrono::NaiveDate;

    fn entry(id: &str, notes: &str, tags: &[&str], years: u32) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: notes.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            photos: vec![],
            age_at_time: AgeDuration::new(years, 0, 0),
        }
    }

    fn sample() -> Vec<JournalEntry> {
        vec![
            entry("1", "First Steps in the garden", &["milestone", "happy"], 1),
            entry("2", "Slept through the night", &["sleep"], 0),
            entry("3", "Laughed at the dog", &["funny", "happy"], 2),
            entry("4", "Grandma visited, more steps", &["family"], 1),
        ]
    }

    fn ids(entries: &[&JournalEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        let filter = EntryFilter::new();
        assert!(filter.is_empty());
        assert_eq!(ids(&catalog.filter(&filter)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_notes() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        let filter = EntryFilter::new().with_search("STEPS");
        assert_eq!(ids(&catalog.filter(&filter)), vec!["1", "4"]);
    }

    #[test]
    fn test_search_ignores_tags() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        let filter = EntryFilter::new().with_search("milestone");
        assert!(catalog.filter(&filter).is_empty());
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        let filter = EntryFilter::new().with_tag(Some("happy".to_string()));
        assert_eq!(ids(&catalog.filter(&filter)), vec!["1", "3"]);

        let filter = EntryFilter::new().with_tag(Some("Happy".to_string()));
        assert!(catalog.filter(&filter).is_empty());
    }

    #[test]
    fn test_age_year_filter() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        let filter = EntryFilter::new().with_age_year(Some(1));
        assert_eq!(ids(&catalog.filter(&filter)), vec!["1", "4"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);

        // "3" carries the tag but not the text
        let filter = EntryFilter::new()
            .with_search("steps")
            .with_tag(Some("happy".to_string()));
        assert_eq!(ids(&catalog.filter(&filter)), vec!["1"]);

        let filter = filter.with_age_year(Some(2));
        assert!(catalog.filter(&filter).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        let filter = EntryFilter::new().with_search("the");
        let first = ids(&catalog.filter(&filter));
        let second = ids(&catalog.filter(&filter));
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_tags_dedup_first_seen() {
        let entries = vec![entry("1", "", &["a", "b"], 0), entry("2", "", &["b", "c"], 0)];
        let catalog = EntryCatalog::new(&entries);
        assert_eq!(catalog.distinct_tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_distinct_age_years_sorted() {
        let entries = sample();
        let catalog = EntryCatalog::new(&entries);
        assert_eq!(catalog.distinct_age_years(), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_catalog_facets() {
        let catalog = EntryCatalog::new(&[]);
        assert!(catalog.distinct_tags().is_empty());
        assert!(catalog.distinct_age_years().is_empty());
    }
}
