//! Output formatting utilities

use crate::domain::{format_age, BabyProfile, JournalEntry};

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

/// Format one entry as a single summary line
pub fn format_entry_line(entry: &JournalEntry) -> String {
    let mut line = format!(
        "{}  {}",
        entry.date.format("%Y-%m-%d"),
        format_age(&entry.age_at_time)
    );

    if !entry.tags.is_empty() {
        line.push_str(&format!("  [{}]", entry.tags.join(", ")));
    }

    let notes = first_line(&entry.notes);
    if !notes.is_empty() {
        line.push_str(&format!("  {}", notes));
    }

    if !entry.photos.is_empty() {
        line.push_str(&format!("  ({} photos)", entry.photos.len()));
    }

    line.push_str(&format!("  {}", entry.id));
    line
}

/// Format a list of entries for display
pub fn format_entry_list(entries: &[&JournalEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_entry_line(entry));
        output.push('\n');
    }
    output
}

/// Format every field of an entry
pub fn format_entry_detail(entry: &JournalEntry) -> String {
    let mut output = format!(
        "id:    {}\ndate:  {}\nage:   {}\n",
        entry.id,
        entry.date.format("%Y-%m-%d"),
        format_age(&entry.age_at_time)
    );

    if !entry.tags.is_empty() {
        output.push_str(&format!("tags:  {}\n", entry.tags.join(", ")));
    }

    for photo in &entry.photos {
        output.push_str(&format!(
            "photo: {}  {}  {}\n",
            photo.id, photo.mime_type, photo.url
        ));
    }

    if !entry.notes.is_empty() {
        output.push('\n');
        output.push_str(&entry.notes);
        output.push('\n');
    }

    output
}

pub fn format_profile(profile: &BabyProfile) -> String {
    format!(
        "{} (born {})",
        profile.name,
        profile.birth_date.format("%Y-%m-%d")
    )
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(tag);
        output.push('\n');
    }

    output
}

/// Format filter facets: distinct tags and age years
pub fn format_facets(tags: &[String], years: &[u32]) -> String {
    let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    format!(
        "tags:  {}\nyears: {}\n",
        if tags.is_empty() {
            "-".to_string()
        } else {
            tags.join(", ")
        },
        if years.is_empty() {
            "-".to_string()
        } else {
            years.join(", ")
        }
    )
}
