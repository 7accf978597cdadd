//! Tag labels

use regex::Regex;
use std::sync::OnceLock;

/// Tags offered before the user has saved any of their own
pub const DEFAULT_TAGS: [&str; 5] = ["happy", "milestone", "funny", "sleep", "family"];

fn whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

pub fn default_tags() -> Vec<String> {
    DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect()
}

/// Trim a label and collapse inner whitespace. Returns `None` for blank labels.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let collapsed = whitespace_regex().replace_all(tag.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// Normalize every label, dropping blanks and later duplicates.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(tag) = normalize_tag(tag.as_ref()) {
            if !output.contains(&tag) {
                output.push(tag);
            }
        }
    }
    output
}

/// Append labels from `extra` that `known` does not have yet.
pub fn merge_tags(known: &[String], extra: &[String]) -> Vec<String> {
    normalize_tags(known.iter().chain(extra.iter()))
}
