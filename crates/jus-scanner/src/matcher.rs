//! Attorney name matching and context extraction.

use crate::error::{Result, ScanError};
use crate::html::collapse_whitespace;
use jus_core::ScanningConfig;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

const KEPT_PUNCTUATION: [char; 13] = [
    '-', '.', ',', ';', ':', '/', '(', ')', 'º', 'ª', '§', '°', '\'',
];

/// Case-insensitive, whitespace-tolerant matcher for one attorney name.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    name: String,
    lowered: String,
    pattern: Regex,
}

impl NameMatcher {
    /// Build a matcher. Internal whitespace in `name` matches any whitespace run.
    pub fn new(name: &str) -> Result<Self> {
        let normalized = collapse_whitespace(name);
        if normalized.is_empty() {
            return Err(ScanError::InvalidName {
                name: name.to_string(),
            });
        }

        let tokens: Vec<String> = normalized.split(' ').map(regex::escape).collect();
        let pattern = RegexBuilder::new(&tokens.join(r"\s+"))
            .case_insensitive(true)
            .unicode(true)
            .build()?;

        Ok(Self {
            lowered: normalized.to_lowercase(),
            name: normalized,
            pattern,
        })
    }

    /// The normalized name, as reported in publications.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cleaned context windows around the first matches of the name in `text`.
    ///
    /// `text` is expected to be whitespace-collapsed page text.
    #[must_use]
    pub fn find_contexts(&self, text: &str, config: &ScanningConfig) -> Vec<String> {
        if !text.to_lowercase().contains(&self.lowered) {
            return Vec::new();
        }

        self.pattern
            .find_iter(text)
            .take(config.max_matches_per_name)
            .map(|m| {
                let start = back_chars(text, m.start(), config.context_radius);
                let end = forward_chars(text, m.end(), config.context_radius);
                let cleaned = clean_snippet(&text[start..end]);
                truncate_chars(&cleaned, config.max_content_chars)
            })
            .filter(|snippet| !snippet.is_empty())
            .collect()
    }
}

/// Strip residual tags and characters outside the gazette text alphabet.
#[must_use]
pub fn clean_snippet(raw: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(raw, " ");
    let filtered: String = without_tags
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || KEPT_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    collapse_whitespace(&filtered)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Byte offset `count` characters before `idx`, clamped to the start.
fn back_chars(text: &str, idx: usize, count: usize) -> usize {
    if count == 0 {
        return idx;
    }
    text[..idx]
        .char_indices()
        .rev()
        .nth(count - 1)
        .map_or(0, |(i, _)| i)
}

/// Byte offset `count` characters after `idx`, clamped to the end.
fn forward_chars(text: &str, idx: usize, count: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(count)
        .map_or(text.len(), |(i, _)| idx + i)
}
