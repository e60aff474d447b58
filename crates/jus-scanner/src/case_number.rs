use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// Unified CNJ numbering: NNNNNNN-DD.AAAA.J.TR.OOOO
static CNJ_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{7}-\d{2}\.\d{4}\.\d\.\d{2}\.\d{4}\b").expect("valid regex")
});

static LEGACY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{6}/\d{4}\b").expect("valid regex"));

static DOTTED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3,4}\.\d{2}\.\d{6}-\d\b").expect("valid regex"));

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2})/(\d{2})/(\d{4})\b").expect("valid regex"));

/// First case number found in `text`.
///
/// Formats are tried in priority order (CNJ, legacy, dotted); the first
/// format with any match wins, even if a lower-priority one appears earlier.
#[must_use]
pub fn extract_case_number(text: &str) -> Option<String> {
    [&*CNJ_PATTERN, &*LEGACY_PATTERN, &*DOTTED_PATTERN]
        .into_iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

/// First valid `dd/mm/yyyy` date in `text`.
#[must_use]
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERN.captures_iter(text).find_map(|caps| {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}
