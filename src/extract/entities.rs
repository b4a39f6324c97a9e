//! Contact entities and year/version mentions

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// International prefix, parenthesized area code, plain dashed/dotted
static PHONE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\+\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}").unwrap(),
        Regex::new(r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}").unwrap(),
        Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
    ]
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:v|version)?\s*[0-9]+\.[0-9]+(?:\.[0-9]+)?\b").unwrap()
});

/// Email addresses exactly as written
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    EMAIL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Phone numbers matched by any of the three patterns, format preserved
pub fn extract_phones(text: &str) -> BTreeSet<String> {
    PHONE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Four-digit years between 1900 and 2099, every occurrence in order
pub fn extract_years(text: &str) -> Vec<String> {
    YEAR.find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Version-like tokens (`1.2`, `v2.0.1`, `Version 3.4`), every occurrence in order
pub fn extract_versions(text: &str) -> Vec<String> {
    VERSION
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
