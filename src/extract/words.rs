//! Word token extraction
//!
//! Four independent strategies run over the page text and their results are
//! unioned. Strategies that depend on letter case (camelCase, Title Case,
//! punctuated tokens) read the text as written; every emitted token is
//! lower-cased.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z0-9]+\b").unwrap());

static CAMEL_CASE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:[A-Z][a-z]+)+").unwrap());

static CAMEL_CASE_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]?[a-z]+").unwrap());

static PUNCTUATED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b\w+[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]+\w*\b"#).unwrap()
});

static TITLE_CASE_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap());

/// Extracts the distinct word tokens of a page
///
/// Only tokens with at least `min_len` characters are returned.
///
/// # Example
///
/// ```
/// use wordforge::extract::extract_words;
///
/// let words = extract_words("call getUserName now", 3);
/// assert!(words.contains("user"));
/// assert!(words.contains("name"));
/// ```
pub fn extract_words(text: &str, min_len: usize) -> BTreeSet<String> {
    let mut words = BTreeSet::new();

    alphanumeric_runs(text, &mut words);
    camel_case_parts(text, &mut words);
    punctuated_tokens(text, &mut words);
    title_case_words(text, &mut words);

    words.retain(|w| w.chars().count() >= min_len);
    words
}

fn alphanumeric_runs(text: &str, words: &mut BTreeSet<String>) {
    let lowered = text.to_lowercase();
    for m in ALNUM_RUN.find_iter(&lowered) {
        words.insert(m.as_str().to_string());
    }
}

/// `getUserName` → `get`, `user`, `name`
fn camel_case_parts(text: &str, words: &mut BTreeSet<String>) {
    for run in CAMEL_CASE_RUN.find_iter(text) {
        for part in CAMEL_CASE_PART.find_iter(run.as_str()) {
            words.insert(part.as_str().to_lowercase());
        }
    }
}

/// Password-like tokens such as `p@ssw0rd` or `admin_01`
fn punctuated_tokens(text: &str, words: &mut BTreeSet<String>) {
    for m in PUNCTUATED_TOKEN.find_iter(text) {
        words.insert(m.as_str().to_lowercase());
    }
}

/// Product and brand names written in Title Case
fn title_case_words(text: &str, words: &mut BTreeSet<String>) {
    for phrase in TITLE_CASE_PHRASE.find_iter(text) {
        for word in phrase.as_str().split_whitespace() {
            words.insert(word.to_lowercase());
        }
    }
}
