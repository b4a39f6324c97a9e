//! Extraction engine
//!
//! Turns one page's normalized text and parsed document into a
//! [`PageExtraction`]: a pure value that the crawl state absorbs afterwards.
//! Running it twice on the same input gives the same result.

mod entities;
mod metadata;
mod words;

pub use entities::{extract_emails, extract_phones, extract_versions, extract_years};
pub use metadata::{extract_metadata, flatten_json_ld, JSON_LD_BUCKET};
pub use words::extract_words;

use scraper::Html;
use std::collections::BTreeSet;

/// Bucket receiving four-digit years
pub const YEARS_BUCKET: &str = "years";

/// Bucket receiving version-like tokens
pub const VERSIONS_BUCKET: &str = "versions";

/// Everything extracted from a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Distinct lower-cased words
    pub words: BTreeSet<String>,

    /// Email addresses as written
    pub emails: BTreeSet<String>,

    /// Phone numbers as written
    pub phones: BTreeSet<String>,

    /// Ordered `(bucket, value)` pairs: years, versions, meta, Open Graph, JSON-LD
    pub metadata: Vec<(String, String)>,
}

/// Runs every extractor over one page
///
/// # Arguments
///
/// * `text` - Normalized visible text of the page
/// * `document` - The parsed page, used for metadata
/// * `min_word_length` - Shortest word kept
pub fn extract_page(text: &str, document: &Html, min_word_length: usize) -> PageExtraction {
    let mut metadata: Vec<(String, String)> = Vec::new();
    metadata.extend(
        extract_years(text)
            .into_iter()
            .map(|y| (YEARS_BUCKET.to_string(), y)),
    );
    metadata.extend(
        extract_versions(text)
            .into_iter()
            .map(|v| (VERSIONS_BUCKET.to_string(), v)),
    );
    metadata.extend(extract_metadata(document));

    PageExtraction {
        words: extract_words(text, min_word_length),
        emails: extract_emails(text),
        phones: extract_phones(text),
        metadata,
    }
}
