//! State module for the data collected during a run
//!
//! All aggregates are created once per run, shared between the depth-first
//! crawl and the re-scan workers, and read by the output layer at the end.
//!
//! # Components
//!
//! - `VisitedSet`: canonical URLs already claimed for processing
//! - `WordFrequency`: word → count of page analyses it appeared in
//! - `EntitySet`: deduplicated emails and phone numbers
//! - `MetadataBuckets`: append-only named metadata lists

mod aggregate;
mod visited;

pub use aggregate::{EntitySet, MetadataBuckets, WordFrequency};
pub use visited::VisitedSet;

use crate::extract::PageExtraction;
use std::sync::atomic::{AtomicU64, Ordering};

/// Every aggregate a crawl run mutates
#[derive(Debug, Default)]
pub struct CrawlState {
    pub visited: VisitedSet,
    pub words: WordFrequency,
    pub emails: EntitySet,
    pub phones: EntitySet,
    pub metadata: MetadataBuckets,
    pages_analyzed: AtomicU64,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one page's extraction results into the shared aggregates
    ///
    /// Each distinct word of the page is counted once.
    pub fn absorb(&self, page: &PageExtraction) {
        self.words.increment_all(&page.words);
        self.emails.extend(&page.emails);
        self.phones.extend(&page.phones);
        self.metadata.append_all(&page.metadata);
        self.pages_analyzed.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of successful page analyses, re-scans included
    pub fn pages_analyzed(&self) -> u64 {
        self.pages_analyzed.load(Ordering::Relaxed)
    }
}
