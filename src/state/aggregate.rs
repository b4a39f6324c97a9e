//! Aggregates shared by every crawler task
//!
//! Each aggregate owns its own lock and exposes only whole operations
//! (increment-or-insert, insert-if-absent, append), so concurrent workers can
//! never interleave halfway through an update.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, PoisonError};

/// Word → number of page analyses the word appeared in
#[derive(Debug, Default)]
pub struct WordFrequency {
    counts: Mutex<HashMap<String, u64>>,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments a single word, inserting it at 1 if unseen
    pub fn increment(&self, word: &str) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    /// Increments every word of one page under a single lock acquisition
    pub fn increment_all<'a, I>(&self, words: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        for word in words {
            *counts.entry(word.clone()).or_insert(0) += 1;
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(word)
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    /// All words ordered by descending count, ties broken alphabetically
    pub fn by_frequency(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// The `n` most frequent words
    pub fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries = self.by_frequency();
        entries.truncate(n);
        entries
    }
}

/// Deduplicated set of raw entity strings (emails, phone numbers)
#[derive(Debug, Default)]
pub struct EntitySet {
    items: Mutex<BTreeSet<String>>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the value if absent; returns whether it was new
    pub fn insert(&self, value: &str) -> bool {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(value.to_string())
    }

    pub fn extend<'a, I>(&self, values: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        for value in values {
            items.insert(value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of the set
    pub fn sorted(&self) -> Vec<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

/// Named buckets of metadata values, append-only, duplicates kept
#[derive(Debug, Default)]
pub struct MetadataBuckets {
    buckets: Mutex<BTreeMap<String, Vec<String>>>,
}

impl MetadataBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one value to a bucket, creating the bucket if needed
    pub fn append(&self, bucket: &str, value: &str) {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(bucket.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// Appends a batch of `(bucket, value)` pairs in order under one lock
    pub fn append_all<'a, I>(&self, entries: I)
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        for (bucket, value) in entries {
            buckets.entry(bucket.clone()).or_default().push(value.clone());
        }
    }

    /// Values of one bucket, in insertion order
    pub fn get(&self, bucket: &str) -> Vec<String> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(bucket)
            .cloned()
            .unwrap_or_default()
    }

    /// Copy of every bucket, keyed alphabetically
    pub fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
