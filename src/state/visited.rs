use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Pages already claimed for processing
///
/// Entries are keyed by canonical URL and remember the URL that was actually
/// fetched for that key. Membership check and insertion happen under one
/// lock, so two workers can never both claim the same page.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashMap<String, String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, recording `target` as the URL fetched for it
    ///
    /// Returns false if the key was already claimed; the first target wins.
    pub fn claim(&self, key: &str, target: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        if urls.contains_key(key) {
            return false;
        }
        urls.insert(key.to_string(), target.to_string());
        true
    }

    /// Claims a URL that is both its own key and fetch target
    pub fn insert(&self, url: &str) -> bool {
        self.claim(url, url)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every claimed key, sorted
    pub fn snapshot(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Returns the fetched URL of every claimed page, ordered by key
    pub fn targets(&self) -> Vec<String> {
        let mut entries: Vec<(String, String)> = self
            .urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries.into_iter().map(|(_, target)| target).collect()
    }
}
