//! Wordlist generation from aggregated word frequencies

use crate::state::WordFrequency;
use std::collections::BTreeSet;

/// Suffixes appended to long words for the password list
const PASSWORD_SUFFIXES: &[&str] = &["123", "!", "2024", "1"];

/// Shortest word eligible for the password list
const PASSWORD_MIN_LENGTH: usize = 6;

/// Username length window (inclusive)
const USERNAME_LENGTH: (usize, usize) = (3, 12);

/// Shortest word used for directory and endpoint candidates
const PATH_MIN_LENGTH: usize = 3;

/// API path prefixes combined with every word
const API_PATTERNS: &[&str] = &["api", "v1", "v2", "rest", "graphql"];

/// The derived wordlists, each already in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlists {
    /// Every word, most frequent first
    pub basic: Vec<String>,

    /// Long words and their common mutations, sorted
    pub passwords: Vec<String>,

    pub usernames: Vec<String>,

    /// `/word/` fuzzing paths
    pub directories: Vec<String>,

    /// API-style paths in both prefix and suffix position
    pub endpoints: Vec<String>,
}

impl Wordlists {
    /// Builds every list from a frequency snapshot
    ///
    /// Frequency order is count descending with ties broken alphabetically,
    /// so the same counts always produce the same files.
    pub fn generate(words: &WordFrequency) -> Self {
        let ranked: Vec<String> = words.by_frequency().into_iter().map(|(w, _)| w).collect();
        Self::from_ranked(&ranked)
    }

    /// Builds every list from words already in frequency order
    pub fn from_ranked(ranked: &[String]) -> Self {
        let passwords: BTreeSet<String> = ranked
            .iter()
            .filter(|w| char_len(w) >= PASSWORD_MIN_LENGTH)
            .flat_map(|w| password_candidates(w))
            .collect();

        let usernames = ranked
            .iter()
            .filter(|w| (USERNAME_LENGTH.0..=USERNAME_LENGTH.1).contains(&char_len(w)))
            .cloned()
            .collect();

        let path_words: Vec<&String> = ranked.iter().filter(|w| char_len(w) >= PATH_MIN_LENGTH).collect();

        let directories = path_words.iter().map(|w| format!("/{}/", w)).collect();

        let endpoints = API_PATTERNS
            .iter()
            .flat_map(|pattern| {
                path_words
                    .iter()
                    .flat_map(move |w| [format!("/{}/{}", pattern, w), format!("/{}/{}", w, pattern)])
            })
            .collect();

        Self {
            basic: ranked.to_vec(),
            passwords: passwords.into_iter().collect(),
            usernames,
            directories,
            endpoints,
        }
    }

    /// `(list name, entries)` pairs in file-writing order
    pub fn lists(&self) -> [(&'static str, &[String]); 5] {
        [
            ("basic", self.basic.as_slice()),
            ("passwords", self.passwords.as_slice()),
            ("usernames", self.usernames.as_slice()),
            ("directories", self.directories.as_slice()),
            ("endpoints", self.endpoints.as_slice()),
        ]
    }
}

fn char_len(word: &str) -> usize {
    word.chars().count()
}

fn password_candidates(word: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(word.to_string())
        .chain(PASSWORD_SUFFIXES.iter().map(move |suffix| format!("{}{}", word, suffix)))
}
