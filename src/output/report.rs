//! Run summary written to `<basename>_report.json`

use crate::crawler::{CrawlRun, RunStatus};
use crate::state::CrawlState;
use serde::Serialize;

/// Number of `(word, count)` pairs kept in the report
pub const REPORT_TOP_WORDS: usize = 20;

/// Summary counts for a crawl run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlReport {
    pub urls_analyzed: usize,
    pub unique_words: usize,
    pub emails_found: usize,
    pub phones_found: usize,

    /// Most frequent words, serialized as `[word, count]` pairs
    pub top_words: Vec<(String, u64)>,

    /// Successful page analyses, re-scans included
    pub pages_fetched: u64,

    pub duration_seconds: f64,
    pub target: String,
    pub interrupted: bool,
}

impl CrawlReport {
    /// Builds the report from the aggregates of a run
    pub fn from_state(state: &CrawlState, target: &str, duration_seconds: f64, interrupted: bool) -> Self {
        Self {
            urls_analyzed: state.visited.len(),
            unique_words: state.words.len(),
            emails_found: state.emails.len(),
            phones_found: state.phones.len(),
            top_words: state.words.most_common(REPORT_TOP_WORDS),
            pages_fetched: state.pages_analyzed(),
            duration_seconds,
            target: target.to_string(),
            interrupted,
        }
    }

    pub fn from_run(run: &CrawlRun) -> Self {
        Self::from_state(
            &run.state,
            &run.target,
            run.elapsed.as_secs_f64(),
            run.status == RunStatus::Interrupted,
        )
    }
}
