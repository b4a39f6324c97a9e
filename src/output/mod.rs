//! Output module for wordlists, result files and the run summary
//!
//! This module handles:
//! - Deriving the specialized wordlists from word frequencies
//! - Building the JSON run report
//! - Writing every result file under a common basename
//! - Printing the console summary

mod files;
mod report;
pub mod stats;
mod wordlists;

pub use files::{output_path, save_results, write_json, write_lines, SavedFiles};
pub use report::{CrawlReport, REPORT_TOP_WORDS};
pub use stats::{format_summary, print_summary};
pub use wordlists::Wordlists;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
