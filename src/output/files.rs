//! Writes the result files for a run
//!
//! Every file name is `<basename>_<kind>.<ext>`. A failure on one file is
//! reported but does not stop the remaining files from being written.

use crate::output::report::CrawlReport;
use crate::output::wordlists::Wordlists;
use crate::output::{OutputError, OutputResult};
use crate::state::CrawlState;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Paths written by [`save_results`], in writing order
#[derive(Debug, Clone, Default)]
pub struct SavedFiles {
    pub written: Vec<PathBuf>,
}

/// Builds `<basename>_<suffix>`
pub fn output_path(basename: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}", basename, suffix))
}

/// Writes one entry per line
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `value` as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes wordlists, entity lists, metadata and the report
///
/// Emails and phones are only written when any were found.
///
/// # Returns
///
/// * `Ok(SavedFiles)` - Every file was written
/// * `Err(OutputError)` - At least one file failed; the first error is returned
///   after all other files were attempted
pub fn save_results(
    basename: &str,
    state: &CrawlState,
    report: &CrawlReport,
) -> OutputResult<SavedFiles> {
    let mut saved = SavedFiles::default();
    let mut first_error: Option<OutputError> = None;

    let mut record = |path: PathBuf, result: OutputResult<()>, saved: &mut SavedFiles| match result {
        Ok(()) => saved.written.push(path),
        Err(e) => {
            tracing::error!("Failed to write {}: {}", path.display(), e);
            first_error.get_or_insert(e);
        }
    };

    let wordlists = Wordlists::generate(&state.words);
    for (name, entries) in wordlists.lists() {
        let path = output_path(basename, &format!("{}.txt", name));
        let result = write_lines(&path, entries);
        if result.is_ok() {
            tracing::info!("Saved {} words to {}", entries.len(), path.display());
        }
        record(path, result, &mut saved);
    }

    for (name, set) in [("emails", &state.emails), ("phones", &state.phones)] {
        if set.is_empty() {
            continue;
        }
        let path = output_path(basename, &format!("{}.txt", name));
        let result = write_lines(&path, &set.sorted());
        record(path, result, &mut saved);
    }

    let path = output_path(basename, "metadata.json");
    let result = write_json(&path, &state.metadata.snapshot());
    record(path, result, &mut saved);

    let path = output_path(basename, "report.json");
    let result = write_json(&path, report);
    record(path, result, &mut saved);

    match first_error {
        Some(e) => Err(e),
        None => Ok(saved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_state() -> CrawlState {
        let state = CrawlState::new();
        state.visited.insert("https://example.com/");
        state.words.increment("rocket");
        state.words.increment("rocket");
        state.words.increment("skates");
        state.emails.insert("sales@example.com");
        state.metadata.append("years", "1999");
        state
    }

    #[test]
    fn test_save_results_writes_all_files() {
        let dir = TempDir::new().unwrap();
        let basename = dir.path().join("acme").to_string_lossy().to_string();
        let state = sample_state();
        let report = CrawlReport::from_state(&state, "https://example.com/", 0.5, false);

        let saved = save_results(&basename, &state, &report).unwrap();
        assert_eq!(saved.written.len(), 8);

        let basic = fs::read_to_string(format!("{}_basic.txt", basename)).unwrap();
        assert_eq!(basic, "rocket\nskates\n");

        let emails = fs::read_to_string(format!("{}_emails.txt", basename)).unwrap();
        assert_eq!(emails, "sales@example.com\n");

        assert!(!Path::new(&format!("{}_phones.txt", basename)).exists());

        let metadata: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(format!("{}_metadata.json", basename)).unwrap())
                .unwrap();
        assert_eq!(metadata["years"], serde_json::json!(["1999"]));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(format!("{}_report.json", basename)).unwrap())
                .unwrap();
        assert_eq!(report["urls_analyzed"], 1);
        assert_eq!(report["top_words"][0], serde_json::json!(["rocket", 2]));
    }

    #[test]
    fn test_empty_run_still_writes_wordlists() {
        let dir = TempDir::new().unwrap();
        let basename = dir.path().join("empty").to_string_lossy().to_string();
        let state = CrawlState::new();
        let report = CrawlReport::from_state(&state, "https://example.com/", 0.0, true);

        save_results(&basename, &state, &report).unwrap();

        let basic = fs::read_to_string(format!("{}_basic.txt", basename)).unwrap();
        assert!(basic.is_empty());
        assert!(!Path::new(&format!("{}_emails.txt", basename)).exists());
    }

    #[test]
    fn test_unwritable_basename_reports_error() {
        let dir = TempDir::new().unwrap();
        let basename = dir
            .path()
            .join("missing")
            .join("acme")
            .to_string_lossy()
            .to_string();
        let state = sample_state();
        let report = CrawlReport::from_state(&state, "https://example.com/", 0.0, false);

        assert!(matches!(
            save_results(&basename, &state, &report),
            Err(OutputError::Io(_))
        ));
    }
}
