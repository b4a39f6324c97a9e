//! Console summary printed after the result files are saved

use crate::output::report::CrawlReport;

/// Number of words listed in the console summary
pub const SUMMARY_TOP_WORDS: usize = 10;

/// Formats the summary shown to the operator
pub fn format_summary(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Analysis Complete ===\n\n");
    if report.interrupted {
        out.push_str("(partial results: run was interrupted)\n\n");
    }

    out.push_str(&format!("Target: {}\n", report.target));
    out.push_str(&format!("URLs analyzed: {}\n", report.urls_analyzed));
    out.push_str(&format!("Pages fetched: {}\n", report.pages_fetched));
    out.push_str(&format!("Unique words: {}\n", report.unique_words));
    out.push_str(&format!("Emails found: {}\n", report.emails_found));
    out.push_str(&format!("Phone numbers found: {}\n", report.phones_found));
    out.push_str(&format!("Duration: {:.1}s\n", report.duration_seconds));

    if !report.top_words.is_empty() {
        out.push_str(&format!("\nTop {} words:\n", SUMMARY_TOP_WORDS));
        for (rank, (word, count)) in report.top_words.iter().take(SUMMARY_TOP_WORDS).enumerate() {
            out.push_str(&format!("  {:>2}. {} ({})\n", rank + 1, word, count));
        }
    }

    out
}

/// Prints the summary to stdout
pub fn print_summary(report: &CrawlReport) {
    print!("{}", format_summary(report));
}
