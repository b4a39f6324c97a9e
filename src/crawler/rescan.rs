//! Concurrent re-scan pass
//!
//! Small sites get a second look: every URL visited by the depth-first phase
//! is analyzed again on a bounded pool of workers. Links found by a re-scan go
//! through the normal guarded crawl, so nothing is fetched twice by that route.

use crate::config::RescanMode;
use crate::crawler::coordinator::Coordinator;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Outcome of a re-scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescanSummary {
    /// Number of URLs handed to the pool
    pub scheduled: usize,

    /// Workers that ended abnormally (panicked)
    pub failed: usize,
}

/// Whether the pass should run for a site that produced `visited` URLs
pub fn should_rescan(coordinator: &Coordinator, visited: usize) -> bool {
    let crawler = &coordinator.config().crawler;

    match crawler.rescan {
        RescanMode::Off => {
            tracing::debug!("Re-scan disabled");
            false
        }
        RescanMode::Reanalyze if visited >= crawler.rescan_threshold => {
            tracing::debug!(
                "Skipping re-scan: {} URLs visited (threshold {})",
                visited,
                crawler.rescan_threshold
            );
            false
        }
        RescanMode::Reanalyze if crawler.rescan_depth > crawler.max_depth => {
            tracing::debug!(
                "Skipping re-scan: depth {} exceeds max depth {}",
                crawler.rescan_depth,
                crawler.max_depth
            );
            false
        }
        RescanMode::Reanalyze => true,
    }
}

/// Re-analyzes every visited URL on at most `threads` concurrent workers
///
/// Waits for every worker before returning. Dropping the returned future
/// aborts the pool.
pub async fn rescan(coordinator: &Coordinator) -> RescanSummary {
    let state = coordinator.state();
    let visited = state.visited.len();

    if !should_rescan(coordinator, visited) {
        return RescanSummary::default();
    }

    let crawler = &coordinator.config().crawler;
    let depth = crawler.rescan_depth;
    let semaphore = Arc::new(Semaphore::new(crawler.threads as usize));
    let mut tasks = JoinSet::new();
    let mut summary = RescanSummary::default();

    tracing::info!(
        "Re-scanning {} URLs with up to {} workers",
        visited,
        crawler.threads
    );

    for url_str in state.visited.targets() {
        let url = match Url::parse(&url_str) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unparsable visited URL {}: {}", url_str, e);
                continue;
            }
        };

        let worker = coordinator.clone();
        let semaphore = Arc::clone(&semaphore);
        summary.scheduled += 1;

        tasks.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let children = worker.analyze_page(&url, depth).await;
            worker.crawl_from(children, depth + 1).await;
        });
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            tracing::error!("Re-scan worker failed: {}", e);
            summary.failed += 1;
        }
    }

    tracing::info!(
        "Re-scan finished: {} URLs re-analyzed, {} visited in total",
        summary.scheduled - summary.failed,
        state.visited.len()
    );

    summary
}
