//! Crawler coordinator - depth-first crawl orchestration
//!
//! This module contains the crawl loop that ties together:
//! - The visited set guarding every fetch
//! - Content acquisition through the [`ContentFetcher`]
//! - Parsing and extraction into the shared [`CrawlState`]
//! - Link filtering and depth bookkeeping for discovered links

use crate::config::Config;
use crate::crawler::fetcher::ContentFetcher;
use crate::crawler::parser::parse_page;
use crate::state::CrawlState;
use crate::url::{follow_target, same_host, visit_key};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main crawler coordinator structure
///
/// Cloning is cheap and every clone shares the same state, which is how the
/// re-scan workers get their handle.
#[derive(Clone)]
pub struct Coordinator {
    config: Arc<Config>,
    state: Arc<CrawlState>,
    fetcher: ContentFetcher,
}

impl Coordinator {
    /// Creates a new coordinator with fresh run state
    pub fn new(config: Arc<Config>, fetcher: ContentFetcher) -> Self {
        Self::with_state(config, fetcher, Arc::new(CrawlState::new()))
    }

    /// Creates a coordinator writing into existing run state
    pub fn with_state(config: Arc<Config>, fetcher: ContentFetcher, state: Arc<CrawlState>) -> Self {
        Self {
            config,
            state,
            fetcher,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the run state
    pub fn state(&self) -> Arc<CrawlState> {
        Arc::clone(&self.state)
    }

    /// Runs the depth-first traversal from the start URL
    ///
    /// The start URL is never link-filtered; only discovered children are.
    pub async fn crawl_site(&self, start: &Url) {
        tracing::info!("Starting analysis of: {}", start);
        self.crawl_from(vec![start.clone()], 0).await;
        tracing::info!(
            "Depth-first crawl finished: {} URLs visited",
            self.state.visited.len()
        );
    }

    /// Guarded traversal of `seeds` (all at `depth`) and everything they lead to
    ///
    /// Uses an explicit stack of `(url, depth)` pairs. Children are pushed in
    /// reverse so they are visited in document order, matching a recursive
    /// depth-first walk.
    pub async fn crawl_from(&self, seeds: Vec<Url>, depth: u32) {
        let mut worklist: Vec<(Url, u32)> = seeds.into_iter().rev().map(|u| (u, depth)).collect();

        while let Some((url, depth)) = worklist.pop() {
            if depth > self.config.crawler.max_depth {
                continue;
            }

            let Some(key) = visit_key(&url) else {
                tracing::debug!("Skipping uncrawlable URL: {}", url);
                continue;
            };
            if !self.state.visited.claim(&key, url.as_str()) {
                tracing::trace!("Already visited: {}", url);
                continue;
            }

            if depth > 0 {
                self.politeness_pause().await;
            }

            let children = self.analyze_page(&url, depth).await;
            worklist.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }

    /// Unguarded per-page analysis
    ///
    /// Fetches, parses and extracts `url`, folds the results into the run state
    /// and returns the approved links to follow, resolved against the URL the
    /// page was finally served from. Returns nothing when the fetch came back
    /// empty or `depth` leaves no room for children.
    pub async fn analyze_page(&self, url: &Url, depth: u32) -> Vec<Url> {
        let max_depth = self.config.crawler.max_depth;
        if depth > max_depth {
            return Vec::new();
        }

        tracing::info!("Analyzing [{}]: {}", depth, url);

        let page = self.fetcher.fetch_page(url).await;
        if page.content.is_empty() {
            return Vec::new();
        }

        let parsed = parse_page(&page.content, self.config.extraction.min_word_length);
        tracing::debug!(
            "{}: title={:?}, {} words, {} links",
            url,
            parsed.title,
            parsed.extraction.words.len(),
            parsed.links.len()
        );

        self.state.absorb(&parsed.extraction);

        if depth >= max_depth {
            return Vec::new();
        }

        if !same_host(&page.url, url) {
            tracing::debug!("{} redirected off-site to {}, not following its links", url, page.url);
            return Vec::new();
        }

        parsed
            .links
            .iter()
            .filter_map(|href| follow_target(href, &page.url))
            .collect()
    }

    async fn politeness_pause(&self) {
        let delay = self.config.crawler.politeness_delay;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}
