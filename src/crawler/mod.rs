//! Crawler module for page acquisition and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a headless rendering fallback
//! - HTML parsing feeding the extraction engine
//! - The depth-first crawl and the concurrent re-scan pass
//! - Run orchestration with interrupt handling

mod coordinator;
mod fetcher;
mod parser;
mod render;
mod rescan;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, ContentFetcher, FetchResult, FetchedPage};
pub use parser::{collapse_whitespace, parse_page, visible_text, ParsedPage};
pub use render::{launch_renderer, ChromeRenderer, RenderError, Renderer};
pub use rescan::{rescan, should_rescan, RescanSummary};

use crate::config::{validate, Config};
use crate::state::CrawlState;
use crate::url::parse_fetch_target;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// How a crawl run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Both phases ran to completion
    Completed,

    /// The operator pressed Ctrl-C
    Interrupted,

    /// Orchestration hit an unexpected failure
    Failed(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Completed => "completed",
            RunStatus::Interrupted => "interrupted",
            RunStatus::Failed(_) => "failed",
        }
    }
}

/// Everything a finished (or stopped) run hands to the output layer
#[derive(Debug)]
pub struct CrawlRun {
    /// Start URL as fetched
    pub target: String,

    /// Collected aggregates, partial when the run did not complete
    pub state: Arc<CrawlState>,

    pub status: RunStatus,

    /// Wall-clock time spent crawling
    pub elapsed: Duration,
}

/// Runs the crawl phases and the re-scan for a single target
async fn crawl_and_rescan(coordinator: &Coordinator, start: &Url) -> RunStatus {
    coordinator.crawl_site(start).await;

    let summary = rescan(coordinator).await;
    if summary.failed > 0 {
        return RunStatus::Failed(format!(
            "{} of {} re-scan workers failed",
            summary.failed, summary.scheduled
        ));
    }

    RunStatus::Completed
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Runs a complete crawl of `target`, stopping early on Ctrl-C
///
/// This is the main entry point for a run. It will:
/// 1. Validate the settings and the target URL
/// 2. Launch the renderer (or continue in degraded mode)
/// 3. Crawl depth-first, then re-scan small sites
/// 4. Stop early on Ctrl-C, keeping what was collected
/// 5. Release the renderer on every path
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `target` - The start URL as given by the operator
///
/// # Returns
///
/// * `Ok(CrawlRun)` - The run ended; check `status` for how
/// * `Err(ForgeError)` - Settings or target are unusable, or the HTTP client could not be built
pub async fn run_crawl(config: Config, target: &str) -> crate::Result<CrawlRun> {
    run_crawl_until(config, target, interrupt_signal()).await
}

/// Same as [`run_crawl`], but stops when `interrupt` resolves instead of on Ctrl-C
pub async fn run_crawl_until<F>(config: Config, target: &str, interrupt: F) -> crate::Result<CrawlRun>
where
    F: Future<Output = ()>,
{
    validate(&config)?;
    let start = parse_fetch_target(target)?;

    let renderer = launch_renderer(&config.fetcher)
        .await
        .map(|r| Arc::new(r) as Arc<dyn Renderer>);

    run_with_renderer(config, start, renderer, interrupt).await
}

async fn run_with_renderer<F>(
    config: Config,
    start: Url,
    renderer: Option<Arc<dyn Renderer>>,
    interrupt: F,
) -> crate::Result<CrawlRun>
where
    F: Future<Output = ()>,
{
    let fetcher = match ContentFetcher::new(&config.fetcher, renderer.clone()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            if let Some(renderer) = renderer {
                renderer.shutdown().await;
            }
            return Err(e.into());
        }
    };

    let coordinator = Coordinator::new(Arc::new(config), fetcher.clone());
    let started = Instant::now();

    let status = tokio::select! {
        status = crawl_and_rescan(&coordinator, &start) => status,
        _ = interrupt => {
            tracing::warn!("Interrupted, stopping crawl");
            RunStatus::Interrupted
        }
    };

    fetcher.shutdown().await;

    let state = coordinator.state();
    let elapsed = started.elapsed();
    tracing::info!(
        "Run {} after {:.1}s: {} URLs visited, {} pages analyzed",
        status.as_str(),
        elapsed.as_secs_f64(),
        state.visited.len(),
        state.pages_analyzed()
    );

    Ok(CrawlRun {
        target: start.to_string(),
        state,
        status,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RescanMode;
    use crate::{ConfigError, ForgeError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct CountingRenderer {
        shutdowns: AtomicUsize,
    }

    #[async_trait]
    impl Renderer for CountingRenderer {
        async fn render(&self, _url: &Url) -> Result<String, RenderError> {
            Err(RenderError::Closed)
        }

        async fn shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.crawler.politeness_delay = 0;
        config.crawler.rescan = RescanMode::Off;
        config
    }

    async fn mount_harbor_site(server: &MockServer, slow_page_delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><p>Harbor charts</p><a href="/tides">Tides</a></body></html>"#,
            ))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tides"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Lighthouse tables</body></html>")
                    .set_delay(slow_page_delay),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_interrupt_keeps_partial_results_and_releases_renderer() {
        let server = MockServer::start().await;
        mount_harbor_site(&server, Duration::from_secs(20)).await;

        let renderer = Arc::new(CountingRenderer::default());
        let start = Url::parse(&format!("{}/", server.uri())).unwrap();
        let run = run_with_renderer(
            quiet_config(),
            start,
            Some(renderer.clone() as Arc<dyn Renderer>),
            tokio::time::sleep(Duration::from_millis(500)),
        )
        .await
        .unwrap();

        assert_eq!(run.status, RunStatus::Interrupted);
        assert!(run.elapsed < Duration::from_secs(10));
        assert_eq!(run.state.pages_analyzed(), 1);
        assert_eq!(run.state.words.get("harbor"), 1);
        assert_eq!(run.state.words.get("lighthouse"), 0);
        assert_eq!(run.state.visited.len(), 2);
        assert_eq!(renderer.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_completed_run_releases_renderer() {
        let server = MockServer::start().await;
        mount_harbor_site(&server, Duration::ZERO).await;

        let renderer = Arc::new(CountingRenderer::default());
        let start = Url::parse(&format!("{}/", server.uri())).unwrap();
        let run = run_with_renderer(
            quiet_config(),
            start,
            Some(renderer.clone() as Arc<dyn Renderer>),
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.state.words.get("lighthouse"), 1);
        assert_eq!(renderer.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_settings_fail_before_crawling() {
        let mut config = quiet_config();
        config.crawler.threads = 0;

        let result = run_crawl_until(config, "http://example.com/", std::future::pending()).await;
        assert!(matches!(
            result,
            Err(ForgeError::Config(ConfigError::Validation(_)))
        ));
    }
}
