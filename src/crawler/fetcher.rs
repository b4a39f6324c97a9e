//! HTTP fetcher implementation
//!
//! This module handles content acquisition for the crawler:
//! - Building one persistent HTTP client with a browser identification
//! - Timeout-bounded GET requests with error classification
//! - Falling back to the headless renderer when a page looks script-built

use crate::config::FetcherConfig;
use crate::crawler::render::Renderer;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of a primary fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body decode, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use wordforge::config::FetcherConfig;
/// use wordforge::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.request_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success |
/// | Any other status | HttpError |
/// | Timeout / connect / body error | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Content of one page together with the URL it was served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects; relative links on the page resolve against it
    pub url: Url,

    /// Page HTML, empty when nothing could be fetched
    pub content: String,
}

impl FetchedPage {
    fn empty(url: &Url) -> Self {
        Self {
            url: url.clone(),
            content: String::new(),
        }
    }
}

/// Acquires page content, never failing
///
/// Cloning is cheap: the HTTP client and the renderer handle are shared.
#[derive(Clone)]
pub struct ContentFetcher {
    client: Client,
    renderer: Option<Arc<dyn Renderer>>,
    render_threshold: usize,
}

impl ContentFetcher {
    /// Creates a fetcher; `renderer` is `None` in degraded mode
    pub fn new(
        config: &FetcherConfig,
        renderer: Option<Arc<dyn Renderer>>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            renderer,
            render_threshold: config.render_threshold,
        })
    }

    /// Whether the rendering fallback is available for this run
    pub fn can_render(&self) -> bool {
        self.renderer.is_some()
    }

    /// Returns the page content, or an empty string when nothing could be fetched
    pub async fn fetch(&self, url: &Url) -> String {
        self.fetch_page(url).await.content
    }

    /// Fetches `url`, falling back to the renderer for script-built pages
    pub async fn fetch_page(&self, url: &Url) -> FetchedPage {
        let (served_from, content) = match fetch_url(&self.client, url.as_str()).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!("Fetched {} (HTTP {}, final URL {})", url, status_code, final_url);
                let served_from = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
                (served_from, body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to fetch {}: HTTP {}", url, status_code);
                return FetchedPage::empty(url);
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                return FetchedPage::empty(url);
            }
        };

        let content = self.render_if_sparse(url, content).await;
        FetchedPage {
            url: served_from,
            content,
        }
    }

    async fn render_if_sparse(&self, url: &Url, content: String) -> String {
        if content.chars().count() >= self.render_threshold {
            return content;
        }

        let Some(renderer) = &self.renderer else {
            return content;
        };

        tracing::info!("Using renderer for script-heavy page: {}", url);
        match renderer.render(url).await {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::debug!("Rendering {} failed, keeping primary content: {}", url, e);
                content
            }
        }
    }

    /// Releases the renderer, if any
    pub async fn shutdown(&self) {
        if let Some(renderer) = &self.renderer {
            renderer.shutdown().await;
        }
    }
}
