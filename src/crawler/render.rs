//! Headless rendering fallback
//!
//! Pages whose HTML is mostly an empty shell get loaded in headless Chrome so
//! their scripts can build the document. A missing or broken browser is never
//! fatal: the run simply continues without the fallback.

use crate::config::FetcherConfig;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

/// Errors raised by a renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page load timed out after {0:?}")]
    Timeout(Duration),

    #[error("Renderer has been shut down")]
    Closed,
}

/// A capability that executes a page's scripts and returns the resulting HTML
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Loads `url`, lets scripts settle and returns the rendered document
    async fn render(&self, url: &Url) -> Result<String, RenderError>;

    /// Releases the underlying engine; later `render` calls fail with `Closed`
    async fn shutdown(&self);
}

/// Renderer backed by a headless Chrome instance
pub struct ChromeRenderer {
    browser: RwLock<Option<Browser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
    page_load_timeout: Duration,
    settle: Duration,
}

impl ChromeRenderer {
    /// Launches headless Chrome
    ///
    /// # Returns
    ///
    /// * `Ok(ChromeRenderer)` - Browser is up and its event handler is running
    /// * `Err(RenderError::Launch)` - No usable browser; callers fall back to degraded mode
    pub async fn launch(config: &FetcherConfig) -> Result<Self, RenderError> {
        let page_load_timeout = Duration::from_secs(config.render_timeout);

        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1920, 1080)
            .request_timeout(page_load_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", config.user_agent))
            .build()
            .map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The handler must be polled for the browser connection to make progress
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::info!("Headless renderer ready");

        Ok(Self {
            browser: RwLock::new(Some(browser)),
            handler: Mutex::new(Some(handle)),
            page_load_timeout,
            settle: Duration::from_millis(config.render_settle),
        })
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, url: &Url) -> Result<String, RenderError> {
        let guard = self.browser.read().await;
        let browser = guard.as_ref().ok_or(RenderError::Closed)?;

        // Navigation runs inside load_in_tab, which always closes the tab
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        let tab = page.clone();
        let settle = self.settle;
        let load = async {
            tab.goto(url.as_str())
                .await
                .map_err(|e| RenderError::Navigation(e.to_string()))?;
            tokio::time::sleep(settle).await;
            tab.content()
                .await
                .map_err(|e| RenderError::Navigation(e.to_string()))
        };

        load_in_tab(self.page_load_timeout, load, || async move {
            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close rendered page {}: {}", url, e);
            }
        })
        .await
    }

    async fn shutdown(&self) {
        let browser = self.browser.write().await.take();
        if let Some(mut browser) = browser {
            if let Err(e) = browser.close().await {
                tracing::warn!("Failed to close browser cleanly: {}", e);
            }
            if let Err(e) = browser.wait().await {
                tracing::debug!("Browser process did not exit cleanly: {}", e);
            }
            tracing::info!("Headless renderer shut down");
        }

        let handle = self
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

/// Bounds `load` by `limit`, then closes the tab whether it loaded, failed or timed out
async fn load_in_tab<L, C, F>(limit: Duration, load: L, close: C) -> Result<String, RenderError>
where
    L: Future<Output = Result<String, RenderError>>,
    C: FnOnce() -> F,
    F: Future<Output = ()>,
{
    let outcome = match tokio::time::timeout(limit, load).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::Timeout(limit)),
    };
    close().await;
    outcome
}

/// Launches the renderer when enabled, degrading to `None` on any failure
pub async fn launch_renderer(config: &FetcherConfig) -> Option<ChromeRenderer> {
    if !config.render {
        tracing::info!("Rendering fallback disabled");
        return None;
    }

    match ChromeRenderer::launch(config).await {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            tracing::warn!("Renderer setup failed, continuing without it: {}", e);
            None
        }
    }
}
