use serde::Deserialize;

/// Browser identification sent with every primary fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Wordforge
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the start URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Worker pool size for the re-scan pass
    pub threads: u32,

    /// Pause before each child fetch (milliseconds)
    #[serde(rename = "politeness-delay")]
    pub politeness_delay: u64,

    /// What the re-scan pass does after the depth-first traversal
    pub rescan: RescanMode,

    /// The re-scan pass only runs when fewer URLs than this were visited
    #[serde(rename = "rescan-threshold")]
    pub rescan_threshold: usize,

    /// Depth every re-scanned URL is treated as
    #[serde(rename = "rescan-depth")]
    pub rescan_depth: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            threads: 10,
            politeness_delay: 1000,
            rescan: RescanMode::Reanalyze,
            rescan_threshold: 50,
            rescan_depth: 1,
        }
    }
}

/// Policy for the concurrent re-scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RescanMode {
    /// Re-run page analysis on every visited URL, counting its words again
    Reanalyze,
    /// Skip the pass entirely
    Off,
}

/// Content acquisition configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header for the HTTP client
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Primary GET timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Whether to launch the headless renderer at startup
    pub render: bool,

    /// Pages shorter than this many characters are rendered
    #[serde(rename = "render-threshold")]
    pub render_threshold: usize,

    /// Page-load timeout for the renderer (seconds)
    #[serde(rename = "render-timeout")]
    pub render_timeout: u64,

    /// Wait after navigation for scripts to settle (milliseconds)
    #[serde(rename = "render-settle")]
    pub render_settle: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: 10,
            render: true,
            render_threshold: 1000,
            render_timeout: 30,
            render_settle: 2000,
        }
    }
}

/// Token extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Shortest token kept in the word frequency map
    #[serde(rename = "min-word-length")]
    pub min_word_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { min_word_length: 3 }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base path for every output file; derived from the target when unset
    pub basename: Option<String>,
}
