//! Wordforge: a site crawler that forges wordlists
//!
//! This crate crawls a website inside its own host boundary and turns what it
//! reads into reconnaissance material: frequency-ranked wordlists, derived
//! password/username/path lists, contact entities and structured metadata.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Errors that stop a run before any crawling happens
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Wordforge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use state::CrawlState;
pub use url::{canonicalize_url, should_follow};
