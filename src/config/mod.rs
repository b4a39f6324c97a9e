//! Configuration module for Wordforge
//!
//! Settings come from built-in defaults, an optional TOML file, and finally
//! command-line overrides applied by the binary.
//!
//! # Example
//!
//! ```no_run
//! use wordforge::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wordforge.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractionConfig, FetcherConfig, OutputConfig, RescanMode,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
