use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, FetcherConfig, OutputConfig};
use crate::{ConfigError, ConfigResult};

/// Upper bound on the re-scan worker pool
const MAX_THREADS: u32 = 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_extraction_config(&config.extraction)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.threads < 1 || config.threads > MAX_THREADS {
        return Err(ConfigError::Validation(format!(
            "threads must be between 1 and {}, got {}",
            MAX_THREADS, config.threads
        )));
    }

    if config.rescan_depth > config.max_depth && config.max_depth > 0 {
        return Err(ConfigError::Validation(format!(
            "rescan_depth ({}) cannot exceed max_depth ({})",
            config.rescan_depth, config.max_depth
        )));
    }

    Ok(())
}

/// Validates content fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout must be at least 1 second".to_string(),
        ));
    }

    if config.render_timeout == 0 {
        return Err(ConfigError::Validation(
            "render_timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates extraction configuration
fn validate_extraction_config(config: &ExtractionConfig) -> ConfigResult<()> {
    if config.min_word_length < 1 {
        return Err(ConfigError::Validation(format!(
            "min_word_length must be >= 1, got {}",
            config.min_word_length
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if let Some(basename) = &config.basename {
        if basename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "basename cannot be empty when set".to_string(),
            ));
        }
        if basename.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "basename must name a file prefix, not a directory: '{}'",
                basename
            )));
        }
    }

    Ok(())
}
