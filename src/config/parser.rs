//! Settings file loading
//!
//! A settings file is read once; the same bytes are parsed and fingerprinted,
//! so the fingerprint printed at startup always names the settings in effect.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a wordforge settings file
///
/// Sections and keys left out of the file keep their built-in defaults.
///
/// ```no_run
/// use std::path::Path;
/// use wordforge::config::load_config;
///
/// let config = load_config(Path::new("wordforge.toml")).unwrap();
/// assert!(config.crawler.threads >= 1);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// Hex SHA-256 fingerprint of a settings file
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let raw = std::fs::read(path)?;
    Ok(fingerprint(&raw))
}

/// Loads a settings file together with the fingerprint of exactly what was parsed
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let raw = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    validate(&config)?;

    let hash = fingerprint(raw.as_bytes());
    tracing::debug!("Settings from {} parsed, fingerprint {}", path.display(), hash);
    Ok((config, hash))
}

fn fingerprint(raw: &[u8]) -> String {
    hex::encode(Sha256::digest(raw))
}
