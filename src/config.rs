//! Service configuration
//!
//! Read once at startup from the environment.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Path to a JSON array of entries to load at startup
pub const SEED_PATH_VAR: &str = "COOKBOOK_SEED_PATH";

/// Default log directive, combined with RUST_LOG
pub const LOG_VAR: &str = "COOKBOOK_LOG";

const DEFAULT_LOG_DIRECTIVE: &str = "cookbook=info";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Seed file must contain a JSON array of entries")]
    NotAnArray,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub seed_path: Option<PathBuf>,
    pub log_directive: String,
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_path = lookup(SEED_PATH_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let log_directive = lookup(LOG_VAR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());

        Self {
            seed_path,
            log_directive,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Read a seed file of candidate entry records
pub fn read_seed_file(path: &Path) -> Result<Vec<Value>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&text)
}

/// Parse seed text: a JSON array whose elements are validated later, one by one
pub fn parse_seed(text: &str) -> Result<Vec<Value>, ConfigError> {
    match serde_json::from_str(text)? {
        Value::Array(records) => Ok(records),
        _ => Err(ConfigError::NotAnArray),
    }
}
