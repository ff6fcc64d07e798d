//! Configuration Module
//!
//! Loads server and cache settings from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Default payload limit for a single cached file (1 MiB)
pub const DEFAULT_MAX_ENTRY_BYTES: usize = 1024 * 1024;

// == Config Error ==
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of files the cache can hold
    pub cache_capacity: usize,
    /// Pre-allocation hint for the cache maps
    pub cache_reserved_hint: usize,
    /// Files larger than this bypass the cache; None means no limit
    pub cache_max_entry_bytes: Option<usize>,
    /// HTTP server port
    pub server_port: u16,
    /// Directory static files are served from
    pub server_root: PathBuf,
    /// Directory holding the 404 page and uploaded files
    pub server_files: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached files (default: 10)
    /// - `CACHE_RESERVED_HINT` - Pre-allocated cache slots (default: 0)
    /// - `CACHE_MAX_ENTRY_BYTES` - Largest cacheable file, 0 = unlimited (default: 1 MiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3490)
    /// - `SERVER_ROOT` - Static file root (default: ./serverroot)
    /// - `SERVER_FILES` - 404 page and upload directory (default: ./serverfiles)
    ///
    /// # Errors
    /// A variable that is set but unparsable (e.g. a negative capacity) is
    /// rejected rather than replaced by its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_entry_bytes: usize =
            parse_var("CACHE_MAX_ENTRY_BYTES", DEFAULT_MAX_ENTRY_BYTES)?;

        Ok(Self {
            cache_capacity: parse_var("CACHE_CAPACITY", defaults.cache_capacity)?,
            cache_reserved_hint: parse_var("CACHE_RESERVED_HINT", defaults.cache_reserved_hint)?,
            cache_max_entry_bytes: (max_entry_bytes > 0).then_some(max_entry_bytes),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            server_root: env::var_os("SERVER_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.server_root),
            server_files: env::var_os("SERVER_FILES")
                .map(PathBuf::from)
                .unwrap_or(defaults.server_files),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 10,
            cache_reserved_hint: 0,
            cache_max_entry_bytes: Some(DEFAULT_MAX_ENTRY_BYTES),
            server_port: 3490,
            server_root: PathBuf::from("./serverroot"),
            server_files: PathBuf::from("./serverfiles"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.cache_reserved_hint, 0);
        assert_eq!(config.cache_max_entry_bytes, Some(DEFAULT_MAX_ENTRY_BYTES));
        assert_eq!(config.server_port, 3490);
        assert_eq!(config.server_root, PathBuf::from("./serverroot"));
    }

    #[test]
    fn test_parse_value_accepts_numbers() {
        assert_eq!(parse_value::<usize>("CACHE_CAPACITY", "25"), Ok(25));
        assert_eq!(parse_value::<usize>("CACHE_CAPACITY", " 0 "), Ok(0));
        assert_eq!(parse_value::<u16>("SERVER_PORT", "8080"), Ok(8080));
    }

    #[test]
    fn test_parse_value_rejects_negative_capacity() {
        let err = parse_value::<usize>("CACHE_CAPACITY", "-1").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "CACHE_CAPACITY",
                value: "-1".to_string()
            }
        );
        assert!(err.to_string().contains("CACHE_CAPACITY"));
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert!(parse_value::<u16>("SERVER_PORT", "http").is_err());
        assert!(parse_value::<u16>("SERVER_PORT", "70000").is_err());
    }
}
