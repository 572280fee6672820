//! StoreLens Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid config; only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use storelens_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[analytics]\ntop_products = 10").unwrap();
//! assert_eq!(config.analytics.top_products, 10);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//! format = "console"
//!
//! [query]
//! backend = "local"
//! path = "data/snapshot.json"
//!
//! [analytics]
//! default_range_days = 30
//! top_products = 5
//! ```

mod analytics;
mod error;
mod logging;
mod query;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use analytics::AnalyticsConfig;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use query::{DEFAULT_BACKEND, KNOWN_BACKENDS, QueryConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Metrics store access
    pub query: QueryConfig,

    /// Analytics engine settings
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.query.backend(), "local");
        assert_eq!(config.analytics.default_range_days, 30);
        assert_eq!(config.analytics.top_products, 5);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[query]
backend = "local"
path = "data/snapshot.json"

[analytics]
default_range_days = 14
top_products = 3
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.query.path, Some(PathBuf::from("data/snapshot.json")));
        assert_eq!(config.analytics.default_range_days, 14);
        assert_eq!(config.analytics.top_products, 3);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_str("[analytics\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = Config::from_str("[query]\nbackend = \"clickhouse\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                section: "query",
                field: "backend",
                ..
            }
        ));
    }

    #[test]
    fn test_memory_alias_accepted() {
        let config = Config::from_str("[query]\nbackend = \"memory\"").unwrap();
        assert_eq!(config.query.backend(), "memory");
    }

    #[test]
    fn test_zero_top_products_rejected() {
        let err = Config::from_str("[analytics]\ntop_products = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "top_products",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_range_days_rejected() {
        let err = Config::from_str("[analytics]\ndefault_range_days = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "default_range_days",
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_range_days_rejected() {
        let err = Config::from_str("[analytics]\ndefault_range_days = 4000000000").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "default_range_days",
                ..
            }
        ));

        let config = Config::from_str("[analytics]\ndefault_range_days = 36500").unwrap();
        assert_eq!(config.analytics.default_range_days, 36_500);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[analytics]\ntop_products = 8").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.analytics.top_products, 8);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/storelens.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("/nonexistent/storelens.toml"));
    }
}
