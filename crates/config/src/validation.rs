//! Configuration validation
//!
//! Validates values serde cannot check on its own:
//! - The query backend is one the CLI can open
//! - Analytics counts are at least 1
//! - The default window stays within `MAX_RANGE_DAYS`

use crate::Config;
use crate::error::{ConfigError, Result};
use crate::query::KNOWN_BACKENDS;

/// Longest default analytics window, in days
pub const MAX_RANGE_DAYS: u32 = 36_500;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_query(config)?;
    validate_analytics(config)?;
    Ok(())
}

fn validate_query(config: &Config) -> Result<()> {
    let backend = config.query.backend();
    if !KNOWN_BACKENDS.contains(&backend) {
        return Err(ConfigError::invalid_value(
            "query",
            "backend",
            format!("unknown backend '{}' (use 'local')", backend),
        ));
    }
    Ok(())
}

fn validate_analytics(config: &Config) -> Result<()> {
    if config.analytics.default_range_days == 0 {
        return Err(ConfigError::invalid_value(
            "analytics",
            "default_range_days",
            "must be at least 1",
        ));
    }
    if config.analytics.default_range_days > MAX_RANGE_DAYS {
        return Err(ConfigError::invalid_value(
            "analytics",
            "default_range_days",
            format!("must be at most {}", MAX_RANGE_DAYS),
        ));
    }
    if config.analytics.top_products == 0 {
        return Err(ConfigError::invalid_value(
            "analytics",
            "top_products",
            "must be at least 1",
        ));
    }
    Ok(())
}
