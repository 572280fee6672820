//! Command implementations for the StoreLens CLI

pub mod analytics;
pub mod sessions;
pub mod success;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use storelens_analytics::{EngineSettings, MetricsEngine};
use storelens_config::Config;
use storelens_query::QueryEngine;

/// Open the configured backend and wrap it in a metrics engine
pub fn open_engine(config: &Config) -> Result<MetricsEngine> {
    let query_engine = QueryEngine::open(config.query.backend(), config.query.path())
        .context("failed to create query engine")?;

    tracing::debug!(backend = query_engine.backend_name(), "opened metrics store");

    Ok(MetricsEngine::new(Box::new(query_engine)).with_settings(settings(config)))
}

/// Engine settings from the `[analytics]` section
pub fn settings(config: &Config) -> EngineSettings {
    EngineSettings {
        default_range_days: config.analytics.default_range_days,
        top_products: config.analytics.top_products,
    }
}

/// The `--today` override, or the local calendar date
pub fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Print a value to stdout as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
