//! Analytics command - headline metrics of a store
//!
//! # Usage
//!
//! ```bash
//! storelens analytics store-1
//! storelens analytics store-1 --range 2026-01-11,2026-01-20 --compare previous_period
//! storelens analytics store-1 --compare last_year --benchmark ref_1
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use storelens_analytics::{AnalyticsRequest, BenchmarkOffset, CompareMode, DateRange};
use storelens_config::Config;

use super::{open_engine, print_json, today_or_now};

/// Analytics command arguments
#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Store ID
    pub store: String,

    /// Date range (YYYY-MM-DD,YYYY-MM-DD). Default: the trailing
    /// `default_range_days` ending today
    #[arg(short, long)]
    pub range: Option<DateRange>,

    /// Comparison period (previous_period, last_month, last_year, none)
    #[arg(short = 'C', long)]
    pub compare: Option<String>,

    /// Benchmark period from the store's reference period (ref, ref_1, ref_2, ref_3)
    #[arg(short, long, default_value = "ref")]
    pub benchmark: BenchmarkOffset,

    /// Date treated as today (YYYY-MM-DD)
    #[arg(short, long)]
    pub today: Option<NaiveDate>,
}

impl AnalyticsArgs {
    /// Build the engine request
    pub fn request(&self) -> Result<AnalyticsRequest> {
        let mut request =
            AnalyticsRequest::new(self.store.clone()).with_benchmark(self.benchmark);

        if let Some(range) = self.range {
            request = request.with_range(range);
        }

        let compare = match &self.compare {
            Some(s) => CompareMode::parse_optional(s).context("invalid compare mode")?,
            None => None,
        };
        if let Some(compare) = compare {
            request = request.with_compare(compare);
        }

        Ok(request)
    }
}

/// Run the analytics command
pub async fn run(args: AnalyticsArgs, config: &Config) -> Result<()> {
    let engine = open_engine(config)?;
    let request = args.request()?;
    let today = today_or_now(args.today);

    let analytics = engine
        .store_analytics(&request, today)
        .await
        .with_context(|| format!("analytics failed for store {}", request.store_id))?;

    tracing::debug!(
        store_id = %request.store_id,
        range = %analytics.range,
        granularity = %analytics.granularity,
        "analytics computed"
    );

    print_json(&analytics)
}
