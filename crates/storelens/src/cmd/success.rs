//! Success command - revenue growth tiers
//!
//! # Usage
//!
//! ```bash
//! storelens success store-1
//! storelens success --all --today 2026-04-01
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use storelens_config::Config;

use super::{open_engine, print_json, today_or_now};

/// Success command arguments
#[derive(Args, Debug)]
pub struct SuccessArgs {
    /// Store ID
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub store: Option<String>,

    /// Classify every store with a reference period
    #[arg(short, long)]
    pub all: bool,

    /// Date treated as today (YYYY-MM-DD)
    #[arg(short, long)]
    pub today: Option<NaiveDate>,
}

/// Run the success command
pub async fn run(args: SuccessArgs, config: &Config) -> Result<()> {
    let engine = open_engine(config)?;
    let today = today_or_now(args.today);

    match args.store {
        Some(store) => {
            let outcome = engine
                .success_status(&store, today)
                .await
                .with_context(|| format!("success status failed for store {}", store))?;
            print_json(&outcome)
        }
        None => {
            let report = engine
                .all_success_statuses(today)
                .await
                .context("success statuses failed")?;

            tracing::info!(
                succeeded = report.succeeded.len(),
                failed = report.failed.len(),
                "classified stores"
            );

            print_json(&report)
        }
    }
}
