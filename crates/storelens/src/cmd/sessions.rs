//! Sessions command - daily sessions of a store

use anyhow::{Context, Result};
use clap::Args;
use storelens_analytics::DateRange;
use storelens_config::Config;

use super::{open_engine, print_json};

/// Sessions command arguments
#[derive(Args, Debug)]
pub struct SessionsArgs {
    /// Store ID
    pub store: String,

    /// Date range (YYYY-MM-DD,YYYY-MM-DD). Default: every stored day
    #[arg(short, long)]
    pub range: Option<DateRange>,
}

/// Run the sessions command
pub async fn run(args: SessionsArgs, config: &Config) -> Result<()> {
    let engine = open_engine(config)?;

    let metrics = engine
        .session_metrics(&args.store, args.range.as_ref())
        .await
        .with_context(|| format!("session metrics failed for store {}", args.store))?;

    tracing::debug!(
        store_id = %args.store,
        days = metrics.sessions.len(),
        total_sessions = metrics.total_sessions(),
        "session metrics loaded"
    );

    print_json(&metrics)
}
