//! StoreLens - store performance analytics
//!
//! # Usage
//!
//! ```bash
//! # Headline metrics, sales series and top products for a store
//! storelens --config storelens.toml analytics store-1
//! storelens analytics store-1 --range 2026-01-11,2026-01-20 --compare previous_period
//! storelens analytics store-1 --benchmark ref_2 --today 2026-04-01
//!
//! # Daily sessions
//! storelens sessions store-1 --range 2026-01-01,2026-01-31
//!
//! # Success tiers
//! storelens success store-1
//! storelens success --all
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storelens_config::{Config, LogConfig, LogFormat, LogLevel};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// StoreLens - store performance analytics
#[derive(Parser, Debug)]
#[command(name = "storelens")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Metrics snapshot file. Overrides [query] path.
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store analytics with optional comparison and benchmark
    Analytics(cmd::analytics::AnalyticsArgs),

    /// Daily sessions and conversion rates of a store
    Sessions(cmd::sessions::SessionsArgs),

    /// Success tiers of one store or all stores
    Success(cmd::success::SuccessArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, cli.data, cli.log_level);
    init_logging(&config.log)?;

    match cli.command {
        Command::Analytics(args) => cmd::analytics::run(args, &config).await,
        Command::Sessions(args) => cmd::sessions::run(args, &config).await,
        Command::Success(args) => cmd::success::run(args, &config).await,
    }
}

/// Load the config file, or defaults when none is given
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Global flags win over the config file
fn apply_overrides(config: &mut Config, data: Option<PathBuf>, log_level: Option<LogLevel>) {
    if let Some(data) = data {
        config.query.path = Some(data);
    }
    if let Some(level) = log_level {
        config.log.level = level;
    }
}

/// Initialize the tracing subscriber, writing to stderr
fn init_logging(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(log.filter_directive())
        .map_err(|e| anyhow::anyhow!("invalid log filter: {}", e))?;

    let registry = tracing_subscriber::registry();
    match log.format {
        LogFormat::Console => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    Ok(())
}
