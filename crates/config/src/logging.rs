//! Logging configuration
//!
//! The CLI writes diagnostics to stderr so stdout stays pure JSON. The
//! configured level applies to the StoreLens crates; dependencies are held at
//! `warn` so a `debug` run shows engine detail without runtime noise.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Crates whose events follow the configured level
pub const WORKSPACE_TARGETS: &[&str] = &[
    "storelens",
    "storelens_analytics",
    "storelens_config",
    "storelens_query",
];

/// Level applied to every other target
const DEPENDENCY_LEVEL: LogLevel = LogLevel::Warn;

/// Log level
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    /// Resolved ranges, backend names, snapshot loads
    Debug,
    #[default]
    Info,
    /// Stores skipped by a batch classification
    Warn,
    Error,
}

impl LogLevel {
    /// Name as used in filter directives
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::invalid_value(
                "log",
                "level",
                format!("unknown level '{}' (use trace, debug, info, warn, error)", other),
            )),
        }
    }
}

/// Format of stderr log lines
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Console,
    /// One JSON object per line, for piping into log collectors
    Json,
}

/// `[log]` section
///
/// ```toml
/// [log]
/// level = "debug"
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LogConfig {
    /// `EnvFilter` directive: the configured level for workspace crates,
    /// `warn` for everything else. A level quieter than `warn` applies to
    /// everything.
    pub fn filter_directive(&self) -> String {
        let base = self.level.max(DEPENDENCY_LEVEL);
        let mut directive = base.as_str().to_string();
        for target in WORKSPACE_TARGETS {
            directive.push_str(&format!(",{}={}", target, self.level));
        }
        directive
    }
}
