//! Query backend configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Backend used when none is configured
pub const DEFAULT_BACKEND: &str = "local";

/// Backends the CLI can open
pub const KNOWN_BACKENDS: &[&str] = &["local", "memory"];

/// Query configuration
///
/// # Example
///
/// ```toml
/// [query]
/// backend = "local"
/// path = "data/snapshot.json"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    /// Backend name
    /// Default: "local"
    pub backend: Option<String>,

    /// Snapshot file of the local backend
    pub path: Option<PathBuf>,
}

impl QueryConfig {
    /// Effective backend name
    pub fn backend(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Snapshot path, if configured
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
