//! Query error types

/// Errors that can occur while reading from a metrics store
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Backend not configured
    #[error("backend not configured: {0}")]
    BackendNotConfigured(String),

    /// Connection to the store failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Query execution failed
    #[error("query execution failed: {0}")]
    Execution(String),

    /// A stored row could not be interpreted
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Serialization(err.to_string())
    }
}
