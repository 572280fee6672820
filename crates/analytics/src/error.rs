//! Analytics error types

use thiserror::Error;

/// Analytics errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Invalid date range
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// Unknown comparison period selector
    #[error("invalid comparison period: {0}")]
    InvalidComparison(String),

    /// Unknown benchmark period selector
    #[error("invalid benchmark period: {0}")]
    InvalidBenchmark(String),

    /// Backend error (from storelens-query)
    #[error("backend error: {0}")]
    Backend(#[from] storelens_query::QueryError),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
