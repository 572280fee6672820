//! StoreLens Analytics Engine
//!
//! Store performance analytics on top of `storelens-query`.
//!
//! # Overview
//!
//! - **Date ranges**: inclusive calendar ranges, comparison and benchmark
//!   period resolution
//! - **Time series**: granularity selection and gap-free calendar buckets
//! - **Metrics**: period aggregates, period-over-period changes, top products,
//!   session series
//! - **Success**: threshold tiers for revenue growth over a store's
//!   reference period
//!
//! # Usage
//!
//! ```ignore
//! use storelens_analytics::{AnalyticsRequest, CompareMode, DateRange, MetricsEngine};
//!
//! let engine = MetricsEngine::new(Box::new(backend));
//! let request = AnalyticsRequest::new("store-1")
//!     .with_range(DateRange::parse("2026-01-11,2026-01-20")?)
//!     .with_compare(CompareMode::PreviousPeriod);
//!
//! let analytics = engine.store_analytics(&request, today).await?;
//! println!("Revenue: {}", analytics.total_revenue);
//! ```

pub mod error;
pub mod metrics;
pub mod period;
pub mod success;
pub mod timerange;
pub mod timeseries;

#[cfg(test)]
mod success_test;
#[cfg(test)]
mod timeseries_test;

// Re-exports for convenience
pub use error::{AnalyticsError, Result};
pub use metrics::{
    AnalyticsRequest, BenchmarkResult, ComparisonResult, ComparisonValues, DEFAULT_RANGE_DAYS,
    DEFAULT_TOP_PRODUCTS, EngineSettings, MetricChanges, MetricsEngine, PeriodAggregate,
    ProductRanking, SessionMetrics, SessionPoint, StoreAnalytics, percentage_change,
};
pub use period::{BenchmarkOffset, CompareMode, benchmark_range, comparison_range};
pub use success::{
    StoreFailure, SuccessOutcome, SuccessReport, SuccessStatus, ThresholdTable, Thresholds, Tier,
    success_periods,
};
pub use timerange::DateRange;
pub use timeseries::{BucketPoint, Granularity, bucketize};
