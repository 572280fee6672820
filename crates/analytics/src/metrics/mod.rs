//! Metrics engine for store analytics
//!
//! Provides the store-level views the dashboard renders:
//!
//! - **aggregate**: summed revenue, orders and sessions with derived AOV and
//!   conversion rate
//! - **comparison**: percent changes against comparison and benchmark periods
//! - **top**: best-selling products
//! - **sessions**: per-day session series

pub mod aggregate;
pub mod comparison;
pub mod sessions;
pub mod top;

// Re-exports for convenience
pub use aggregate::{PeriodAggregate, round2, safe_div};
pub use comparison::{
    BenchmarkResult, ComparisonResult, ComparisonValues, MetricChanges, percentage_change,
};
pub use sessions::{SessionMetrics, SessionPoint};
pub use top::{DEFAULT_TOP_PRODUCTS, ProductRanking, rank_products};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use storelens_query::MetricsBackend;

use crate::error::Result;
use crate::period::{BenchmarkOffset, CompareMode, benchmark_range, comparison_range};
use crate::timerange::DateRange;
use crate::timeseries::{BucketPoint, Granularity, bucketize};

/// Default span of the primary range when a request has none
pub const DEFAULT_RANGE_DAYS: u32 = 30;

/// Tunables of the metrics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Days covered by the default primary range (`[today - n, today]`)
    pub default_range_days: u32,
    /// Number of ranked products
    pub top_products: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_range_days: DEFAULT_RANGE_DAYS,
            top_products: DEFAULT_TOP_PRODUCTS,
        }
    }
}

/// A store analytics request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsRequest {
    /// Store to report on
    pub store_id: String,
    /// Primary range; the engine's default range when `None`
    pub range: Option<DateRange>,
    /// Comparison period, if any
    pub compare: Option<CompareMode>,
    /// Benchmark offset from the store's reference period
    pub benchmark: BenchmarkOffset,
}

impl AnalyticsRequest {
    /// Request for a store over the default range, no comparison
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            range: None,
            compare: None,
            benchmark: BenchmarkOffset::default(),
        }
    }

    /// Set the primary range
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Set the comparison period
    pub fn with_compare(mut self, compare: CompareMode) -> Self {
        self.compare = Some(compare);
        self
    }

    /// Set the benchmark offset
    pub fn with_benchmark(mut self, benchmark: BenchmarkOffset) -> Self {
        self.benchmark = benchmark;
        self
    }
}

/// Combined analytics of a store over the primary range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnalytics {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    /// Rounded to 2 decimal places
    pub average_order_value: Decimal,
    pub total_sessions: u64,
    /// Percentage, rounded to 2 decimal places
    pub conversion_rate: Decimal,
    pub comparison: Option<ComparisonResult>,
    pub benchmark: Option<BenchmarkResult>,
    pub sales_over_time: Vec<BucketPoint>,
    pub top_products: Vec<ProductRanking>,
    /// Resolved primary range
    #[serde(skip)]
    pub range: DateRange,
    /// Granularity of `sales_over_time`
    #[serde(skip)]
    pub granularity: Granularity,
}

/// Metrics engine for executing analytics queries
pub struct MetricsEngine {
    backend: Box<dyn MetricsBackend>,
    settings: EngineSettings,
}

impl MetricsEngine {
    /// Create a new metrics engine with a backend
    pub fn new(backend: Box<dyn MetricsBackend>) -> Self {
        Self {
            backend,
            settings: EngineSettings::default(),
        }
    }

    /// Replace the engine settings
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Get a reference to the underlying backend
    pub fn backend(&self) -> &dyn MetricsBackend {
        self.backend.as_ref()
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Current settings
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The primary range of a request, defaulting to the trailing window
    /// ending `today`
    pub fn primary_range(
        &self,
        request: &AnalyticsRequest,
        today: NaiveDate,
    ) -> Result<DateRange> {
        match request.range {
            Some(range) => Ok(range),
            None => DateRange::trailing_days(today, self.settings.default_range_days),
        }
    }

    /// Full analytics of a store
    ///
    /// Resolves the comparison and benchmark ranges, then fetches the
    /// aggregates, the sales series and the top products concurrently. Any
    /// backend failure fails the whole request.
    pub async fn store_analytics(
        &self,
        request: &AnalyticsRequest,
        today: NaiveDate,
    ) -> Result<StoreAnalytics> {
        let store_id = request.store_id.as_str();
        let range = self.primary_range(request, today)?;

        let reference = self.backend.fetch_reference_period(store_id).await?;
        let compare_to = comparison_range(&range, request.compare);
        let benchmark_to = benchmark_range(&reference, request.benchmark);

        tracing::debug!(
            store_id = store_id,
            range = %range,
            comparison = ?compare_to,
            benchmark = ?benchmark_to,
            backend = self.backend.name(),
            "resolved analytics ranges"
        );

        let (current, comparison, benchmark, sales_over_time, top_products) = tokio::try_join!(
            self.period_aggregate(store_id, &range),
            self.optional_aggregate(store_id, compare_to.as_ref()),
            self.optional_aggregate(store_id, benchmark_to.as_ref()),
            self.sales_over_time(store_id, &range),
            self.top_products(store_id, &range),
        )?;

        let comparison = comparison
            .zip(compare_to)
            .map(|(previous, r)| ComparisonResult::new(&current, &previous, r));
        let benchmark = benchmark.map(|b| BenchmarkResult::new(&current, &b));

        Ok(StoreAnalytics {
            total_revenue: current.revenue,
            total_orders: current.orders,
            average_order_value: round2(current.average_order_value),
            total_sessions: current.sessions,
            conversion_rate: round2(current.conversion_rate_percent),
            comparison,
            benchmark,
            sales_over_time,
            top_products,
            range,
            granularity: Granularity::for_range(&range),
        })
    }

    /// Aggregate of a store over a range
    pub async fn period_aggregate(
        &self,
        store_id: &str,
        range: &DateRange,
    ) -> Result<PeriodAggregate> {
        aggregate::fetch_period_aggregate(self.backend.as_ref(), store_id, range).await
    }

    async fn optional_aggregate(
        &self,
        store_id: &str,
        range: Option<&DateRange>,
    ) -> Result<Option<PeriodAggregate>> {
        match range {
            Some(range) => self.period_aggregate(store_id, range).await.map(Some),
            None => Ok(None),
        }
    }

    /// Revenue of a store over a range, gap-filled into calendar buckets
    pub async fn sales_over_time(
        &self,
        store_id: &str,
        range: &DateRange,
    ) -> Result<Vec<BucketPoint>> {
        let points = self
            .backend
            .fetch_daily_revenue(store_id, range.window())
            .await?;
        Ok(bucketize(range, &points))
    }

    /// Best-selling products of a store over a range
    pub async fn top_products(
        &self,
        store_id: &str,
        range: &DateRange,
    ) -> Result<Vec<ProductRanking>> {
        top::fetch_top_products(
            self.backend.as_ref(),
            store_id,
            range,
            self.settings.top_products,
        )
        .await
    }

    /// Per-day session series of a store
    pub async fn session_metrics(
        &self,
        store_id: &str,
        range: Option<&DateRange>,
    ) -> Result<SessionMetrics> {
        sessions::fetch_session_metrics(self.backend.as_ref(), store_id, range).await
    }
}
