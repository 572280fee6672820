//! Metrics backend trait and implementations

pub mod memory;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::result::{
    DateWindow, DatedValue, PeriodTotals, ProductSales, ReferencePeriod, SessionRow,
    StoreReference, ThresholdRow,
};

/// Metrics backend trait
///
/// The narrow read contract the analytics engine needs from the storage
/// layer. All windows are inclusive on both ends.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Summed revenue, orders and sessions plus the average daily conversion
    /// fraction for a store over a window
    async fn fetch_period_totals(
        &self,
        store_id: &str,
        window: DateWindow,
    ) -> Result<PeriodTotals, QueryError>;

    /// Revenue per day for a store over a window, ascending by date.
    /// Days without rows are absent.
    async fn fetch_daily_revenue(
        &self,
        store_id: &str,
        window: DateWindow,
    ) -> Result<Vec<DatedValue>, QueryError>;

    /// Products with positive sales, grouped by title, descending by total
    /// sales, at most `limit` rows
    async fn fetch_top_products(
        &self,
        store_id: &str,
        window: DateWindow,
        limit: usize,
    ) -> Result<Vec<ProductSales>, QueryError>;

    /// The store's reference period. Unknown stores have none configured.
    async fn fetch_reference_period(&self, store_id: &str) -> Result<ReferencePeriod, QueryError>;

    /// All success threshold configs, active or not
    async fn fetch_threshold_configs(&self) -> Result<Vec<ThresholdRow>, QueryError>;

    /// Every store with a reference start configured
    async fn fetch_stores_with_reference(&self) -> Result<Vec<StoreReference>, QueryError>;

    /// Per-day session rows, ascending by date. `None` returns every row.
    async fn fetch_session_metrics(
        &self,
        store_id: &str,
        window: Option<DateWindow>,
    ) -> Result<Vec<SessionRow>, QueryError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
