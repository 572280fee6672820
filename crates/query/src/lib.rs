//! StoreLens Query - metrics store access for StoreLens analytics
//!
//! Defines the read contract the analytics engine depends on
//! ([`MetricsBackend`]) and ships a local backend:
//! - **Memory**: JSON snapshot of store, product and session metrics, for
//!   local runs and tests
//!
//! # Usage
//!
//! ```ignore
//! use storelens_query::{DateWindow, QueryEngine};
//!
//! let engine = QueryEngine::open("local", Some("data/snapshot.json".as_ref()))?;
//! let totals = engine.fetch_period_totals("store-1", window).await?;
//! println!("Revenue: {}", totals.revenue);
//! ```

pub mod backend;
pub mod error;
pub mod result;

// Re-exports
pub use backend::MetricsBackend;
pub use backend::memory::{MemoryBackend, Snapshot};
pub use error::QueryError;
pub use result::{
    DateWindow, DatedValue, PeriodTotals, ProductSales, ReferencePeriod, SessionRow,
    StoreReference, ThresholdAxis, ThresholdRow,
};

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

/// Query engine that routes reads to the configured backend
#[derive(Clone)]
pub struct QueryEngine {
    backend: Arc<dyn MetricsBackend>,
}

impl QueryEngine {
    /// Create a new query engine with a specific backend
    pub fn new(backend: impl MetricsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open a backend by name
    ///
    /// `local` (alias `memory`) loads the JSON snapshot at `path`.
    pub fn open(backend: &str, path: Option<&Path>) -> Result<Self, QueryError> {
        match backend {
            "local" | "memory" => {
                let path = path.ok_or_else(|| {
                    QueryError::Config("path required for local backend".to_string())
                })?;
                Ok(Self::new(MemoryBackend::from_file(path)?))
            }
            other => Err(QueryError::BackendNotConfigured(format!(
                "unknown backend: {}",
                other
            ))),
        }
    }

    /// Shared handle to the underlying backend
    pub fn backend(&self) -> Arc<dyn MetricsBackend> {
        Arc::clone(&self.backend)
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

// Implement MetricsBackend for QueryEngine so it can be used with MetricsEngine
#[async_trait]
impl MetricsBackend for QueryEngine {
    async fn fetch_period_totals(
        &self,
        store_id: &str,
        window: DateWindow,
    ) -> Result<PeriodTotals, QueryError> {
        self.backend.fetch_period_totals(store_id, window).await
    }

    async fn fetch_daily_revenue(
        &self,
        store_id: &str,
        window: DateWindow,
    ) -> Result<Vec<DatedValue>, QueryError> {
        self.backend.fetch_daily_revenue(store_id, window).await
    }

    async fn fetch_top_products(
        &self,
        store_id: &str,
        window: DateWindow,
        limit: usize,
    ) -> Result<Vec<ProductSales>, QueryError> {
        self.backend
            .fetch_top_products(store_id, window, limit)
            .await
    }

    async fn fetch_reference_period(&self, store_id: &str) -> Result<ReferencePeriod, QueryError> {
        self.backend.fetch_reference_period(store_id).await
    }

    async fn fetch_threshold_configs(&self) -> Result<Vec<ThresholdRow>, QueryError> {
        self.backend.fetch_threshold_configs().await
    }

    async fn fetch_stores_with_reference(&self) -> Result<Vec<StoreReference>, QueryError> {
        self.backend.fetch_stores_with_reference().await
    }

    async fn fetch_session_metrics(
        &self,
        store_id: &str,
        window: Option<DateWindow>,
    ) -> Result<Vec<SessionRow>, QueryError> {
        self.backend.fetch_session_metrics(store_id, window).await
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}
