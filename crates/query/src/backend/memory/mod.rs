//! In-memory backend over a JSON snapshot
//!
//! Holds the tables the analytics engine reads (stores, daily metrics,
//! product metrics, session metrics, success configs) and answers the
//! backend contract by scanning them. Used for local runs and tests.
//!
//! # Snapshot format
//!
//! ```json
//! {
//!   "stores": [{ "id": "s1", "name": "Demo", "startDate": "2026-03-01", "endDate": null }],
//!   "dailyMetrics": [{ "storeId": "s1", "date": "2026-03-02", "totalRevenue": 120.5,
//!                      "totalOrders": 3, "sessions": 80, "conversionRate": 0.0375 }],
//!   "productMetrics": [{ "storeId": "s1", "date": "2026-03-02", "productTitle": "Mug",
//!                        "totalSales": 40.0 }],
//!   "sessionMetrics": [{ "storeId": "s1", "date": "2026-03-02", "sessions": 80,
//!                        "conversionRate": 0.0375 }],
//!   "successConfigs": [{ "type": "fixed_amt", "lowThreshold": 5000000,
//!                        "mediumThreshold": 10000000, "highThreshold": 15000000 }]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::backend::MetricsBackend;
use crate::error::QueryError;
use crate::result::{
    DateWindow, DatedValue, PeriodTotals, ProductSales, ReferencePeriod, SessionRow,
    StoreReference, ThresholdRow,
};

/// A configured store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    /// Store identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Reference period start
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Reference period end
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// One day of store-level metrics
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetricRecord {
    /// Owning store
    pub store_id: String,
    /// Day
    pub date: NaiveDate,
    /// Revenue for the day
    #[serde(default)]
    pub total_revenue: Decimal,
    /// Orders for the day
    #[serde(default)]
    pub total_orders: u64,
    /// Sessions for the day
    #[serde(default)]
    pub sessions: u64,
    /// Conversion-rate fraction for the day
    #[serde(default)]
    pub conversion_rate: Option<Decimal>,
}

/// One day of sales for one product
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetricRecord {
    /// Owning store
    pub store_id: String,
    /// Day
    pub date: NaiveDate,
    /// Product title
    pub product_title: String,
    /// Sales for the day
    #[serde(default)]
    pub total_sales: Decimal,
}

/// One day of session metrics
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetricRecord {
    /// Owning store
    pub store_id: String,
    /// Day
    pub date: NaiveDate,
    /// Session count
    #[serde(default)]
    pub sessions: u64,
    /// Conversion-rate fraction
    #[serde(default)]
    pub conversion_rate: Option<Decimal>,
}

/// All tables held by the memory backend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Stores
    pub stores: Vec<StoreRecord>,
    /// Daily store metrics
    pub daily_metrics: Vec<DailyMetricRecord>,
    /// Daily product metrics
    pub product_metrics: Vec<ProductMetricRecord>,
    /// Daily session metrics
    pub session_metrics: Vec<SessionMetricRecord>,
    /// Success threshold configs
    pub success_configs: Vec<ThresholdRow>,
}

/// Memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    snapshot: Snapshot,
}

impl MemoryBackend {
    /// Create a backend over a snapshot
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, QueryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let backend = Self::from_json(&contents)?;

        tracing::debug!(
            path = %path.display(),
            stores = backend.snapshot.stores.len(),
            daily_rows = backend.snapshot.daily_metrics.len(),
            "loaded metrics snapshot"
        );

        Ok(backend)
    }

    /// Access the underlying snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn daily_rows<'a>(
        &'a self,
        store_id: &'a str,
        window: DateWindow,
    ) -> impl Iterator<Item = &'a DailyMetricRecord> + 'a {
        self.snapshot
            .daily_metrics
            .iter()
            .filter(move |m| m.store_id == store_id && window.contains(m.date))
    }
}

#[async_trait]
impl MetricsBackend for MemoryBackend {
    async fn fetch_period_totals(
        &self,
        store_id: &str,
        window: DateWindow,
    ) -> Result<PeriodTotals, QueryError> {
        let mut totals = PeriodTotals::default();
        let mut rate_sum = Decimal::ZERO;
        let mut rate_count: u32 = 0;

        for row in self.daily_rows(store_id, window) {
            totals.revenue += row.total_revenue;
            totals.orders += row.total_orders;
            totals.sessions += row.sessions;
            if let Some(rate) = row.conversion_rate {
                rate_sum += rate;
                rate_count += 1;
            }
        }

        // AVG skips rows without a rate
        if rate_count > 0 {
            totals.avg_conversion_rate = Some(rate_sum / Decimal::from(rate_count));
        }

        Ok(totals)
    }

    async fn fetch_daily_revenue(
        &self,
        store_id: &str,
        window: DateWindow,
    ) -> Result<Vec<DatedValue>, QueryError> {
        let mut by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
        for row in self.daily_rows(store_id, window) {
            *by_day.entry(row.date).or_default() += row.total_revenue;
        }

        let mut points: Vec<DatedValue> = by_day
            .into_iter()
            .map(|(date, value)| DatedValue::new(date, value))
            .collect();
        points.sort_by_key(|p| p.date);

        Ok(points)
    }

    async fn fetch_top_products(
        &self,
        store_id: &str,
        window: DateWindow,
        limit: usize,
    ) -> Result<Vec<ProductSales>, QueryError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut grouped: Vec<ProductSales> = Vec::new();

        let rows = self.snapshot.product_metrics.iter().filter(|p| {
            p.store_id == store_id && window.contains(p.date) && p.total_sales > Decimal::ZERO
        });

        for row in rows {
            match index.get(row.product_title.as_str()) {
                Some(&i) => grouped[i].total_sales += row.total_sales,
                None => {
                    index.insert(row.product_title.as_str(), grouped.len());
                    grouped.push(ProductSales {
                        title: row.product_title.clone(),
                        total_sales: row.total_sales,
                    });
                }
            }
        }

        grouped.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
        grouped.truncate(limit);

        Ok(grouped)
    }

    async fn fetch_reference_period(&self, store_id: &str) -> Result<ReferencePeriod, QueryError> {
        Ok(self
            .snapshot
            .stores
            .iter()
            .find(|s| s.id == store_id)
            .map(|s| ReferencePeriod {
                start: s.start_date,
                end: s.end_date,
            })
            .unwrap_or_default())
    }

    async fn fetch_threshold_configs(&self) -> Result<Vec<ThresholdRow>, QueryError> {
        Ok(self.snapshot.success_configs.clone())
    }

    async fn fetch_stores_with_reference(&self) -> Result<Vec<StoreReference>, QueryError> {
        Ok(self
            .snapshot
            .stores
            .iter()
            .filter_map(|s| {
                s.start_date.map(|start| StoreReference {
                    store_id: s.id.clone(),
                    reference_start: start,
                    reference_end: s.end_date,
                })
            })
            .collect())
    }

    async fn fetch_session_metrics(
        &self,
        store_id: &str,
        window: Option<DateWindow>,
    ) -> Result<Vec<SessionRow>, QueryError> {
        let mut rows: Vec<SessionRow> = self
            .snapshot
            .session_metrics
            .iter()
            .filter(|m| m.store_id == store_id)
            .filter(|m| window.is_none_or(|w| w.contains(m.date)))
            .map(|m| SessionRow {
                date: m.date,
                sessions: m.sessions,
                conversion_rate: m.conversion_rate,
            })
            .collect();
        rows.sort_by_key(|r| r.date);

        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
