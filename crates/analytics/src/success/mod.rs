//! Success classification
//!
//! Compares a store's revenue over its reference period with the equally long
//! period right before it and places the absolute and percentage increases
//! into tiers using the configured thresholds.
//!
//! ```ignore
//! let outcome = engine.success_status("store-1", today).await?;
//! let report = engine.all_success_statuses(today).await?;
//! for failure in &report.failed {
//!     eprintln!("{}: {}", failure.store_id, failure.reason);
//! }
//! ```

pub mod tier;

pub use tier::{ThresholdTable, Thresholds, Tier};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use storelens_query::{MetricsBackend, ThresholdAxis};

use crate::error::Result;
use crate::metrics::aggregate::fetch_revenue;
use crate::metrics::{MetricsEngine, percentage_change};
use crate::timerange::DateRange;

/// Message of stores without a reference start
pub const UNCONFIGURED_MESSAGE: &str = "reference period not configured";

/// Success classification of one store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStatus {
    pub store_id: String,
    /// Reference period, clamped to today
    pub reference_period: DateRange,
    /// Period of equal length right before the reference period
    pub previous_period: DateRange,
    pub current_revenue: Decimal,
    pub previous_revenue: Decimal,
    /// `current - previous`
    pub fixed_increase: Decimal,
    /// Percent change from previous to current
    pub percentage_increase: Decimal,
    pub fixed_level: Tier,
    pub percentage_level: Tier,
}

/// Result of classifying a single store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum SuccessOutcome {
    #[serde(rename = "ok")]
    Computed(SuccessStatus),
    #[serde(rename = "error")]
    Unconfigured {
        #[serde(rename = "storeId")]
        store_id: String,
        message: String,
    },
}

impl SuccessOutcome {
    /// The status, if one was computed
    pub fn status(&self) -> Option<&SuccessStatus> {
        match self {
            Self::Computed(status) => Some(status),
            Self::Unconfigured { .. } => None,
        }
    }
}

/// A store whose classification failed during a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub store_id: String,
    pub reason: String,
}

/// Outcome of classifying every store with a reference period
///
/// Serializes as the list of computed statuses only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessReport {
    pub succeeded: Vec<SuccessStatus>,
    pub failed: Vec<StoreFailure>,
}

impl SuccessReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Serialize for SuccessReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.succeeded)
    }
}

/// Reference and previous periods of a store
///
/// The reference period ends at the configured end when that is before
/// `today`, otherwise at `today`. Fails when the start is after that end.
pub fn success_periods(
    start: NaiveDate,
    configured_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(DateRange, DateRange)> {
    let end = match configured_end {
        Some(end) if end < today => end,
        _ => today,
    };
    let reference = DateRange::new(start, end)?;
    Ok((reference, reference.previous_period()))
}

/// Classify one store with a resolved reference start
async fn classify_store(
    backend: &dyn MetricsBackend,
    thresholds: &ThresholdTable,
    store_id: &str,
    start: NaiveDate,
    configured_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<SuccessStatus> {
    let (reference, previous) = success_periods(start, configured_end, today)?;

    let (current_revenue, previous_revenue) = tokio::try_join!(
        fetch_revenue(backend, store_id, &reference),
        fetch_revenue(backend, store_id, &previous),
    )?;

    let fixed_increase = current_revenue.saturating_sub(previous_revenue);
    let percentage_increase = percentage_change(current_revenue, previous_revenue);

    Ok(SuccessStatus {
        store_id: store_id.to_string(),
        reference_period: reference,
        previous_period: previous,
        current_revenue,
        previous_revenue,
        fixed_increase,
        percentage_increase,
        fixed_level: thresholds.classify(ThresholdAxis::Fixed, fixed_increase),
        percentage_level: thresholds.classify(ThresholdAxis::Percentage, percentage_increase),
    })
}

impl MetricsEngine {
    /// Load the active thresholds
    pub async fn threshold_table(&self) -> Result<ThresholdTable> {
        let rows = self.backend().fetch_threshold_configs().await?;
        Ok(ThresholdTable::from_rows(&rows))
    }

    /// Success classification of one store
    ///
    /// A store without a reference start yields
    /// [`SuccessOutcome::Unconfigured`] rather than an error.
    pub async fn success_status(&self, store_id: &str, today: NaiveDate) -> Result<SuccessOutcome> {
        let reference = self.backend().fetch_reference_period(store_id).await?;
        let Some(start) = reference.start else {
            tracing::debug!(store_id = store_id, "no reference period");
            return Ok(SuccessOutcome::Unconfigured {
                store_id: store_id.to_string(),
                message: UNCONFIGURED_MESSAGE.to_string(),
            });
        };

        let thresholds = self.threshold_table().await?;
        let status = classify_store(
            self.backend(),
            &thresholds,
            store_id,
            start,
            reference.end,
            today,
        )
        .await?;

        Ok(SuccessOutcome::Computed(status))
    }

    /// Success classification of every store with a reference start
    ///
    /// Thresholds are loaded once. Stores run one after another and a failing
    /// store is recorded in [`SuccessReport::failed`] without stopping the
    /// rest. Only loading the thresholds or the store list fails the batch.
    pub async fn all_success_statuses(&self, today: NaiveDate) -> Result<SuccessReport> {
        let backend = self.backend();
        let thresholds = self.threshold_table().await?;
        let stores = backend.fetch_stores_with_reference().await?;

        tracing::debug!(
            stores = stores.len(),
            backend = backend.name(),
            "classifying stores"
        );

        let mut report = SuccessReport::default();
        for store in stores {
            let result = classify_store(
                backend,
                &thresholds,
                &store.store_id,
                store.reference_start,
                store.reference_end,
                today,
            )
            .await;

            match result {
                Ok(status) => report.succeeded.push(status),
                Err(e) => {
                    tracing::warn!(
                        store_id = %store.store_id,
                        error = %e,
                        "success classification failed"
                    );
                    report.failed.push(StoreFailure {
                        store_id: store.store_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
