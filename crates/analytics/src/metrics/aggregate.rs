//! Period aggregates
//!
//! Summed store metrics over a range, with the derived average order value
//! and conversion rate.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use storelens_query::{MetricsBackend, PeriodTotals};

use crate::error::Result;
use crate::timerange::DateRange;

/// Aggregated store metrics for one period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAggregate {
    /// Summed revenue
    pub revenue: Decimal,
    /// Summed orders
    pub orders: u64,
    /// Summed sessions
    pub sessions: u64,
    /// `revenue / orders`, 0 without orders
    pub average_order_value: Decimal,
    /// Average daily conversion fraction as a percentage
    pub conversion_rate_percent: Decimal,
}

impl PeriodAggregate {
    /// Derive an aggregate from backend totals
    pub fn from_totals(totals: &PeriodTotals) -> Self {
        Self {
            revenue: totals.revenue,
            orders: totals.orders,
            sessions: totals.sessions,
            average_order_value: safe_div(totals.revenue, Decimal::from(totals.orders)),
            conversion_rate_percent: totals.avg_conversion_rate.unwrap_or(Decimal::ZERO)
                * Decimal::ONE_HUNDRED,
        }
    }
}

/// Divide, resolving a zero denominator to zero
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Round a presented value to 2 decimal places, halves away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fetch and derive the aggregate for a store over a range
pub async fn fetch_period_aggregate(
    backend: &dyn MetricsBackend,
    store_id: &str,
    range: &DateRange,
) -> Result<PeriodAggregate> {
    let totals = backend.fetch_period_totals(store_id, range.window()).await?;
    Ok(PeriodAggregate::from_totals(&totals))
}

/// Fetch summed revenue only
pub async fn fetch_revenue(
    backend: &dyn MetricsBackend,
    store_id: &str,
    range: &DateRange,
) -> Result<Decimal> {
    let totals = backend.fetch_period_totals(store_id, range.window()).await?;
    Ok(totals.revenue)
}
