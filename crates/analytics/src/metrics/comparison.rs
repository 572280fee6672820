//! Period-over-period comparison
//!
//! Percentage change of every headline metric between the primary period and
//! an earlier one. Comparisons also echo the earlier period's raw values and
//! range; benchmarks carry the changes only.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::aggregate::PeriodAggregate;
use crate::timerange::DateRange;

/// Percent change from `previous` to `current`
///
/// A zero `previous` yields 100 when `current` is positive and 0 otherwise.
/// A change too large for `Decimal` saturates to `Decimal::MAX` or
/// `Decimal::MIN`.
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }

    current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            if (current > previous) == previous.is_sign_positive() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
}

/// Percent change of each headline metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChanges {
    pub total_revenue_change: Decimal,
    pub total_orders_change: Decimal,
    pub average_order_value_change: Decimal,
    pub total_sessions_change: Decimal,
    pub conversion_rate_change: Decimal,
}

impl MetricChanges {
    /// Changes from `previous` to `current`
    pub fn between(current: &PeriodAggregate, previous: &PeriodAggregate) -> Self {
        Self {
            total_revenue_change: percentage_change(current.revenue, previous.revenue),
            total_orders_change: percentage_change(
                Decimal::from(current.orders),
                Decimal::from(previous.orders),
            ),
            average_order_value_change: percentage_change(
                current.average_order_value,
                previous.average_order_value,
            ),
            total_sessions_change: percentage_change(
                Decimal::from(current.sessions),
                Decimal::from(previous.sessions),
            ),
            conversion_rate_change: percentage_change(
                current.conversion_rate_percent,
                previous.conversion_rate_percent,
            ),
        }
    }
}

/// Raw values of the comparison period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonValues {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub average_order_value: Decimal,
    pub total_sessions: u64,
    pub conversion_rate: Decimal,
}

impl From<&PeriodAggregate> for ComparisonValues {
    fn from(agg: &PeriodAggregate) -> Self {
        Self {
            total_revenue: agg.revenue,
            total_orders: agg.orders,
            average_order_value: agg.average_order_value,
            total_sessions: agg.sessions,
            conversion_rate: agg.conversion_rate_percent,
        }
    }
}

/// Comparison against an earlier period of the caller's choosing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    #[serde(flatten)]
    pub changes: MetricChanges,
    /// Raw values of the comparison period
    pub values: ComparisonValues,
    /// The comparison period
    pub range: DateRange,
}

impl ComparisonResult {
    /// Compare `current` with the aggregate of `range`
    pub fn new(current: &PeriodAggregate, previous: &PeriodAggregate, range: DateRange) -> Self {
        Self {
            changes: MetricChanges::between(current, previous),
            values: ComparisonValues::from(previous),
            range,
        }
    }
}

/// Comparison against the store's reference period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkResult {
    #[serde(flatten)]
    pub changes: MetricChanges,
}

impl BenchmarkResult {
    /// Compare `current` with the benchmark aggregate
    pub fn new(current: &PeriodAggregate, benchmark: &PeriodAggregate) -> Self {
        Self {
            changes: MetricChanges::between(current, benchmark),
        }
    }
}
