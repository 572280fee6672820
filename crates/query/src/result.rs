//! Row types returned by metrics backends
//!
//! These are the shapes the analytics engine consumes. They carry raw
//! aggregates only; derived values (average order value, percentages) are
//! computed by the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day window a backend query is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window. Backends treat `start > end` as an empty window.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a day falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Summed per-day metrics over a window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    /// Sum of daily revenue
    pub revenue: Decimal,
    /// Sum of daily orders
    pub orders: u64,
    /// Sum of daily sessions
    pub sessions: u64,
    /// Average of the daily conversion-rate fractions (0.0077 = 0.77%).
    /// `None` when no row in the window carries a rate.
    pub avg_conversion_rate: Option<Decimal>,
}

/// A value keyed by calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedValue {
    /// Day the value belongs to
    pub date: NaiveDate,
    /// The value
    pub value: Decimal,
}

impl DatedValue {
    /// Create a new dated value
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// Sales of one product title over a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    /// Product title (the grouping key)
    pub title: String,
    /// Summed sales
    pub total_sales: Decimal,
}

/// A store's configured reference period
///
/// Either end may be missing. Benchmarks need both; the success classifier
/// only needs the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferencePeriod {
    /// Reference start
    pub start: Option<NaiveDate>,
    /// Reference end
    pub end: Option<NaiveDate>,
}

/// A store that has a reference start configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReference {
    /// Store identifier
    pub store_id: String,
    /// Reference start
    pub reference_start: NaiveDate,
    /// Reference end, if configured
    pub reference_end: Option<NaiveDate>,
}

/// Classification axis of a success threshold config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThresholdAxis {
    /// Absolute revenue increase
    #[serde(rename = "fixed_amt")]
    Fixed,
    /// Percentage revenue increase
    #[serde(rename = "pct_amt")]
    Percentage,
}

impl ThresholdAxis {
    /// Stored name of the axis
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed_amt",
            Self::Percentage => "pct_amt",
        }
    }
}

/// One success threshold config row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRow {
    /// Axis this config applies to
    #[serde(rename = "type")]
    pub axis: ThresholdAxis,
    /// Lower bound of the `leve` tier
    pub low_threshold: Decimal,
    /// Lower bound of the `medio` tier
    pub medium_threshold: Decimal,
    /// Lower bound of the `alto` tier
    pub high_threshold: Decimal,
    /// Inactive rows are ignored by the classifier
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// One day of session metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRow {
    /// Day
    pub date: NaiveDate,
    /// Session count
    pub sessions: u64,
    /// Conversion-rate fraction, when the platform reported one
    pub conversion_rate: Option<Decimal>,
}
