//! Bucketed time series
//!
//! Picks a bucket granularity from the span of a range and turns sparse
//! per-day values into a contiguous, gap-filled sequence of labeled buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storelens_query::DatedValue;

use crate::timerange::{DateRange, add_months};

/// Ranges spanning at most this many days are bucketed by day
pub const MAX_DAILY_SPAN_DAYS: i64 = 14;

/// Ranges spanning at most this many days are bucketed by week
pub const MAX_WEEKLY_SPAN_DAYS: i64 = 60;

/// Bucket size of a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day
    Day,
    /// One bucket per ISO week (Monday start)
    Week,
    /// One bucket per calendar month
    Month,
}

impl Granularity {
    /// Granularity for a span in days
    pub fn for_span_days(span_days: i64) -> Self {
        let span = span_days.abs();
        if span <= MAX_DAILY_SPAN_DAYS {
            Self::Day
        } else if span <= MAX_WEEKLY_SPAN_DAYS {
            Self::Week
        } else {
            Self::Month
        }
    }

    /// Granularity for a range, a function of its span only
    pub fn for_range(range: &DateRange) -> Self {
        Self::for_span_days(range.span_days())
    }

    /// Start of the bucket containing `date`
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Start of the bucket following the one starting at `bucket_start`
    pub fn next_bucket(&self, bucket_start: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => bucket_start + Duration::days(1),
            Self::Week => bucket_start + Duration::days(7),
            Self::Month => add_months(bucket_start, 1),
        }
    }

    /// Dashboard label of the bucket starting at `bucket_start`
    ///
    /// - day: `5 Jan`
    /// - week: `5 - 11 Jan`, or `29 Dec - 4 Jan` across a month boundary
    /// - month: `Jan`
    pub fn label(&self, bucket_start: NaiveDate) -> String {
        match self {
            Self::Day => bucket_start.format("%-d %b").to_string(),
            Self::Week => {
                let week_end = bucket_start + Duration::days(6);
                let start_month = bucket_start.format("%b").to_string();
                let end_month = week_end.format("%b").to_string();
                if start_month == end_month {
                    format!("{} - {} {}", bucket_start.day(), week_end.day(), start_month)
                } else {
                    format!(
                        "{} {} - {} {}",
                        bucket_start.day(),
                        start_month,
                        week_end.day(),
                        end_month
                    )
                }
            }
            Self::Month => bucket_start.format("%b").to_string(),
        }
    }

    /// Name of the granularity
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single labeled bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketPoint {
    /// Bucket label
    #[serde(rename = "name")]
    pub label: String,
    /// Summed value of the bucket (0 when it had no data)
    pub value: Decimal,
    /// First day of the bucket
    #[serde(skip)]
    pub bucket_start: NaiveDate,
}

impl BucketPoint {
    /// Create a new point
    pub fn new(label: impl Into<String>, value: Decimal, bucket_start: NaiveDate) -> Self {
        Self {
            label: label.into(),
            value,
            bucket_start,
        }
    }
}

/// Bucket a sparse series over `range` at the granularity its span selects
pub fn bucketize(range: &DateRange, points: &[DatedValue]) -> Vec<BucketPoint> {
    bucketize_with(range, Granularity::for_range(range), points)
}

/// Bucket a sparse series over `range` at an explicit granularity
///
/// Emits exactly one point per bucket from the bucket containing
/// `range.start` through the bucket containing `range.end`, ascending. Each
/// input value is summed into the bucket containing its date, so both
/// day-keyed rows and rows already keyed by bucket start land in the right
/// place. Values dated outside the bucketed span are ignored.
pub fn bucketize_with(
    range: &DateRange,
    granularity: Granularity,
    points: &[DatedValue],
) -> Vec<BucketPoint> {
    let mut sums: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for point in points {
        *sums.entry(granularity.bucket_start(point.date)).or_default() += point.value;
    }

    let mut buckets = Vec::new();
    let mut current = granularity.bucket_start(range.start);
    while current <= range.end {
        let value = sums.get(&current).copied().unwrap_or(Decimal::ZERO);
        buckets.push(BucketPoint::new(granularity.label(current), value, current));

        let next = granularity.next_bucket(current);
        if next <= current {
            break;
        }
        current = next;
    }

    buckets
}

/// Sum of all bucket values
pub fn total(points: &[BucketPoint]) -> Decimal {
    points.iter().map(|p| p.value).sum()
}
