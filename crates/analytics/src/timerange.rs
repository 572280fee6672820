//! Calendar date ranges and shifts
//!
//! All ranges are whole calendar days, inclusive on both ends. Month and year
//! shifts use calendar arithmetic: a day that does not exist in the target
//! month (Mar 31 minus one month) clamps to the last day of that month.

use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;
use storelens_query::DateWindow;

use crate::error::{AnalyticsError, Result};

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(AnalyticsError::InvalidDateRange(format!(
                "end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a `YYYY-MM-DD,YYYY-MM-DD` range
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = s.trim().split_once(',').ok_or_else(|| {
            AnalyticsError::InvalidDateRange(format!(
                "expected START,END (YYYY-MM-DD,YYYY-MM-DD), got: {}",
                s
            ))
        })?;

        Self::new(parse_date(start.trim())?, parse_date(end.trim())?)
    }

    /// The `days` days ending today, `[today - days, today]`
    pub fn trailing_days(today: NaiveDate, days: u32) -> Result<Self> {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                AnalyticsError::InvalidDateRange(format!(
                    "{} days before {} is out of range",
                    days, today
                ))
            })?;
        Ok(Self { start, end: today })
    }

    /// Days between start and end (0 for a single-day range)
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of calendar days covered (both endpoints included)
    pub fn days(&self) -> i64 {
        self.span_days() + 1
    }

    /// Check whether a day falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The range of equal span ending the day before this one starts
    pub fn previous_period(&self) -> Self {
        let end = self.start - Duration::days(1);
        Self {
            start: end - Duration::days(self.span_days()),
            end,
        }
    }

    /// Shift both endpoints back by whole calendar months
    pub fn shift_months_back(&self, months: u32) -> Self {
        Self {
            start: sub_months(self.start, months),
            end: sub_months(self.end, months),
        }
    }

    /// Shift both endpoints back by whole calendar years
    pub fn shift_years_back(&self, years: u32) -> Self {
        self.shift_months_back(years * 12)
    }

    /// Window handed to metrics backends
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start, self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

impl std::str::FromStr for DateRange {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        AnalyticsError::InvalidDateRange(format!("invalid date format: {} (use YYYY-MM-DD)", s))
    })
}

/// Subtract calendar months, clamping to the end of the target month.
/// Falls back to the input only outside chrono's representable range.
pub(crate) fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

/// Add calendar months, clamping to the end of the target month
pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}
