//! Comparison and benchmark period resolution
//!
//! Given the primary range of a request, resolves the range it is compared
//! against (previous period, last month, last year) and the benchmark range
//! derived from the store's reference period.

use serde::{Deserialize, Serialize};
use storelens_query::ReferencePeriod;

use crate::error::{AnalyticsError, Result};
use crate::timerange::DateRange;

/// Which earlier period the primary range is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Same span immediately before the primary range, one-day gap
    PreviousPeriod,
    /// Both endpoints one calendar month earlier
    LastMonth,
    /// Both endpoints one calendar year earlier
    LastYear,
}

impl CompareMode {
    /// Parse a selector where `none` (or an empty string) means no comparison
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        match s.trim() {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }

    /// Selector string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreviousPeriod => "previous_period",
            Self::LastMonth => "last_month",
            Self::LastYear => "last_year",
        }
    }

    /// Resolve the comparison range for a primary range
    pub fn resolve(&self, primary: &DateRange) -> DateRange {
        match self {
            Self::PreviousPeriod => primary.previous_period(),
            Self::LastMonth => primary.shift_months_back(1),
            Self::LastYear => primary.shift_years_back(1),
        }
    }
}

impl std::str::FromStr for CompareMode {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "previous_period" => Ok(Self::PreviousPeriod),
            "last_month" => Ok(Self::LastMonth),
            "last_year" => Ok(Self::LastYear),
            other => Err(AnalyticsError::InvalidComparison(format!(
                "unknown comparison period: {} (use previous_period, last_month, last_year or none)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for CompareMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many months back from the reference period the benchmark sits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkOffset {
    /// The reference period itself
    #[default]
    #[serde(rename = "ref")]
    Ref,
    /// One month earlier
    #[serde(rename = "ref_1")]
    Ref1,
    /// Two months earlier
    #[serde(rename = "ref_2")]
    Ref2,
    /// Three months earlier
    #[serde(rename = "ref_3")]
    Ref3,
}

impl BenchmarkOffset {
    /// Months to shift the reference period back
    pub fn months(&self) -> u32 {
        match self {
            Self::Ref => 0,
            Self::Ref1 => 1,
            Self::Ref2 => 2,
            Self::Ref3 => 3,
        }
    }

    /// Selector string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Ref1 => "ref_1",
            Self::Ref2 => "ref_2",
            Self::Ref3 => "ref_3",
        }
    }

    /// Resolve the benchmark range from a store's reference period
    ///
    /// Returns `None` unless both reference endpoints are configured and
    /// form a valid range.
    pub fn resolve(&self, reference: &ReferencePeriod) -> Option<DateRange> {
        let (start, end) = (reference.start?, reference.end?);
        let range = DateRange::new(start, end).ok()?;

        Some(match self.months() {
            0 => range,
            months => range.shift_months_back(months),
        })
    }
}

impl std::str::FromStr for BenchmarkOffset {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "ref" => Ok(Self::Ref),
            "ref_1" => Ok(Self::Ref1),
            "ref_2" => Ok(Self::Ref2),
            "ref_3" => Ok(Self::Ref3),
            other => Err(AnalyticsError::InvalidBenchmark(format!(
                "unknown benchmark period: {} (use ref, ref_1, ref_2 or ref_3)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BenchmarkOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the comparison range, `None` when no comparison was requested
pub fn comparison_range(primary: &DateRange, mode: Option<CompareMode>) -> Option<DateRange> {
    mode.map(|m| m.resolve(primary))
}

/// Resolve the benchmark range, `None` when the store has no complete
/// reference period
pub fn benchmark_range(reference: &ReferencePeriod, offset: BenchmarkOffset) -> Option<DateRange> {
    offset.resolve(reference)
}
