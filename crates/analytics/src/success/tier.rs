//! Success tiers and threshold lookup

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storelens_query::{ThresholdAxis, ThresholdRow};

/// Success tier of a revenue increase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Alto,
    Medio,
    Leve,
    Ninguno,
    Negativo,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alto => "alto",
            Self::Medio => "medio",
            Self::Leve => "leve",
            Self::Ninguno => "ninguno",
            Self::Negativo => "negativo",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
}

impl Thresholds {
    pub fn new(low: Decimal, medium: Decimal, high: Decimal) -> Self {
        Self { low, medium, high }
    }

    /// Tier of `value`, checked from the highest threshold down
    ///
    /// A value below `low` is `negativo` when negative and `ninguno`
    /// otherwise, so a zero increase never counts as a decline.
    pub fn classify(&self, value: Decimal) -> Tier {
        if value >= self.high {
            Tier::Alto
        } else if value >= self.medium {
            Tier::Medio
        } else if value >= self.low {
            Tier::Leve
        } else if value < Decimal::ZERO {
            Tier::Negativo
        } else {
            Tier::Ninguno
        }
    }
}

impl From<&ThresholdRow> for Thresholds {
    fn from(row: &ThresholdRow) -> Self {
        Self::new(row.low_threshold, row.medium_threshold, row.high_threshold)
    }
}

/// Active thresholds keyed by axis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThresholdTable {
    axes: HashMap<ThresholdAxis, Thresholds>,
}

impl ThresholdTable {
    /// Build from config rows; inactive rows are skipped and the first active
    /// row of an axis wins
    pub fn from_rows(rows: &[ThresholdRow]) -> Self {
        let mut axes = HashMap::new();
        for row in rows.iter().filter(|r| r.is_active) {
            axes.entry(row.axis).or_insert_with(|| Thresholds::from(row));
        }
        Self { axes }
    }

    pub fn get(&self, axis: ThresholdAxis) -> Option<&Thresholds> {
        self.axes.get(&axis)
    }

    /// Tier of `value` on `axis`; `ninguno` when the axis has no thresholds
    pub fn classify(&self, axis: ThresholdAxis, value: Decimal) -> Tier {
        match self.axes.get(&axis) {
            Some(thresholds) => thresholds.classify(value),
            None => Tier::Ninguno,
        }
    }
}
