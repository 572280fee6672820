//! Analytics engine configuration

use serde::Deserialize;

/// Analytics configuration
///
/// # Example
///
/// ```toml
/// [analytics]
/// default_range_days = 30
/// top_products = 5
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Days covered by the range used when a request gives none
    /// Default: 30
    pub default_range_days: u32,

    /// Number of ranked products
    /// Default: 5
    pub top_products: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_range_days: 30,
            top_products: 5,
        }
    }
}
