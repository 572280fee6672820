//! Top products metric
//!
//! Best-selling products of a store by total sales. The product title is the
//! grouping key, so distinct products sharing a title collapse into one row.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use storelens_query::{MetricsBackend, ProductSales};

use crate::error::Result;
use crate::timerange::DateRange;

/// Default number of ranked products
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// One ranked product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRanking {
    /// Same as the title; products have no other identity here
    pub id: String,
    /// Product title
    pub title: String,
    /// Summed sales over the range
    pub total_sales: Decimal,
}

impl ProductRanking {
    /// Create a ranking row keyed by title
    pub fn new(title: impl Into<String>, total_sales: Decimal) -> Self {
        let title = title.into();
        Self {
            id: title.clone(),
            title,
            total_sales,
        }
    }
}

/// Rank product rows: drop non-positive sales, merge equal titles, sort
/// descending (ties keep first-seen order), keep the first `limit`
pub fn rank_products(rows: Vec<ProductSales>, limit: usize) -> Vec<ProductRanking> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ranked: Vec<ProductRanking> = Vec::new();

    for row in rows.into_iter().filter(|r| r.total_sales > Decimal::ZERO) {
        match index.get(&row.title) {
            Some(&i) => ranked[i].total_sales += row.total_sales,
            None => {
                index.insert(row.title.clone(), ranked.len());
                ranked.push(ProductRanking::new(row.title, row.total_sales));
            }
        }
    }

    ranked.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    ranked.truncate(limit);
    ranked
}

/// Fetch and rank the top products of a store over a range
pub async fn fetch_top_products(
    backend: &dyn MetricsBackend,
    store_id: &str,
    range: &DateRange,
    limit: usize,
) -> Result<Vec<ProductRanking>> {
    let rows = backend
        .fetch_top_products(store_id, range.window(), limit)
        .await?;
    Ok(rank_products(rows, limit))
}
