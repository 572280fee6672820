//! Session metrics
//!
//! Per-day session counts and conversion rates as stored, without bucketing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use storelens_query::{MetricsBackend, SessionRow};

use crate::error::Result;
use crate::timerange::DateRange;

/// One day of sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPoint {
    pub date: NaiveDate,
    pub sessions: u64,
    /// Conversion-rate fraction; `null` when the platform reported none
    pub conversion_rate: Option<Decimal>,
}

impl From<SessionRow> for SessionPoint {
    fn from(row: SessionRow) -> Self {
        Self {
            date: row.date,
            sessions: row.sessions,
            conversion_rate: row.conversion_rate,
        }
    }
}

/// Session series of a store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionMetrics {
    /// Days ascending
    pub sessions: Vec<SessionPoint>,
}

impl SessionMetrics {
    /// Total sessions over the series
    pub fn total_sessions(&self) -> u64 {
        self.sessions.iter().map(|p| p.sessions).sum()
    }
}

/// Fetch the session series of a store, every stored day when `range` is `None`
pub async fn fetch_session_metrics(
    backend: &dyn MetricsBackend,
    store_id: &str,
    range: Option<&DateRange>,
) -> Result<SessionMetrics> {
    let rows = backend
        .fetch_session_metrics(store_id, range.map(DateRange::window))
        .await?;

    let mut sessions: Vec<SessionPoint> = rows.into_iter().map(SessionPoint::from).collect();
    sessions.sort_by_key(|p| p.date);

    Ok(SessionMetrics { sessions })
}
