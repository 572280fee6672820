//! Tests for success classification

use super::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use storelens_query::{MemoryBackend, ThresholdAxis, ThresholdRow};

use crate::success::UNCONFIGURED_MESSAGE;

// =============================================================================
// Test Helpers
// =============================================================================

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

fn row(axis: ThresholdAxis, low: i64, medium: i64, high: i64, is_active: bool) -> ThresholdRow {
    ThresholdRow {
        axis,
        low_threshold: dec(low),
        medium_threshold: dec(medium),
        high_threshold: dec(high),
        is_active,
    }
}

fn fixed_thresholds() -> Thresholds {
    Thresholds::new(dec(5_000_000), dec(10_000_000), dec(15_000_000))
}

const SNAPSHOT: &str = r#"{
  "stores": [
    { "id": "grower", "name": "Grower", "startDate": "2026-03-01", "endDate": "2026-03-10" },
    { "id": "decliner", "name": "Decliner", "startDate": "2026-03-01" },
    { "id": "future", "name": "Future", "startDate": "2026-05-01" },
    { "id": "unset", "name": "Unset" },
    { "id": "flat", "name": "Flat", "startDate": "2026-03-01", "endDate": "2026-03-10" }
  ],
  "dailyMetrics": [
    { "storeId": "grower", "date": "2026-03-05", "totalRevenue": 12000000, "totalOrders": 1 },
    { "storeId": "decliner", "date": "2026-02-10", "totalRevenue": 200, "totalOrders": 2 },
    { "storeId": "decliner", "date": "2026-03-15", "totalRevenue": 100, "totalOrders": 1 }
  ],
  "successConfigs": [
    { "type": "pct_amt", "lowThreshold": 1, "mediumThreshold": 2, "highThreshold": 3, "isActive": false },
    { "type": "fixed_amt", "lowThreshold": 5000000, "mediumThreshold": 10000000, "highThreshold": 15000000 },
    { "type": "pct_amt", "lowThreshold": 5, "mediumThreshold": 10, "highThreshold": 20, "isActive": true },
    { "type": "fixed_amt", "lowThreshold": 1, "mediumThreshold": 2, "highThreshold": 3 }
  ]
}"#;

fn engine() -> MetricsEngine {
    MetricsEngine::new(Box::new(MemoryBackend::from_json(SNAPSHOT).unwrap()))
}

fn today() -> NaiveDate {
    date("2026-04-01")
}

// =============================================================================
// Tiers
// =============================================================================

#[test]
fn test_classify_descending_thresholds() {
    let t = fixed_thresholds();
    assert_eq!(t.classify(dec(12_000_000)), Tier::Medio);
    assert_eq!(t.classify(dec(15_000_000)), Tier::Alto);
    assert_eq!(t.classify(dec(20_000_000)), Tier::Alto);
    assert_eq!(t.classify(dec(10_000_000)), Tier::Medio);
    assert_eq!(t.classify(dec(5_000_000)), Tier::Leve);
}

#[test]
fn test_classify_below_low() {
    let t = fixed_thresholds();
    assert_eq!(t.classify(dec(-1)), Tier::Negativo);
    assert_eq!(t.classify(dec(0)), Tier::Ninguno);
    assert_eq!(t.classify(dec(4_999_999)), Tier::Ninguno);
}

#[test]
fn test_classify_misordered_thresholds_picks_highest_tier() {
    let t = Thresholds::new(dec(20), dec(10), dec(5));
    assert_eq!(t.classify(dec(12)), Tier::Alto);
    assert_eq!(t.classify(dec(7)), Tier::Alto);
    assert_eq!(t.classify(dec(5)), Tier::Alto);
    assert_eq!(t.classify(dec(4)), Tier::Ninguno);

    let overlapping = Thresholds::new(dec(10), dec(10), dec(10));
    assert_eq!(overlapping.classify(dec(10)), Tier::Alto);
    assert_eq!(overlapping.classify(dec(9)), Tier::Ninguno);
}

#[test]
fn test_tier_names() {
    assert_eq!(serde_json::to_value(Tier::Alto).unwrap(), "alto");
    assert_eq!(serde_json::to_value(Tier::Negativo).unwrap(), "negativo");
    assert_eq!(Tier::Ninguno.to_string(), "ninguno");
    assert_eq!(Tier::Leve.as_str(), "leve");
}

// =============================================================================
// Threshold table
// =============================================================================

#[test]
fn test_table_first_active_row_wins() {
    let table = ThresholdTable::from_rows(&[
        row(ThresholdAxis::Fixed, 5_000_000, 10_000_000, 15_000_000, true),
        row(ThresholdAxis::Fixed, 1, 2, 3, true),
    ]);

    assert_eq!(table.get(ThresholdAxis::Fixed), Some(&fixed_thresholds()));
}

#[test]
fn test_table_skips_inactive_rows() {
    let table = ThresholdTable::from_rows(&[
        row(ThresholdAxis::Percentage, 1, 2, 3, false),
        row(ThresholdAxis::Percentage, 5, 10, 20, true),
    ]);

    assert_eq!(
        table.get(ThresholdAxis::Percentage),
        Some(&Thresholds::new(dec(5), dec(10), dec(20)))
    );
}

#[test]
fn test_table_missing_axis_is_ninguno() {
    let table = ThresholdTable::from_rows(&[row(ThresholdAxis::Percentage, 1, 2, 3, false)]);

    assert!(table.get(ThresholdAxis::Percentage).is_none());
    assert_eq!(
        table.classify(ThresholdAxis::Percentage, dec(1000)),
        Tier::Ninguno
    );
    assert_eq!(table.classify(ThresholdAxis::Fixed, dec(-50)), Tier::Ninguno);
}

// =============================================================================
// Periods
// =============================================================================

#[test]
fn test_success_periods_configured_end_before_today() {
    let (reference, previous) =
        success_periods(date("2026-03-01"), Some(date("2026-03-10")), today()).unwrap();

    assert_eq!(reference, range("2026-03-01", "2026-03-10"));
    assert_eq!(previous, range("2026-02-19", "2026-02-28"));
}

#[test]
fn test_success_periods_clamped_to_today() {
    let (reference, _) =
        success_periods(date("2026-03-01"), Some(date("2026-12-31")), today()).unwrap();
    assert_eq!(reference, range("2026-03-01", "2026-04-01"));

    let (reference, _) = success_periods(date("2026-03-01"), Some(today()), today()).unwrap();
    assert_eq!(reference.end, today());

    let (reference, previous) = success_periods(date("2026-03-01"), None, today()).unwrap();
    assert_eq!(reference, range("2026-03-01", "2026-04-01"));
    assert_eq!(previous, range("2026-01-28", "2026-02-28"));
}

#[test]
fn test_success_periods_start_after_end() {
    let err = success_periods(date("2026-05-01"), None, today()).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidDateRange(_)));
}

// =============================================================================
// Single store
// =============================================================================

#[tokio::test]
async fn test_success_status_growth() {
    let outcome = engine().success_status("grower", today()).await.unwrap();
    let status = outcome.status().unwrap();

    assert_eq!(status.reference_period, range("2026-03-01", "2026-03-10"));
    assert_eq!(status.previous_period, range("2026-02-19", "2026-02-28"));
    assert_eq!(status.current_revenue, dec(12_000_000));
    assert_eq!(status.previous_revenue, Decimal::ZERO);
    assert_eq!(status.fixed_increase, dec(12_000_000));
    assert_eq!(status.percentage_increase, dec(100));
    assert_eq!(status.fixed_level, Tier::Medio);
    assert_eq!(status.percentage_level, Tier::Alto);
}

#[tokio::test]
async fn test_success_status_decline() {
    let outcome = engine().success_status("decliner", today()).await.unwrap();
    let status = outcome.status().unwrap();

    assert_eq!(status.fixed_increase, dec(-100));
    assert_eq!(status.percentage_increase, dec(-50));
    assert_eq!(status.fixed_level, Tier::Negativo);
    assert_eq!(status.percentage_level, Tier::Negativo);
}

#[tokio::test]
async fn test_success_status_no_change() {
    let outcome = engine().success_status("flat", today()).await.unwrap();
    let status = outcome.status().unwrap();

    assert_eq!(status.fixed_level, Tier::Ninguno);
    assert_eq!(status.percentage_level, Tier::Ninguno);
}

#[tokio::test]
async fn test_success_status_unconfigured() {
    let outcome = engine().success_status("unset", today()).await.unwrap();

    assert!(outcome.status().is_none());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["storeId"], "unset");
    assert_eq!(json["message"], UNCONFIGURED_MESSAGE);
}

#[tokio::test]
async fn test_success_status_invalid_reference() {
    let err = engine().success_status("future", today()).await.unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidDateRange(_)));
}

#[tokio::test]
async fn test_success_status_json() {
    let outcome = engine().success_status("grower", today()).await.unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storeId"], "grower");
    assert_eq!(json["referencePeriod"]["start"], "2026-03-01");
    assert_eq!(json["previousPeriod"]["end"], "2026-02-28");
    assert_eq!(json["fixedLevel"], "medio");
    assert_eq!(json["percentageLevel"], "alto");
}

// =============================================================================
// Batch
// =============================================================================

#[tokio::test]
async fn test_all_statuses_isolates_failures() {
    let report = engine().all_success_statuses(today()).await.unwrap();

    let ids: Vec<&str> = report.succeeded.iter().map(|s| s.store_id.as_str()).collect();
    assert_eq!(ids, vec!["grower", "decliner", "flat"]);

    assert!(!report.is_complete());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].store_id, "future");
}

#[tokio::test]
async fn test_all_statuses_match_single_store() {
    let report = engine().all_success_statuses(today()).await.unwrap();
    let single = engine().success_status("decliner", today()).await.unwrap();

    assert_eq!(Some(&report.succeeded[1]), single.status());
}

#[tokio::test]
async fn test_report_serializes_successes_only() {
    let report = engine().all_success_statuses(today()).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|s| s["storeId"] != "future"));
    assert!(items.iter().all(|s| s.get("status").is_none()));
}

#[test]
fn test_empty_report_is_complete() {
    let report = SuccessReport::default();
    assert!(report.is_complete());
    assert_eq!(serde_json::to_string(&report).unwrap(), "[]");
}
