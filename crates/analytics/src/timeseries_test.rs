//! Tests for granularity selection and bucketing

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use storelens_query::DatedValue;

use crate::timerange::DateRange;
use crate::timeseries::{Granularity, bucketize, bucketize_with, total};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

fn point(d: &str, value: i64) -> DatedValue {
    DatedValue::new(date(d), Decimal::from(value))
}

// =============================================================================
// Granularity selection
// =============================================================================

#[test]
fn test_granularity_for_span() {
    assert_eq!(Granularity::for_span_days(10), Granularity::Day);
    assert_eq!(Granularity::for_span_days(45), Granularity::Week);
    assert_eq!(Granularity::for_span_days(90), Granularity::Month);
}

#[test]
fn test_granularity_boundaries() {
    assert_eq!(Granularity::for_span_days(0), Granularity::Day);
    assert_eq!(Granularity::for_span_days(14), Granularity::Day);
    assert_eq!(Granularity::for_span_days(15), Granularity::Week);
    assert_eq!(Granularity::for_span_days(60), Granularity::Week);
    assert_eq!(Granularity::for_span_days(61), Granularity::Month);
}

#[test]
fn test_granularity_for_range_uses_span() {
    // 14 days between endpoints, 15 calendar days covered
    assert_eq!(
        Granularity::for_range(&range("2026-01-01", "2026-01-15")),
        Granularity::Day
    );
    assert_eq!(
        Granularity::for_range(&range("2026-01-01", "2026-01-16")),
        Granularity::Week
    );
}

// =============================================================================
// Bucket boundaries and labels
// =============================================================================

#[test]
fn test_week_bucket_starts_on_monday() {
    // 2026-01-01 is a Thursday, 2026-01-04 a Sunday
    assert_eq!(Granularity::Week.bucket_start(date("2026-01-01")), date("2025-12-29"));
    assert_eq!(Granularity::Week.bucket_start(date("2026-01-04")), date("2025-12-29"));
    assert_eq!(Granularity::Week.bucket_start(date("2026-01-05")), date("2026-01-05"));
}

#[test]
fn test_month_bucket_starts_on_first() {
    assert_eq!(Granularity::Month.bucket_start(date("2026-01-31")), date("2026-01-01"));
    assert_eq!(Granularity::Month.next_bucket(date("2026-01-01")), date("2026-02-01"));
    assert_eq!(Granularity::Month.next_bucket(date("2026-12-01")), date("2027-01-01"));
}

#[test]
fn test_labels() {
    assert_eq!(Granularity::Day.label(date("2026-01-05")), "5 Jan");
    assert_eq!(Granularity::Week.label(date("2026-01-05")), "5 - 11 Jan");
    assert_eq!(Granularity::Week.label(date("2025-12-29")), "29 Dec - 4 Jan");
    assert_eq!(Granularity::Month.label(date("2026-03-01")), "Mar");
}

// =============================================================================
// Bucketing
// =============================================================================

#[test]
fn test_daily_buckets_gap_filled() {
    let points = vec![point("2026-01-03", 40), point("2026-01-07", 10)];
    let buckets = bucketize(&range("2026-01-01", "2026-01-10"), &points);

    assert_eq!(buckets.len(), 10);
    assert_eq!(buckets[0].label, "1 Jan");
    assert_eq!(buckets[9].label, "10 Jan");
    assert_eq!(buckets[2].value, Decimal::from(40));
    assert_eq!(buckets[6].value, Decimal::from(10));
    assert!(
        buckets
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2 && *i != 6)
            .all(|(_, b)| b.value == Decimal::ZERO)
    );
}

#[test]
fn test_empty_data_still_emits_every_bucket() {
    let buckets = bucketize(&range("2026-01-01", "2026-01-05"), &[]);
    assert_eq!(buckets.len(), 5);
    assert_eq!(total(&buckets), Decimal::ZERO);
}

#[test]
fn test_weekly_buckets() {
    // span 44 days → week
    let buckets = bucketize(&range("2026-01-01", "2026-02-14"), &[]);

    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "29 Dec - 4 Jan",
            "5 - 11 Jan",
            "12 - 18 Jan",
            "19 - 25 Jan",
            "26 Jan - 1 Feb",
            "2 - 8 Feb",
            "9 - 15 Feb"
        ]
    );
}

#[test]
fn test_weekly_buckets_reaggregate_days() {
    let points = vec![
        point("2026-01-06", 10),
        point("2026-01-08", 5),
        point("2026-01-12", 1),
    ];
    let buckets = bucketize_with(&range("2026-01-05", "2026-01-18"), Granularity::Week, &points);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].value, Decimal::from(15));
    assert_eq!(buckets[1].value, Decimal::from(1));
}

#[test]
fn test_weekly_buckets_accept_bucket_keyed_rows() {
    // Rows already truncated to the week start land in the same bucket
    let points = vec![point("2026-01-05", 15)];
    let buckets = bucketize_with(&range("2026-01-07", "2026-01-20"), Granularity::Week, &points);

    assert_eq!(buckets[0].bucket_start, date("2026-01-05"));
    assert_eq!(buckets[0].value, Decimal::from(15));
}

#[test]
fn test_monthly_buckets() {
    let points = vec![point("2026-02-03", 7), point("2026-02-27", 3)];
    let buckets = bucketize(&range("2026-01-15", "2026-04-20"), &points);

    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr"]);
    assert_eq!(buckets[1].value, Decimal::from(10));
    assert_eq!(total(&buckets), Decimal::from(10));
}

#[test]
fn test_monthly_buckets_across_year() {
    let buckets = bucketize(&range("2025-11-20", "2026-02-02"), &[]);
    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Nov", "Dec", "Jan", "Feb"]);
}

#[test]
fn test_single_day_range() {
    let buckets = bucketize(&range("2026-01-05", "2026-01-05"), &[point("2026-01-05", 3)]);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].value, Decimal::from(3));
}

#[test]
fn test_bucket_count_matches_calendar() {
    let cases = [
        ("2026-01-01", "2026-01-01"),
        ("2026-01-01", "2026-01-15"),
        ("2026-01-04", "2026-01-19"),
        ("2026-01-01", "2026-03-01"),
        ("2026-02-28", "2026-03-02"),
        ("2025-06-15", "2026-06-14"),
        ("2024-01-31", "2026-12-31"),
    ];

    for (start, end) in cases {
        let r = range(start, end);
        let granularity = Granularity::for_range(&r);
        let buckets = bucketize(&r, &[]);

        let expected = match granularity {
            Granularity::Day => r.days(),
            Granularity::Week => {
                let first = granularity.bucket_start(r.start);
                let last = granularity.bucket_start(r.end);
                (last - first).num_days() / 7 + 1
            }
            Granularity::Month => {
                let months = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
                months(r.end) - months(r.start) + 1
            }
        };

        assert_eq!(buckets.len() as i64, expected, "range {}", r);
        assert!(
            buckets.windows(2).all(|w| w[0].bucket_start < w[1].bucket_start),
            "range {} not ascending",
            r
        );
        if granularity == Granularity::Week {
            assert!(buckets.iter().all(|b| b.bucket_start.weekday() == Weekday::Mon));
        }
        if granularity == Granularity::Day {
            assert!(
                buckets
                    .windows(2)
                    .all(|w| w[1].bucket_start - w[0].bucket_start == Duration::days(1))
            );
        }
    }
}

#[test]
fn test_bucket_serializes_label_as_name() {
    let buckets = bucketize(&range("2026-01-05", "2026-01-05"), &[point("2026-01-05", 3)]);
    let json = serde_json::to_value(&buckets[0]).unwrap();

    assert_eq!(json["name"], "5 Jan");
    assert_eq!(json["value"], 3.0);
    assert!(json.get("bucket_start").is_none());
}
