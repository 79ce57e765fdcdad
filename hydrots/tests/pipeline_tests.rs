//! End-to-end pipeline tests: trim, regularize, reshape, aggregate, profile.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use hydrots::core::{Cadence, Series, Table, TimeAxis, Timestamp};
use hydrots::services::aggregate::{aggregate_daily, AggFn, DailyAggregation};
use hydrots::services::profile::{profile, summarize_values};
use hydrots::transformations::{regularize, to_long, to_series_list, to_wide, trim};
use hydrots::{classify_cadence, EngineConfig};

fn hour_stamp(h: i64) -> Timestamp {
    Timestamp::Instant(
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
            + Duration::hours(h),
    )
}

/// Hourly single-series table starting 2024-03-01 01:00 (hour-ending stamps).
fn hourly_table(site: &str, values: Vec<Option<f64>>) -> Table {
    let stamps = (0..values.len() as i64).map(hour_stamp).collect();
    Table::new(
        TimeAxis::new(stamps).unwrap(),
        vec![Series::new(site, values)],
    )
    .unwrap()
}

#[test]
fn full_pipeline_hourly_flow_feed() {
    // Three full business days of hourly flow; the second day loses half
    // its readings.
    let mut values: Vec<Option<f64>> = (0..72).map(|i| Some(1.0 + (i % 24) as f64)).collect();
    for v in values.iter_mut().skip(24).take(12) {
        *v = None;
    }
    let table = hourly_table("66415", values);

    let padded = regularize(&table);
    assert_eq!(padded.n_rows(), 72);
    assert_eq!(
        classify_cadence(padded.axis(), 60),
        Cadence::Regular(3_600)
    );

    // Default config: full completeness required, so day 2 drops out and is
    // padded back as a null.
    let opts = EngineConfig::default().daily_aggregation(AggFn::mean());
    let daily = aggregate_daily(&table, &opts).unwrap();
    assert_eq!(daily.site, "66415");
    assert_eq!(daily.table.n_rows(), 3);
    let agg = &daily.table.series()[0];
    assert_eq!(agg.name(), "Agg_mean");
    assert!((agg.value(0).unwrap() - 12.5).abs() < 1e-9);
    assert_eq!(agg.value(1), None);
    assert!((agg.value(2).unwrap() - 12.5).abs() < 1e-9);

    // Relaxed threshold keeps the half-complete day.
    let relaxed = DailyAggregation {
        min_completeness: 0.5,
        ..Default::default()
    };
    let daily = aggregate_daily(&table, &relaxed).unwrap();
    assert!(daily.table.series()[0].value(1).is_some());

    let report = profile(&table);
    assert_eq!(report.cadence, Cadence::Regular(3_600));
    assert_eq!(report.series[0].count, 60);
    assert!(report.series[0].completeness_pct.unwrap() < 100.0);

    let summary = &summarize_values(&table)[0];
    assert_eq!(summary.count, 60);
    assert_eq!(summary.min, Some(1.0));
    assert_eq!(summary.max, Some(24.0));
}

#[test]
fn reshape_round_trip_preserves_observations() {
    let axis = TimeAxis::new(
        (1..=5)
            .map(|d| Timestamp::Date(NaiveDate::from_ymd_opt(2024, 3, d).unwrap()))
            .collect(),
    )
    .unwrap();
    let table = Table::new(
        axis,
        vec![
            Series::new("rain", vec![Some(0.0), None, Some(4.5), None, Some(1.0)]),
            Series::new("lake", vec![None, Some(12.1), Some(12.3), Some(12.2), None]),
        ],
    )
    .unwrap();

    let pivot = to_wide(&to_long(&table, "Value"));
    assert!(pivot.consistent);
    for s in table.series() {
        let back = pivot.table.column(s.name()).unwrap();
        for (stamp, value) in table.axis().stamps().iter().zip(s.values()) {
            if value.is_some() {
                let row = pivot
                    .table
                    .axis()
                    .stamps()
                    .iter()
                    .position(|x| x == stamp)
                    .unwrap();
                assert_eq!(back.value(row), *value);
            }
        }
    }

    // Per-series split matches the wide pivot column by column after each
    // side's own gap padding.
    let split = to_series_list(&table);
    for (site, single) in &split {
        let padded = regularize(&Table::new(
            table.axis().clone(),
            vec![table.column(site).unwrap().clone()],
        )
        .unwrap());
        assert_eq!(single, &padded);
    }
}

#[test]
fn coverage_report_includes_absent_series() {
    let table = Table::new(
        TimeAxis::new((0..4).map(hour_stamp).collect()).unwrap(),
        vec![
            Series::new("online", vec![Some(1.0); 4]),
            Series::new("offline", vec![None; 4]),
        ],
    )
    .unwrap();
    let report = profile(&table);
    let sites: Vec<&str> = report.series.iter().map(|c| c.site.as_str()).collect();
    assert_eq!(sites, vec!["online", "offline"]);
    assert_eq!(report.series[1].count, 0);
    assert!(report.series[1].completeness_pct.is_none());
}

#[test]
fn coverage_report_serializes() {
    let table = hourly_table("66415", vec![Some(1.0), Some(2.0), Some(3.0)]);
    let report = profile(&table);
    let json = serde_json::to_string(&report).unwrap();
    let back: hydrots::CoverageReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

proptest! {
    #[test]
    fn trim_is_idempotent(values in prop::collection::vec(prop::option::of(-1e6f64..1e6), 0..80)) {
        let table = hourly_table("66415", values);
        let once = trim(&table);
        prop_assert_eq!(trim(&once), once);
    }

    #[test]
    fn regularize_is_idempotent(mask in prop::collection::vec(any::<bool>(), 0..80)) {
        let values: Vec<Option<f64>> = mask
            .iter()
            .map(|&keep| if keep { Some(1.0) } else { None })
            .collect();
        let table = hourly_table("66415", values);
        let once = regularize(&table);
        prop_assert_eq!(regularize(&once), once.clone());

        // When a regular cadence was detected, the padded axis has no gaps
        // at the detected step.
        let cadence = classify_cadence(once.axis(), 60);
        if let Some(step) = cadence.step_seconds() {
            for w in once.axis().stamps().windows(2) {
                prop_assert_eq!(w[1].seconds_since(&w[0]), i64::from(step));
            }
        }
    }

    #[test]
    fn wide_long_round_trip_triples(
        a in prop::collection::vec(prop::option::of(-1e6f64..1e6), 1..40),
        b in prop::collection::vec(prop::option::of(-1e6f64..1e6), 1..40),
    ) {
        let n = a.len().max(b.len());
        let pad = |mut v: Vec<Option<f64>>| {
            v.resize(n, None);
            v
        };
        let table = Table::new(
            TimeAxis::new((0..n as i64).map(hour_stamp).collect()).unwrap(),
            vec![Series::new("a", pad(a)), Series::new("b", pad(b))],
        )
        .unwrap();

        let mut observed: Vec<(String, Timestamp, u64)> = Vec::new();
        for s in table.series() {
            for (stamp, value) in table.axis().stamps().iter().zip(s.values()) {
                if let Some(v) = value {
                    observed.push((s.name().to_string(), *stamp, v.to_bits()));
                }
            }
        }
        observed.sort();

        let pivot = to_wide(&to_long(&table, "Value"));
        let mut round_tripped: Vec<(String, Timestamp, u64)> = Vec::new();
        for s in pivot.table.series() {
            for (stamp, value) in pivot.table.axis().stamps().iter().zip(s.values()) {
                if let Some(v) = value {
                    round_tripped.push((s.name().to_string(), *stamp, v.to_bits()));
                }
            }
        }
        round_tripped.sort();

        prop_assert_eq!(round_tripped, observed);
    }
}
