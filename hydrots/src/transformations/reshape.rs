//! Conversions between the wide, long, and per-series table shapes.

use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::algorithms::{classify_cadence, DEFAULT_MIN_STEP_SECONDS};
use crate::core::{AxisKind, Cadence, LongRow, LongTable, Series, Table, TimeAxis, Timestamp};
use crate::transformations::cleaning::trim;
use crate::transformations::regularize::regularize;

/// Result of a wide pivot.
///
/// `consistent` is false when the series could not share one regular axis
/// (the inconsistent-cadence case): the pivot is still produced, but left
/// un-padded.
#[derive(Debug, Clone, PartialEq)]
pub struct WidePivot {
    pub table: Table,
    pub consistent: bool,
}

/// Melts a wide table into long rows of (site, timestamp, value).
///
/// Each series is independently regularized before melting, so series with
/// different native cadences or spans are each padded to their own complete
/// range; the long output is their concatenation, not a single shared axis.
/// Rows are sorted by (site, timestamp).
pub fn to_long(table: &Table, value_name: &str) -> LongTable {
    let mut rows = Vec::new();
    for (site, single) in to_series_list(table) {
        let series = &single.series()[0];
        for (stamp, value) in single.axis().stamps().iter().zip(series.values()) {
            rows.push(LongRow {
                site: site.clone(),
                when: *stamp,
                value: *value,
            });
        }
    }
    rows.sort_by(|a, b| (&a.site, a.when).cmp(&(&b.site, b.when)));
    LongTable::new(value_name, rows)
}

/// Splits a wide table into one independently regularized single-series
/// table per column, keyed by site name.
pub fn to_series_list(table: &Table) -> BTreeMap<String, Table> {
    table
        .series()
        .iter()
        .map(|s| {
            let single = Table::from_parts(table.axis().clone(), vec![s.clone()]);
            (s.name().to_string(), regularize(&single))
        })
        .collect()
}

/// Pivots a long table back to the wide shape: one column per distinct site,
/// timestamp union across all series.
///
/// When a single consistent cadence holds across the combined axis the pivot
/// is regularized; otherwise it is returned sorted but un-padded, with
/// [`WidePivot::consistent`] set to false.
pub fn to_wide(long: &LongTable) -> WidePivot {
    if long.is_empty() {
        return WidePivot {
            table: Table::empty(),
            consistent: true,
        };
    }

    // A union mixing date-only and instant stamps is coerced to instants
    // (dates map to their midnight) so one axis can hold it.
    let mixed = {
        let first = long.rows()[0].when.kind();
        long.rows().iter().any(|r| r.when.kind() != first)
    };
    if mixed {
        warn!("pivot mixes date-only and instant stamps; coercing dates to midnight instants");
    }
    let stamp_of = |t: Timestamp| -> Timestamp {
        if mixed && t.kind() == AxisKind::Date {
            Timestamp::Instant(t.as_instant())
        } else {
            t
        }
    };

    // Sites in first-appearance order; the first value wins for duplicate
    // (site, timestamp) pairs.
    let mut sites: Vec<String> = Vec::new();
    let mut cells: HashMap<(usize, Timestamp), f64> = HashMap::new();
    let mut stamps: Vec<Timestamp> = Vec::new();
    for row in long.rows() {
        let site_idx = match sites.iter().position(|s| s == &row.site) {
            Some(i) => i,
            None => {
                sites.push(row.site.clone());
                sites.len() - 1
            }
        };
        let stamp = stamp_of(row.when);
        stamps.push(stamp);
        if let Some(v) = row.value {
            cells.entry((site_idx, stamp)).or_insert(v);
        }
    }
    stamps.sort();
    stamps.dedup();

    let series = sites
        .iter()
        .enumerate()
        .map(|(site_idx, site)| {
            Series::new(
                site.clone(),
                stamps
                    .iter()
                    .map(|stamp| cells.get(&(site_idx, *stamp)).copied())
                    .collect(),
            )
        })
        .collect();
    let table = Table::from_parts(TimeAxis::from_stamps(stamps), series);

    let cadence = classify_cadence(trim(&table).axis(), DEFAULT_MIN_STEP_SECONDS);
    if cadence == Cadence::Irregular {
        warn!("no consistent cadence across the combined axis; pivot left un-padded");
        return WidePivot {
            table,
            consistent: false,
        };
    }
    WidePivot {
        table: regularize(&table),
        consistent: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> Timestamp {
        Timestamp::Date(NaiveDate::from_ymd_opt(2024, 7, d).unwrap())
    }

    fn wide_two_sites() -> Table {
        let axis = TimeAxis::new(vec![date(1), date(2), date(4)]).unwrap();
        Table::new(
            axis,
            vec![
                Series::new("lake", vec![Some(10.0), None, Some(12.0)]),
                Series::new("flow", vec![Some(1.0), Some(2.0), Some(4.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_to_series_list_pads_each_series() {
        let split = to_series_list(&wide_two_sites());
        assert_eq!(split.len(), 2);
        // "flow" spans 4 days with one padded gap.
        assert_eq!(split["flow"].n_rows(), 4);
        assert_eq!(split["flow"].series()[0].value(2), None);
        // "lake" has no data on day 2, so its trimmed span is day 1..=4.
        assert_eq!(split["lake"].n_rows(), 4);
        assert_eq!(split["lake"].series()[0].value(0), Some(10.0));
    }

    #[test]
    fn test_to_long_sorted_and_padded() {
        let long = to_long(&wide_two_sites(), "Value");
        assert_eq!(long.value_name(), "Value");
        // Both series pad to 4 rows each.
        assert_eq!(long.len(), 8);
        let sites: Vec<&str> = long.rows().iter().map(|r| r.site.as_str()).collect();
        assert_eq!(&sites[..4], &["flow"; 4]);
        assert_eq!(&sites[4..], &["lake"; 4]);
        for w in long.rows()[..4].windows(2) {
            assert!(w[0].when < w[1].when);
        }
    }

    #[test]
    fn test_to_wide_round_trip_triples() {
        let t = wide_two_sites();
        let pivot = to_wide(&to_long(&t, "Value"));
        assert!(pivot.consistent);
        let w = &pivot.table;
        assert_eq!(w.n_rows(), 4);
        for s in t.series() {
            let back = w.column(s.name()).expect("column survives round trip");
            for (stamp, value) in t.axis().stamps().iter().zip(s.values()) {
                if value.is_some() {
                    let row = w.axis().stamps().iter().position(|x| x == stamp).unwrap();
                    assert_eq!(back.value(row), *value);
                }
            }
        }
    }

    #[test]
    fn test_to_wide_inconsistent_cadence_unpadded() {
        let base = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows = vec![
            LongRow {
                site: "a".into(),
                when: Timestamp::Instant(base),
                value: Some(1.0),
            },
            LongRow {
                site: "a".into(),
                when: Timestamp::Instant(base + chrono::Duration::seconds(3_600)),
                value: Some(2.0),
            },
            LongRow {
                site: "b".into(),
                when: Timestamp::Instant(base + chrono::Duration::seconds(9_000)),
                value: Some(3.0),
            },
        ];
        let pivot = to_wide(&LongTable::new("Value", rows));
        assert!(!pivot.consistent);
        assert_eq!(pivot.table.n_rows(), 3);
        assert_eq!(pivot.table.series_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_to_wide_empty() {
        let pivot = to_wide(&LongTable::new("Value", Vec::new()));
        assert!(pivot.consistent);
        assert!(pivot.table.is_empty());
    }
}
