//! Hourly-to-daily aggregation under the hour-ending convention.
//!
//! Monitoring feeds stamp each record with the hour that just ended, so a
//! value stamped 00:00 belongs to the previous calendar day. Bucketing
//! therefore shifts every timestamp backward by `1 + day_starts_at_hour`
//! hours before truncating to a date. The shift is covered explicitly by
//! tests; it is an easy place for an off-by-one.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use log::warn;

use crate::algorithms::DEFAULT_MIN_STEP_SECONDS;
use crate::core::{AxisKind, Series, Table, TimeAxis, Timestamp};
use crate::error::{EngineError, EngineResult};
use crate::transformations::regularize::regularize_with;

/// A null-skipping reducer over the non-null values of a day bucket, paired
/// with the identifier embedded in the output column name.
#[derive(Debug, Clone, Copy)]
pub struct AggFn {
    name: &'static str,
    func: fn(&[f64]) -> f64,
}

impl AggFn {
    /// Wraps a custom reducer. `func` only ever sees non-null values and is
    /// never called on an empty bucket.
    pub const fn new(name: &'static str, func: fn(&[f64]) -> f64) -> Self {
        Self { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, values: &[f64]) -> f64 {
        (self.func)(values)
    }

    /// Arithmetic mean, the default reducer.
    pub const fn mean() -> Self {
        Self::new("mean", |v| v.iter().sum::<f64>() / v.len() as f64)
    }

    pub const fn sum() -> Self {
        Self::new("sum", |v| v.iter().sum())
    }

    pub const fn min() -> Self {
        Self::new("min", |v| v.iter().copied().fold(f64::INFINITY, f64::min))
    }

    pub const fn max() -> Self {
        Self::new("max", |v| {
            v.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        })
    }
}

/// Options for [`aggregate_daily`].
#[derive(Debug, Clone, Copy)]
pub struct DailyAggregation {
    /// Hour a "business day" starts at, in [0, 23].
    pub day_starts_at_hour: u8,
    /// Minimum fraction of the 24 hourly slots that must hold data for a day
    /// to be aggregated, in [0.0, 1.0].
    pub min_completeness: f64,
    /// Noise floor handed to cadence detection of the input.
    pub min_step_seconds: u32,
    pub agg: AggFn,
}

impl Default for DailyAggregation {
    fn default() -> Self {
        Self {
            day_starts_at_hour: 0,
            min_completeness: 1.0,
            min_step_seconds: DEFAULT_MIN_STEP_SECONDS,
            agg: AggFn::mean(),
        }
    }
}

impl DailyAggregation {
    fn validate(&self) -> EngineResult<()> {
        if self.day_starts_at_hour > 23 {
            return Err(EngineError::InvalidArgument(format!(
                "day_starts_at_hour must be in [0, 23], got {}",
                self.day_starts_at_hour
            )));
        }
        if !(0.0..=1.0).contains(&self.min_completeness) {
            return Err(EngineError::InvalidArgument(format!(
                "min_completeness must be in [0, 1], got {}",
                self.min_completeness
            )));
        }
        Ok(())
    }
}

/// A daily aggregate together with the site it was derived from.
///
/// The table holds one series named `Agg_<reducer>`; the original series
/// identifier travels in `site`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub site: String,
    pub table: Table,
}

/// Collapses a single-series hourly table to daily values.
///
/// The input is regularized first, so every hour across the observed span is
/// present. Each timestamp is shifted back by `1 + day_starts_at_hour` hours
/// and truncated to a date; a bucket's completeness is its non-null count
/// over 24, and buckets below `min_completeness` are dropped. Retained
/// buckets reduce their non-null values with `agg`. A non-empty result is
/// regularized again so days lost to the completeness filter reappear as
/// nulls.
///
/// Out-of-range options fail with [`EngineError::InvalidArgument`] before any
/// processing. A table with no series, or one that is already daily, yields
/// an empty well-typed result rather than an error.
pub fn aggregate_daily(table: &Table, opts: &DailyAggregation) -> EngineResult<DailyAggregate> {
    opts.validate()?;

    let column_name = format!("Agg_{}", opts.agg.name());
    let Some(first_series) = table.series().first() else {
        warn!("aggregate_daily called on a table with no series");
        return Ok(DailyAggregate {
            site: String::new(),
            table: empty_daily(&column_name),
        });
    };
    let site = first_series.name().to_string();
    if table.axis().kind() == Some(AxisKind::Date) {
        warn!("aggregate_daily expects a sub-daily series; got a date-only axis for '{site}'");
        return Ok(DailyAggregate {
            site,
            table: empty_daily(&column_name),
        });
    }

    let hourly = regularize_with(
        &Table::from_parts(table.axis().clone(), vec![first_series.clone()]),
        opts.min_step_seconds,
    );

    let shift = Duration::hours(1 + i64::from(opts.day_starts_at_hour));
    let mut buckets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    let series = &hourly.series()[0];
    for (stamp, value) in hourly.axis().stamps().iter().zip(series.values()) {
        let Some(v) = value else { continue };
        let Some(shifted) = stamp.as_instant().checked_sub_signed(shift) else {
            continue;
        };
        buckets.entry(shifted.date()).or_default().push(*v);
    }

    let rows: Vec<(NaiveDate, f64)> = buckets
        .into_iter()
        .filter(|(_, values)| values.len() as f64 / 24.0 >= opts.min_completeness)
        .map(|(day, values)| (day, opts.agg.apply(&values)))
        .collect();

    let daily = Table::from_parts(
        TimeAxis::from_stamps(rows.iter().map(|(d, _)| Timestamp::Date(*d)).collect()),
        vec![Series::new(
            column_name.clone(),
            rows.iter().map(|(_, v)| Some(*v)).collect(),
        )],
    );
    let daily = if daily.is_empty() {
        empty_daily(&column_name)
    } else {
        regularize_with(&daily, opts.min_step_seconds)
    };
    Ok(DailyAggregate { site, table: daily })
}

fn empty_daily(column_name: &str) -> Table {
    Table::from_parts(
        TimeAxis::empty(),
        vec![Series::new(column_name, Vec::new())],
    )
}
