//! Per-series coverage statistics and value-range summaries.

use serde::{Deserialize, Serialize};

use crate::algorithms::{classify_cadence, DEFAULT_MIN_STEP_SECONDS};
use crate::core::{Cadence, Table, Timestamp};
use crate::transformations::cleaning::trim;

const DAYS_PER_YEAR: f64 = 365.2422;

/// Coverage of one series against the detected cadence.
///
/// `completeness_pct` is omitted when the cadence defines no step. A series
/// with zero observations keeps its row with nulled statistics, so a caller
/// can detect "series requested but entirely absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCoverage {
    pub site: String,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub count: usize,
    pub span_years: Option<f64>,
    pub completeness_pct: Option<f64>,
}

/// Coverage report over every series of a table.
///
/// The row set always equals the input series-name set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub cadence: Cadence,
    pub series: Vec<SeriesCoverage>,
}

/// Computes per-series coverage against the cadence of the shared axis.
pub fn profile(table: &Table) -> CoverageReport {
    profile_with(table, DEFAULT_MIN_STEP_SECONDS)
}

/// [`profile`] with an explicit noise floor for cadence detection.
///
/// For a regular cadence the theoretical maximum observation count is
/// boundary-inclusive: a series spanning exactly one cadence step holds two
/// of two possible observations and reports 100 %.
pub fn profile_with(table: &Table, min_step_seconds: u32) -> CoverageReport {
    let trimmed = trim(table);
    let cadence = classify_cadence(trimmed.axis(), min_step_seconds);
    let step_days = cadence.step_seconds().map(|s| f64::from(s) / 86_400.0);

    let series = trimmed
        .series()
        .iter()
        .map(|s| {
            let observed: Vec<Timestamp> = trimmed
                .axis()
                .stamps()
                .iter()
                .zip(s.values())
                .filter(|(_, v)| v.is_some())
                .map(|(stamp, _)| *stamp)
                .collect();

            let (Some(first), Some(last)) = (observed.first(), observed.last()) else {
                return SeriesCoverage {
                    site: s.name().to_string(),
                    start: None,
                    end: None,
                    count: 0,
                    span_years: None,
                    completeness_pct: None,
                };
            };

            let raw_span_years =
                last.seconds_since(first) as f64 / (86_400.0 * DAYS_PER_YEAR);
            let (span_years, completeness_pct) = match step_days {
                Some(sd) => {
                    let n_expected = raw_span_years * DAYS_PER_YEAR + sd;
                    (
                        raw_span_years + sd / DAYS_PER_YEAR,
                        Some(observed.len() as f64 * sd / n_expected * 100.0),
                    )
                }
                None => (raw_span_years, None),
            };
            SeriesCoverage {
                site: s.name().to_string(),
                start: Some(*first),
                end: Some(*last),
                count: observed.len(),
                span_years: Some(span_years),
                completeness_pct,
            }
        })
        .collect();

    CoverageReport { cadence, series }
}

/// Value range of one series: extremes and the timestamps they occurred at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub site: String,
    pub count: usize,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub min: Option<f64>,
    pub time_of_min: Option<Timestamp>,
    pub max: Option<f64>,
    pub time_of_max: Option<Timestamp>,
}

/// Per-series value summary for data-checking reports.
///
/// Ties on the extreme value resolve to its earliest occurrence.
pub fn summarize_values(table: &Table) -> Vec<SeriesSummary> {
    let trimmed = trim(table);
    trimmed
        .series()
        .iter()
        .map(|s| {
            let mut summary = SeriesSummary {
                site: s.name().to_string(),
                count: 0,
                start: None,
                end: None,
                min: None,
                time_of_min: None,
                max: None,
                time_of_max: None,
            };
            for (stamp, value) in trimmed.axis().stamps().iter().zip(s.values()) {
                let Some(v) = value else { continue };
                summary.count += 1;
                summary.start.get_or_insert(*stamp);
                summary.end = Some(*stamp);
                if summary.min.map_or(true, |m| *v < m) {
                    summary.min = Some(*v);
                    summary.time_of_min = Some(*stamp);
                }
                if summary.max.map_or(true, |m| *v > m) {
                    summary.max = Some(*v);
                    summary.time_of_max = Some(*stamp);
                }
            }
            summary
        })
        .collect()
}
