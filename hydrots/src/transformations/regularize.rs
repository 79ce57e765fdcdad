//! Gap padding: inserting null rows at every missing timestamp.

use std::collections::HashMap;

use chrono::Duration;
use log::debug;

use crate::algorithms::{classify_cadence, DEFAULT_MIN_STEP_SECONDS};
use crate::core::{AxisKind, Series, Table, TimeAxis, Timestamp};
use crate::transformations::cleaning::trim;

/// Pads a table to a complete, gap-explicit axis at its detected cadence.
///
/// The table is trimmed and classified first. A daily axis is completed with
/// every calendar date between the observed minimum and maximum; a regular
/// sub-daily axis with every instant at the detected step. Rows generated for
/// missing timestamps carry nulls in every series column. An irregular or
/// unclassifiable table is returned trimmed but otherwise unchanged, since no
/// synthetic timestamps can be safely inserted. Idempotent.
pub fn regularize(table: &Table) -> Table {
    regularize_with(table, DEFAULT_MIN_STEP_SECONDS)
}

/// [`regularize`] with an explicit noise floor for cadence detection.
pub fn regularize_with(table: &Table, min_step_seconds: u32) -> Table {
    let trimmed = trim(table);
    if trimmed.is_empty() {
        return trimmed;
    }

    let cadence = classify_cadence(trimmed.axis(), min_step_seconds);
    let Some(step) = cadence.step_seconds() else {
        debug!("cadence {cadence:?}: returning trimmed table unpadded");
        return trimmed;
    };

    let stamps = trimmed.axis().stamps();
    let (first, last) = (stamps[0], stamps[stamps.len() - 1]);
    let full = generate_axis(first, last, step);
    debug!(
        "padding {} observed rows to {} rows at a {step}s step",
        stamps.len(),
        full.len()
    );

    // Left merge of the generated axis against the observed rows. The first
    // occurrence wins for duplicate stamps.
    let mut by_stamp: HashMap<Timestamp, usize> = HashMap::with_capacity(stamps.len());
    for (row, &stamp) in stamps.iter().enumerate() {
        by_stamp.entry(stamp).or_insert(row);
    }
    let series = trimmed
        .series()
        .iter()
        .map(|s| {
            Series::new(
                s.name(),
                full.iter()
                    .map(|stamp| by_stamp.get(stamp).and_then(|&row| s.value(row)))
                    .collect(),
            )
        })
        .collect();
    Table::from_parts(TimeAxis::from_stamps(full), series)
}

/// Complete timestamp range from `first` to `last` inclusive, preserving the
/// axis kind of the endpoints.
fn generate_axis(first: Timestamp, last: Timestamp, step_seconds: u32) -> Vec<Timestamp> {
    let mut out = Vec::new();
    match first.kind() {
        AxisKind::Date => {
            let step_days = i64::from(step_seconds / 86_400).max(1);
            let (mut d, end) = (first.date(), last.date());
            while d <= end {
                out.push(Timestamp::Date(d));
                match d.checked_add_signed(Duration::days(step_days)) {
                    Some(next) => d = next,
                    None => break,
                }
            }
        }
        AxisKind::Instant => {
            let (mut t, end) = (first.as_instant(), last.as_instant());
            while t <= end {
                out.push(Timestamp::Instant(t));
                match t.checked_add_signed(Duration::seconds(i64::from(step_seconds))) {
                    Some(next) => t = next,
                    None => break,
                }
            }
        }
    }
    out
}
