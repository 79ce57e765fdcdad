//! Timestamp classification: daily, fixed sub-daily step, or irregular.
//!
//! Real monitoring feeds contain occasional duplicate or sub-minute jitter
//! timestamps. Successive differences below the noise floor are discarded
//! before the step search, so a single glitch does not turn a regular hourly
//! feed into an irregular one.

use log::debug;

use crate::core::{AxisKind, Cadence, TimeAxis};

/// Default noise floor for cadence detection, in seconds.
pub const DEFAULT_MIN_STEP_SECONDS: u32 = 60;

/// Infers the cadence of a time axis.
///
/// The axis is expected to be trimmed first (all-null rows removed) so that
/// classification only sees rows carrying data. Behaviour:
///
/// - fewer than two distinct timestamps: [`Cadence::Insufficient`];
/// - a date-only axis: [`Cadence::Daily`];
/// - otherwise the minimum successive difference at or above
///   `min_step_seconds` is the candidate step; [`Cadence::Regular`] when every
///   surviving difference is an exact multiple of it, [`Cadence::Irregular`]
///   when not. A midnight-aligned instant axis at an 86 400 s step is a daily
///   series that arrived with a datetime dtype and classifies as `Daily`.
///
/// # Examples
///
/// ```
/// use hydrots::algorithms::{classify_cadence, DEFAULT_MIN_STEP_SECONDS};
/// use hydrots::core::{Cadence, TimeAxis, Timestamp};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let stamps = (0..5)
///     .map(|h| Timestamp::Instant(start.and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::hours(h)))
///     .collect();
/// let axis = TimeAxis::new(stamps).unwrap();
/// assert_eq!(
///     classify_cadence(&axis, DEFAULT_MIN_STEP_SECONDS),
///     Cadence::Regular(3_600)
/// );
/// ```
pub fn classify_cadence(axis: &TimeAxis, min_step_seconds: u32) -> Cadence {
    let mut stamps = axis.stamps().to_vec();
    stamps.sort();
    stamps.dedup();

    if stamps.len() < 2 {
        return Cadence::Insufficient;
    }
    if axis.kind() == Some(AxisKind::Date) {
        return Cadence::Daily;
    }

    let usable: Vec<i64> = stamps
        .windows(2)
        .map(|w| w[1].seconds_since(&w[0]))
        .filter(|&d| d >= i64::from(min_step_seconds))
        .collect();

    let Some(&step) = usable.iter().min() else {
        // Every gap sits below the noise floor: nothing usable to classify.
        debug!("all successive differences below {min_step_seconds}s noise floor");
        return Cadence::Insufficient;
    };
    if usable.iter().any(|d| d % step != 0) {
        debug!("candidate step {step}s is not a common divisor of the gaps");
        return Cadence::Irregular;
    }

    let Ok(step) = u32::try_from(step) else {
        // A step wider than u32 seconds means two lone points decades apart.
        return Cadence::Irregular;
    };
    if step == 86_400 && stamps.iter().all(|s| s.is_midnight_aligned()) {
        return Cadence::Daily;
    }
    Cadence::Regular(step)
}
