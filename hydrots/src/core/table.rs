//! Tabular time-series containers with explicit nulls.
//!
//! A [`Table`] is the wide shape: one [`TimeAxis`] plus one or more named
//! [`Series`] aligned to it. A [`LongTable`] is the equivalent long shape:
//! rows of (site, timestamp, value). Values are `Option<f64>` throughout, so
//! a gap is an explicit null, never a sentinel.
//!
//! All containers are plain values: constructed once, never mutated in place,
//! handed from one engine operation to the next.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The semantic kind of a time axis.
///
/// A table either carries calendar dates with no time-of-day (`Date`) or
/// full instants at a fixed process-wide offset (`Instant`); the two kinds
/// never mix within one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    Date,
    Instant,
}

/// A single point on a time axis.
///
/// # Examples
///
/// ```
/// use hydrots::core::Timestamp;
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let a = Timestamp::Date(d);
/// let b = Timestamp::Instant(d.and_hms_opt(6, 0, 0).unwrap());
/// assert_eq!(b.seconds_since(&a.date_start()), 6 * 3600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timestamp {
    Date(NaiveDate),
    Instant(NaiveDateTime),
}

impl Timestamp {
    pub fn kind(&self) -> AxisKind {
        match self {
            Timestamp::Date(_) => AxisKind::Date,
            Timestamp::Instant(_) => AxisKind::Instant,
        }
    }

    /// Calendar date of this point (the date component for instants).
    pub fn date(&self) -> NaiveDate {
        match self {
            Timestamp::Date(d) => *d,
            Timestamp::Instant(dt) => dt.date(),
        }
    }

    /// This point as an instant; a date maps to its midnight.
    pub fn as_instant(&self) -> NaiveDateTime {
        match self {
            Timestamp::Date(d) => d.and_time(NaiveTime::MIN),
            Timestamp::Instant(dt) => *dt,
        }
    }

    /// Midnight-anchored copy of this point, preserving only the date.
    pub fn date_start(&self) -> Timestamp {
        Timestamp::Instant(self.date().and_time(NaiveTime::MIN))
    }

    /// Whole seconds elapsed since `earlier` (negative if `earlier` is later).
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        self.as_instant()
            .signed_duration_since(earlier.as_instant())
            .num_seconds()
    }

    /// True for instants that fall exactly on midnight, and for all dates.
    pub fn is_midnight_aligned(&self) -> bool {
        match self {
            Timestamp::Date(_) => true,
            Timestamp::Instant(dt) => dt.time() == NaiveTime::MIN,
        }
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(d: NaiveDate) -> Self {
        Timestamp::Date(d)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::Instant(dt)
    }
}

/// An ordered sequence of timestamps of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    stamps: Vec<Timestamp>,
}

impl TimeAxis {
    /// Builds an axis, rejecting a mix of date-only and instant stamps.
    pub fn new(stamps: Vec<Timestamp>) -> EngineResult<Self> {
        if let Some(first) = stamps.first() {
            let kind = first.kind();
            if stamps.iter().any(|s| s.kind() != kind) {
                return Err(EngineError::MixedAxisKinds);
            }
        }
        Ok(Self { stamps })
    }

    pub fn empty() -> Self {
        Self { stamps: Vec::new() }
    }

    /// Internal constructor for stamps already known to share one kind.
    pub(crate) fn from_stamps(stamps: Vec<Timestamp>) -> Self {
        Self { stamps }
    }

    /// Axis kind, or `None` for an empty axis.
    pub fn kind(&self) -> Option<AxisKind> {
        self.stamps.first().map(Timestamp::kind)
    }

    pub fn stamps(&self) -> &[Timestamp] {
        &self.stamps
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Number of distinct stamps, regardless of input order.
    pub fn distinct_count(&self) -> usize {
        let mut sorted = self.stamps.clone();
        sorted.sort();
        sorted.dedup();
        sorted.len()
    }
}

/// A named series of nullable values aligned 1:1 with a time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `row`, null when missing or out of range.
    pub fn value(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }

    /// Count of non-null observations.
    pub fn observed_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// The wide table shape: one shared time axis, one column per site.
///
/// # Examples
///
/// ```
/// use hydrots::core::{Series, Table, TimeAxis, Timestamp};
/// use chrono::NaiveDate;
///
/// let axis = TimeAxis::new(
///     (1..=3)
///         .map(|d| Timestamp::Date(NaiveDate::from_ymd_opt(2024, 1, d).unwrap()))
///         .collect(),
/// )
/// .unwrap();
/// let flow = Series::new("66401", vec![Some(1.2), None, Some(0.8)]);
/// let table = Table::new(axis, vec![flow]).unwrap();
/// assert_eq!(table.n_rows(), 3);
/// assert_eq!(table.series()[0].observed_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    axis: TimeAxis,
    series: Vec<Series>,
}

impl Table {
    /// Builds a wide table, rejecting series whose length does not match the axis.
    pub fn new(axis: TimeAxis, series: Vec<Series>) -> EngineResult<Self> {
        for s in &series {
            if s.len() != axis.len() {
                return Err(EngineError::LengthMismatch {
                    series: s.name().to_string(),
                    expected: axis.len(),
                    actual: s.len(),
                });
            }
        }
        Ok(Self { axis, series })
    }

    pub fn empty() -> Self {
        Self {
            axis: TimeAxis::empty(),
            series: Vec::new(),
        }
    }

    /// Internal constructor for parts already aligned by construction.
    pub(crate) fn from_parts(axis: TimeAxis, series: Vec<Series>) -> Self {
        debug_assert!(series.iter().all(|s| s.len() == axis.len()));
        Self { axis, series }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(Series::name).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.axis.len()
    }

    pub fn n_series(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// True when every value column is null at `row`.
    pub fn row_is_all_null(&self, row: usize) -> bool {
        self.series.iter().all(|s| s.value(row).is_none())
    }
}

/// One observation in the long shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    pub site: String,
    pub when: Timestamp,
    pub value: Option<f64>,
}

/// The long table shape: rows of (site, timestamp, value).
///
/// `value_name` labels the value column for downstream persistence; the
/// engine itself never dispatches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTable {
    value_name: String,
    rows: Vec<LongRow>,
}

impl LongTable {
    pub fn new(value_name: impl Into<String>, rows: Vec<LongRow>) -> Self {
        Self {
            value_name: value_name.into(),
            rows,
        }
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
