//! Core domain model for gap-aware environmental time series.
//!
//! This module defines the fundamental data structures shared by every engine
//! operation: timestamps, time axes, named series, and the wide/long table
//! shapes, plus the inferred cadence of a time axis.

pub mod cadence;
pub mod table;

pub use cadence::Cadence;
pub use table::{AxisKind, LongRow, LongTable, Series, Table, TimeAxis, Timestamp};
