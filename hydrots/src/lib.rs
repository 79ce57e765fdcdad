//! Gap-aware regularization and aggregation of environmental monitoring
//! time series (flow, rainfall, lake level, water-use).
//!
//! Feeds arrive with an unknown, possibly irregular sampling interval. The
//! engine turns them into a canonical representation: it infers the cadence
//! of a time axis, pads every missing timestamp with an explicit null,
//! collapses sub-daily series to daily values under a completeness threshold,
//! reshapes between wide/long/per-series views, and reports per-series
//! coverage. Everything operates on in-memory tables; retrieval, file I/O,
//! and report rendering live in external collaborators.
//!
//! Every operation is a pure, synchronous function over a [`core::Table`];
//! independent tables can be processed in parallel by the caller.
//!
//! ```
//! use hydrots::core::{Series, Table, TimeAxis, Timestamp};
//! use hydrots::transformations::regularize;
//! use chrono::NaiveDate;
//!
//! let day = |d: u32| Timestamp::Date(NaiveDate::from_ymd_opt(2024, 1, d).unwrap());
//! let table = Table::new(
//!     TimeAxis::new(vec![day(1), day(4)]).unwrap(),
//!     vec![Series::new("66401", vec![Some(1.2), Some(0.8)])],
//! )
//! .unwrap();
//! let padded = regularize(&table);
//! assert_eq!(padded.n_rows(), 4); // days 2 and 3 inserted as nulls
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod transformations;

pub use algorithms::{classify_cadence, DEFAULT_MIN_STEP_SECONDS};
pub use config::EngineConfig;
pub use core::{Cadence, LongRow, LongTable, Series, Table, TimeAxis, Timestamp};
pub use error::{EngineError, EngineResult};
pub use services::{
    aggregate_daily, profile, summarize_values, AggFn, CoverageReport, DailyAggregation,
};
pub use transformations::{regularize, to_long, to_series_list, to_wide, trim, WidePivot};
