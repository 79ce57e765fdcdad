//! Service layer: aggregation and data-quality reporting.
//!
//! These entry points sit on top of the transformations and are what the
//! surrounding orchestrator calls per monitored site.
//!
//! # Components
//!
//! - [`aggregate`]: collapse sub-daily series to daily values
//! - [`profile`]: per-series coverage and value-range reporting

pub mod aggregate;
pub mod profile;

pub use aggregate::{aggregate_daily, AggFn, DailyAggregate, DailyAggregation};
pub use profile::{profile, profile_with, summarize_values, CoverageReport, SeriesCoverage, SeriesSummary};
