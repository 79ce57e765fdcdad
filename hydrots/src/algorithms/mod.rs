//! Analytical algorithms over time axes.
//!
//! # Components
//!
//! - [`cadence`]: infer the temporal resolution of a time axis

pub mod cadence;

pub use cadence::{classify_cadence, DEFAULT_MIN_STEP_SECONDS};
