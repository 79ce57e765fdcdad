//! Table transformations: trimming, gap padding, and reshaping.
//!
//! # Components
//!
//! - [`cleaning`]: drop all-null rows and restore chronological order
//! - [`regularize`]: pad every missing timestamp implied by the cadence
//! - [`reshape`]: convert between the wide, long, and per-series shapes

pub mod cleaning;
pub mod regularize;
pub mod reshape;

pub use cleaning::trim;
pub use regularize::{regularize, regularize_with};
pub use reshape::{to_long, to_series_list, to_wide, WidePivot};
