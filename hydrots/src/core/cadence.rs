//! Inferred cadence of a time axis.

use serde::{Deserialize, Serialize};

/// The regular interval a time axis follows, or a flag that none exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    /// Fewer than two usable timestamps; classification is not possible.
    /// A normal terminal outcome, not a fault.
    Insufficient,
    /// Calendar-day step.
    Daily,
    /// Fixed sub-daily step in seconds.
    Regular(u32),
    /// No consistent step.
    Irregular,
}

impl Cadence {
    /// Step in seconds for cadences that define one.
    pub fn step_seconds(&self) -> Option<u32> {
        match self {
            Cadence::Daily => Some(86_400),
            Cadence::Regular(s) => Some(*s),
            _ => None,
        }
    }

    /// True when the axis can be padded to a complete range.
    pub fn is_regular(&self) -> bool {
        matches!(self, Cadence::Daily | Cadence::Regular(_))
    }
}
