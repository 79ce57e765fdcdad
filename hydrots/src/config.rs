//! Engine configuration file support.
//!
//! Recognized options mirror the knobs the orchestrator exposes per run:
//! the cadence-detection noise floor, the business-day boundary, and the
//! daily completeness threshold. The aggregation reducer is a typed
//! [`AggFn`](crate::services::AggFn) chosen in code, never a name in the
//! file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::services::aggregate::{AggFn, DailyAggregation};

/// Engine options, loadable from a TOML file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Noise floor for cadence detection, in seconds.
    #[serde(default = "default_min_step_seconds")]
    pub min_step_seconds: u32,
    /// Hour a business day starts at, in [0, 23].
    #[serde(default)]
    pub day_starts_at_hour: u8,
    /// Minimum daily data completeness, in [0.0, 1.0].
    #[serde(default = "default_min_completeness")]
    pub min_completeness: f64,
}

fn default_min_step_seconds() -> u32 {
    60
}

fn default_min_completeness() -> f64 {
    1.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_step_seconds: default_min_step_seconds(),
            day_starts_at_hour: 0,
            min_completeness: default_min_completeness(),
        }
    }
}

impl EngineConfig {
    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: EngineConfig = toml::from_str(&text)
            .map_err(|e| EngineError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.day_starts_at_hour > 23 {
            return Err(EngineError::Config(format!(
                "day_starts_at_hour must be in [0, 23], got {}",
                self.day_starts_at_hour
            )));
        }
        if !(0.0..=1.0).contains(&self.min_completeness) {
            return Err(EngineError::Config(format!(
                "min_completeness must be in [0, 1], got {}",
                self.min_completeness
            )));
        }
        Ok(())
    }

    /// Daily-aggregation options carrying these settings and `agg`.
    pub fn daily_aggregation(&self, agg: AggFn) -> DailyAggregation {
        DailyAggregation {
            day_starts_at_hour: self.day_starts_at_hour,
            min_completeness: self.min_completeness,
            min_step_seconds: self.min_step_seconds,
            agg,
        }
    }
}
