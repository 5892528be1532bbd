use serde::{Deserialize, Serialize};

use crate::core::TimeRange;
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{DEFAULT_WHEEL_ZOOM_IN_FACTOR, DEFAULT_WHEEL_ZOOM_OUT_FACTOR};
use crate::ticks::TickPlanConfig;

const DEFAULT_WHEEL_PAN_STEP_RATIO: f64 = 0.1;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep timeline setup next to the rest of their
/// settings. Everything except `total_range` falls back to defaults when
/// missing from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub total_range: TimeRange,
    #[serde(default)]
    pub initial_range: Option<TimeRange>,
    #[serde(default)]
    pub ticks: TickPlanConfig,
    #[serde(default = "default_wheel_zoom_in_factor")]
    pub wheel_zoom_in_factor: f64,
    #[serde(default = "default_wheel_zoom_out_factor")]
    pub wheel_zoom_out_factor: f64,
    #[serde(default = "default_wheel_pan_step_ratio")]
    pub wheel_pan_step_ratio: f64,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(total_range: TimeRange) -> Self {
        Self {
            total_range,
            initial_range: None,
            ticks: TickPlanConfig::default(),
            wheel_zoom_in_factor: default_wheel_zoom_in_factor(),
            wheel_zoom_out_factor: default_wheel_zoom_out_factor(),
            wheel_pan_step_ratio: default_wheel_pan_step_ratio(),
        }
    }

    /// Starts the visible range at a subset of the total range.
    #[must_use]
    pub fn with_initial_range(mut self, range: TimeRange) -> Self {
        self.initial_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_tick_config(mut self, ticks: TickPlanConfig) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.wheel_zoom_in_factor = zoom_in;
        self.wheel_zoom_out_factor = zoom_out;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        self.ticks.validate()?;
        if !self.wheel_zoom_in_factor.is_finite()
            || self.wheel_zoom_in_factor <= 0.0
            || self.wheel_zoom_in_factor >= 1.0
        {
            return Err(TimelineError::InvalidData(
                "wheel zoom-in factor must be finite and within (0, 1)".to_owned(),
            ));
        }
        if !self.wheel_zoom_out_factor.is_finite() || self.wheel_zoom_out_factor <= 1.0 {
            return Err(TimelineError::InvalidData(
                "wheel zoom-out factor must be finite and > 1".to_owned(),
            ));
        }
        if !self.wheel_pan_step_ratio.is_finite() || self.wheel_pan_step_ratio < 0.0 {
            return Err(TimelineError::InvalidData(
                "wheel pan step ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline config: {e}"))
        })
    }
}

fn default_wheel_zoom_in_factor() -> f64 {
    DEFAULT_WHEEL_ZOOM_IN_FACTOR
}

fn default_wheel_zoom_out_factor() -> f64 {
    DEFAULT_WHEEL_ZOOM_OUT_FACTOR
}

fn default_wheel_pan_step_ratio() -> f64 {
    DEFAULT_WHEEL_PAN_STEP_RATIO
}
