use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

const WHEEL_STEP_UNITS: f64 = 120.0;

pub const DEFAULT_WHEEL_ZOOM_IN_FACTOR: f64 = 0.95;
pub const DEFAULT_WHEEL_ZOOM_OUT_FACTOR: f64 = 1.05;

/// One wheel event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Zoom modifier (e.g. Ctrl) held during the event.
    pub zoom_modifier: bool,
}

impl WheelInput {
    #[must_use]
    pub fn vertical(delta_y: f64, zoom_modifier: bool) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            zoom_modifier,
        }
    }

    #[must_use]
    pub fn horizontal(delta_x: f64) -> Self {
        Self {
            delta_x,
            delta_y: 0.0,
            zoom_modifier: false,
        }
    }
}

/// Maps a modified wheel event to a fixed zoom step.
///
/// Scrolling up (`delta_y < 0`) zooms in with `zoom_in_factor`, scrolling
/// down zooms out with `zoom_out_factor`. Unmodified or zero-delta events
/// yield `None`.
#[must_use]
pub fn resolve_wheel_zoom_factor(
    input: WheelInput,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
) -> Option<f64> {
    if !input.zoom_modifier || input.delta_y == 0.0 || !input.delta_y.is_finite() {
        return None;
    }
    if input.delta_y < 0.0 {
        Some(zoom_in_factor)
    } else {
        Some(zoom_out_factor)
    }
}

/// Time delta for a horizontal wheel scroll, in multiples of the visible span.
pub fn resolve_wheel_pan_delta_time(
    wheel_delta_x: f64,
    visible_span: f64,
    pan_step_ratio: f64,
) -> TimelineResult<Option<f64>> {
    if wheel_delta_x == 0.0 {
        return Ok(None);
    }

    let normalized_steps = wheel_delta_x / WHEEL_STEP_UNITS;
    let delta_time = normalized_steps * visible_span * pan_step_ratio;
    if !delta_time.is_finite() {
        return Err(TimelineError::InvalidData(
            "computed wheel pan delta time must be finite".to_owned(),
        ));
    }
    Ok(Some(delta_time))
}

/// Time delta for a pointer drag; dragging right moves the range back in time.
pub fn resolve_pixel_pan_delta_time(
    delta_px: f64,
    viewport_width_px: f64,
    visible_span: f64,
) -> TimelineResult<f64> {
    if !viewport_width_px.is_finite() || viewport_width_px <= 0.0 {
        return Err(TimelineError::InvalidData(
            "pan viewport width must be finite and > 0".to_owned(),
        ));
    }
    let delta_time = -(delta_px / viewport_width_px) * visible_span;
    if !delta_time.is_finite() {
        return Err(TimelineError::InvalidData(
            "computed pixel pan delta time must be finite".to_owned(),
        ));
    }
    Ok(delta_time)
}
