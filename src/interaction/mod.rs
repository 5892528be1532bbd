pub mod wheel;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::TimeRange;

pub use wheel::{
    DEFAULT_WHEEL_ZOOM_IN_FACTOR, DEFAULT_WHEEL_ZOOM_OUT_FACTOR, WheelInput,
    resolve_pixel_pan_delta_time, resolve_wheel_pan_delta_time, resolve_wheel_zoom_factor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
    Pinching,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: TouchPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Snapshot taken when a two-finger gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchGesture {
    pub initial_distance: f64,
    pub basis: TimeRange,
}

impl PinchGesture {
    /// Zoom factor for the current finger distance, relative to gesture start.
    #[must_use]
    pub fn factor_for(self, distance: f64) -> f64 {
        distance / self.initial_distance
    }
}

/// A pinch move resolved into the zoom to apply against the starting range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchZoom {
    pub factor: f64,
    pub basis: TimeRange,
}

/// Transient pointer/touch state.
///
/// Events arriving out of order (a move without a start, a second start
/// without an end) are tolerated: moves without a matching start resolve to
/// `None`, and a new start replaces the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    pinch: Option<PinchGesture>,
    last_pan_x: Option<f64>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            pinch: None,
            last_pan_x: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn pinch(self) -> Option<PinchGesture> {
        self.pinch
    }

    /// Starts a pinch gesture; returns `false` when the touches cannot define one.
    pub fn on_pinch_start(&mut self, touches: &[TouchPoint], basis: TimeRange) -> bool {
        let Some(distance) = two_finger_distance(touches) else {
            warn!(touches = touches.len(), "ignoring pinch start without two touches");
            return false;
        };
        if !distance.is_finite() || distance <= 0.0 {
            warn!(distance, "ignoring pinch start with degenerate finger distance");
            return false;
        }

        debug!(
            distance,
            basis_start = basis.start(),
            basis_end = basis.end(),
            "pinch start"
        );
        self.pinch = Some(PinchGesture {
            initial_distance: distance,
            basis,
        });
        self.last_pan_x = None;
        self.mode = InteractionMode::Pinching;
        true
    }

    /// Resolves a pinch move, or `None` when no gesture is active.
    #[must_use]
    pub fn on_pinch_move(&self, touches: &[TouchPoint]) -> Option<PinchZoom> {
        let gesture = self.pinch?;
        let distance = two_finger_distance(touches)?;
        let factor = gesture.factor_for(distance);
        if !factor.is_finite() {
            return None;
        }
        Some(PinchZoom {
            factor,
            basis: gesture.basis,
        })
    }

    pub fn on_pinch_end(&mut self) {
        if self.pinch.take().is_some() {
            debug!("pinch end");
        }
        if self.mode == InteractionMode::Pinching {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn on_pan_start(&mut self, x: f64) {
        if self.mode == InteractionMode::Pinching {
            return;
        }
        self.mode = InteractionMode::Panning;
        self.last_pan_x = Some(x);
    }

    /// Returns the pixel delta since the previous pan event.
    pub fn on_pan_move(&mut self, x: f64) -> Option<f64> {
        if self.mode != InteractionMode::Panning {
            return None;
        }
        let previous = self.last_pan_x.replace(x)?;
        let delta = x - previous;
        if delta == 0.0 || !delta.is_finite() {
            return None;
        }
        Some(delta)
    }

    pub fn on_pan_end(&mut self) {
        self.last_pan_x = None;
        if self.mode == InteractionMode::Panning {
            self.mode = InteractionMode::Idle;
        }
    }
}

fn two_finger_distance(touches: &[TouchPoint]) -> Option<f64> {
    match touches {
        [first, second, ..] => Some(first.distance_to(*second)),
        _ => None,
    }
}
