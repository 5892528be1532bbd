use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{Projection, TimeRange, Viewport};
use crate::error::{TimelineError, TimelineResult};

/// Smallest zoom factor accepted before clamping.
pub const MIN_ZOOM_FACTOR: f64 = 1e-6;

/// Owner of the total data range and the visible (filtered) sub-range.
///
/// `filtered` always satisfies
/// `total.start <= filtered.start <= filtered.end <= total.end`.
/// Every mutation funnels through the same clamp, so callers may request any
/// range and receive the closest valid one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeController {
    total: TimeRange,
    filtered: TimeRange,
}

impl RangeController {
    /// Creates a controller whose visible range spans the full total range.
    #[must_use]
    pub fn new(total: TimeRange) -> Self {
        Self {
            total,
            filtered: total,
        }
    }

    /// Creates a controller with an explicit initial visible range.
    #[must_use]
    pub fn with_filtered(total: TimeRange, filtered: TimeRange) -> Self {
        Self {
            total,
            filtered: total.clamp_within(filtered),
        }
    }

    #[must_use]
    pub fn total_range(&self) -> TimeRange {
        self.total
    }

    #[must_use]
    pub fn filtered_range(&self) -> TimeRange {
        self.filtered
    }

    #[must_use]
    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::new(self.filtered, viewport)
    }

    /// Replaces the visible range, clamped into the total range.
    ///
    /// Returns `true` when the stored range changed.
    pub fn set_range(&mut self, requested: TimeRange) -> bool {
        let next = self.total.clamp_within(requested);
        if next == self.filtered {
            return false;
        }
        debug!(
            requested_start = requested.start(),
            requested_end = requested.end(),
            start = next.start(),
            end = next.end(),
            "set filtered range"
        );
        self.filtered = next;
        true
    }

    /// Derives the next visible range from the current one.
    pub fn update_range<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(TimeRange) -> TimeRange,
    {
        let requested = updater(self.filtered);
        self.set_range(requested)
    }

    /// Fallible variant of [`RangeController::update_range`].
    ///
    /// The stored range is left untouched when the updater fails.
    pub fn try_update_range<F>(&mut self, updater: F) -> TimelineResult<bool>
    where
        F: FnOnce(TimeRange) -> TimelineResult<TimeRange>,
    {
        let requested = updater(self.filtered)?;
        Ok(self.set_range(requested))
    }

    /// Zooms around the center of `basis` and stores the clamped result.
    ///
    /// `factor < 1.0` zooms in, `factor > 1.0` zooms out. Pinch gestures pass
    /// the range captured at gesture start as `basis` so successive factors
    /// compose instead of drifting.
    pub fn zoom(&mut self, factor: f64, basis: TimeRange) -> TimelineResult<bool> {
        let zoomed = zoom_range(basis, factor)?;
        Ok(self.set_range(zoomed))
    }

    /// Zooms around the center of the current visible range.
    pub fn zoom_visible(&mut self, factor: f64) -> TimelineResult<bool> {
        self.zoom(factor, self.filtered)
    }

    /// Shifts the visible range by `delta_millis`, then clamps.
    pub fn pan_by(&mut self, delta_millis: f64) -> TimelineResult<bool> {
        if !delta_millis.is_finite() {
            return Err(TimelineError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        let shifted = self.filtered.shifted(delta_millis)?;
        Ok(self.set_range(shifted))
    }

    pub fn reset(&mut self) -> bool {
        self.set_range(self.total)
    }

    /// Visible range as fractions of the total range, for slider handles.
    ///
    /// A zero-width total range reports `(0.0, 1.0)`.
    #[must_use]
    pub fn selection_fractions(&self) -> (f64, f64) {
        let span = self.total.span();
        if span <= 0.0 {
            return (0.0, 1.0);
        }
        (
            (self.filtered.start() - self.total.start()) / span,
            (self.filtered.end() - self.total.start()) / span,
        )
    }

    /// Sets the visible range from slider handle fractions of the total range.
    pub fn set_range_from_fractions(
        &mut self,
        start_fraction: f64,
        end_fraction: f64,
    ) -> TimelineResult<bool> {
        let span = self.total.span();
        let requested = TimeRange::new(
            self.total.start() + start_fraction * span,
            self.total.start() + end_fraction * span,
        )?;
        Ok(self.set_range(requested))
    }
}

/// Scales `basis` around its center without clamping.
///
/// Non-finite factors are rejected; factors at or below zero are raised to
/// [`MIN_ZOOM_FACTOR`] so the result never inverts.
pub fn zoom_range(basis: TimeRange, factor: f64) -> TimelineResult<TimeRange> {
    if !factor.is_finite() {
        return Err(TimelineError::InvalidData(
            "zoom factor must be finite".to_owned(),
        ));
    }
    let factor = if factor < MIN_ZOOM_FACTOR {
        warn!(factor, min = MIN_ZOOM_FACTOR, "clamping zoom factor");
        MIN_ZOOM_FACTOR
    } else {
        factor
    };

    let center = basis.center();
    TimeRange::new(
        center - (center - basis.start()) * factor,
        center + (basis.end() - center) * factor,
    )
}
