use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;
use crate::error::{TimelineError, TimelineResult};

/// Ordered pair of millisecond timestamps with `start <= end`.
///
/// Inverted endpoints are swapped on construction; non-finite endpoints are
/// rejected so a broken range never reaches projection or tick planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: f64,
    end: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawTimeRange {
    start: f64,
    end: f64,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = TimelineError;

    fn try_from(raw: RawTimeRange) -> TimelineResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> TimelineResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TimelineError::InvalidRange { start, end });
        }

        Ok(Self {
            start: start.min(end),
            end: start.max(end),
        })
    }

    /// Zero-width range at a single instant.
    pub fn instant(at: f64) -> TimelineResult<Self> {
        Self::new(at, at)
    }

    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> TimelineResult<Self> {
        Self::new(datetime_to_unix_millis(start), datetime_to_unix_millis(end))
    }

    /// Smallest range covering every input range; `None` for an empty input.
    #[must_use]
    pub fn enclosing<I>(ranges: I) -> Option<Self>
    where
        I: IntoIterator<Item = TimeRange>,
    {
        ranges.into_iter().reduce(|acc, range| Self {
            start: acc.start.min(range.start),
            end: acc.end.max(range.end),
        })
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    #[must_use]
    pub fn contains_range(self, other: TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Closed-interval intersection test.
    #[must_use]
    pub fn intersects(self, other: TimeRange) -> bool {
        other.start <= self.end && other.end >= self.start
    }

    /// Returns the largest sub-range of `self` overlapping `requested`.
    ///
    /// The end is clamped first, then the start is clamped to not exceed it,
    /// so a request entirely outside `self` collapses onto the nearest bound.
    #[must_use]
    pub fn clamp_within(self, requested: TimeRange) -> TimeRange {
        let end = requested.end.clamp(self.start, self.end);
        let start = requested.start.clamp(self.start, end);
        TimeRange { start, end }
    }

    /// Shifts both endpoints by `delta`.
    pub fn shifted(self, delta: f64) -> TimelineResult<Self> {
        Self::new(self.start + delta, self.end + delta)
    }
}

/// Horizontal pixel bounds of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    pub left_px: f64,
    pub width_px: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawViewport {
    left_px: f64,
    width_px: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = TimelineError;

    fn try_from(raw: RawViewport) -> TimelineResult<Self> {
        Self::new(raw.left_px, raw.width_px)
    }
}

impl Viewport {
    pub fn new(left_px: f64, width_px: f64) -> TimelineResult<Self> {
        let viewport = Self { left_px, width_px };
        if !viewport.is_valid() {
            return Err(TimelineError::InvalidViewport { left_px, width_px });
        }
        Ok(viewport)
    }

    /// Viewport anchored at pixel zero.
    pub fn with_width(width_px: f64) -> TimelineResult<Self> {
        Self::new(0.0, width_px)
    }

    pub fn from_bounds(left_px: f64, right_px: f64) -> TimelineResult<Self> {
        Self::new(left_px, right_px - left_px)
    }

    #[must_use]
    pub fn right_px(self) -> f64 {
        self.left_px + self.width_px
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left_px.is_finite() && self.width_px.is_finite() && self.width_px >= 0.0
    }

    /// True when `[left, right]` lies fully inside the viewport bounds.
    #[must_use]
    pub fn contains_span(self, left: f64, right: f64) -> bool {
        left >= self.left_px && right <= self.right_px()
    }
}
