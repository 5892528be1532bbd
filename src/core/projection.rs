use serde::{Deserialize, Serialize};

use crate::core::{TimeRange, Viewport};

/// Offset/width of a time interval inside the visible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarProjection {
    pub offset_px: f64,
    pub width_px: f64,
    pub offset_percent: String,
    pub width_percent: String,
}

/// Linear mapping between the visible time range and a viewport.
///
/// All methods are total: a zero-width visible range maps every timestamp to
/// offset `0` instead of producing `NaN` or infinities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    visible: TimeRange,
    viewport: Viewport,
}

impl Projection {
    #[must_use]
    pub fn new(visible: TimeRange, viewport: Viewport) -> Self {
        Self { visible, viewport }
    }

    #[must_use]
    pub fn visible_range(self) -> TimeRange {
        self.visible
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    /// Fraction of the visible span covered from its start to `time`.
    ///
    /// Unclamped: times outside the visible range fall below `0` or above `1`.
    #[must_use]
    pub fn fraction_of(self, time: f64) -> f64 {
        self.ratio(time - self.visible.start())
    }

    /// Offset of `time` from the viewport's left edge.
    #[must_use]
    pub fn position_px(self, time: f64) -> f64 {
        self.fraction_of(time) * self.viewport.width_px
    }

    /// Absolute horizontal coordinate of `time` in viewport space.
    #[must_use]
    pub fn x_px(self, time: f64) -> f64 {
        self.viewport.left_px + self.position_px(time)
    }

    /// Left offset as a percentage string, e.g. `"25%"`.
    #[must_use]
    pub fn position_percent(self, time: f64) -> String {
        format_percent(self.fraction_of(time) * 100.0)
    }

    #[must_use]
    pub fn width_px(self, range: TimeRange) -> f64 {
        self.ratio(range.span()) * self.viewport.width_px
    }

    #[must_use]
    pub fn width_percent(self, range: TimeRange) -> String {
        format_percent(self.ratio(range.span()) * 100.0)
    }

    #[must_use]
    pub fn is_visible(self, range: TimeRange) -> bool {
        self.visible.intersects(range)
    }

    /// Inverse projection from a viewport-relative offset to a timestamp.
    #[must_use]
    pub fn time_at(self, offset_px: f64) -> f64 {
        if self.viewport.width_px <= 0.0 || !offset_px.is_finite() {
            return self.visible.start();
        }
        self.visible.start() + offset_px / self.viewport.width_px * self.visible.span()
    }

    /// Geometry of a Gantt item, or `None` when it lies outside the visible range.
    #[must_use]
    pub fn bar(self, range: TimeRange) -> Option<BarProjection> {
        if !self.is_visible(range) {
            return None;
        }
        Some(BarProjection {
            offset_px: self.position_px(range.start()),
            width_px: self.width_px(range),
            offset_percent: self.position_percent(range.start()),
            width_percent: self.width_percent(range),
        })
    }

    fn ratio(self, delta: f64) -> f64 {
        let span = self.visible.span();
        if span <= 0.0 {
            return 0.0;
        }
        let ratio = delta / span;
        if ratio.is_finite() { ratio } else { 0.0 }
    }
}

fn format_percent(value: f64) -> String {
    // Avoids rendering `-0%`.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::format_percent;

    #[test]
    fn percent_strings_drop_trailing_zero_fraction() {
        assert_eq!(format_percent(25.0), "25%");
        assert_eq!(format_percent(12.5), "12.5%");
        assert_eq!(format_percent(-0.0), "0%");
    }
}
