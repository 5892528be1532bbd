use serde::{Deserialize, Serialize};

use crate::ticks::TickCandidate;

/// Horizontal footprint of a rendered tick, in pixels.
///
/// UI hosts plug in real text metrics; headless callers use one of the
/// approximations below. Any `Fn(&TickCandidate) -> f64` also qualifies.
pub trait TickMeasure {
    fn measure(&self, tick: &TickCandidate) -> f64;
}

impl<F> TickMeasure for F
where
    F: Fn(&TickCandidate) -> f64,
{
    fn measure(&self, tick: &TickCandidate) -> f64 {
        self(tick)
    }
}

/// Every tick occupies the same width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedWidthMeasure {
    pub width_px: f64,
}

impl FixedWidthMeasure {
    #[must_use]
    pub fn new(width_px: f64) -> Self {
        Self { width_px }
    }
}

impl TickMeasure for FixedWidthMeasure {
    fn measure(&self, _tick: &TickCandidate) -> f64 {
        self.width_px
    }
}

/// Width proportional to the label's character count plus side padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharWidthMeasure {
    pub char_width_px: f64,
    pub horizontal_padding_px: f64,
}

impl Default for CharWidthMeasure {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            horizontal_padding_px: 6.0,
        }
    }
}

impl TickMeasure for CharWidthMeasure {
    fn measure(&self, tick: &TickCandidate) -> f64 {
        tick.label.chars().count() as f64 * self.char_width_px + 2.0 * self.horizontal_padding_px
    }
}
