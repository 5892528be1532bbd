use serde::{Deserialize, Serialize};

use crate::core::TimeRange;
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub total_range: TimeRange,
    pub filtered_range: TimeRange,
    /// Filtered range as fractions of the total range.
    pub selection: (f64, f64),
    pub now: f64,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    RangeChanged { start: f64, end: f64 },
    NowChanged { now: f64 },
    PinchStarted,
    PinchEnded,
    PanStarted,
    PanEnded,
}

/// Hook for host components that mirror timeline state, such as a range
/// slider or a header showing the visible dates.
///
/// Observers see the engine state after each change but cannot mutate it;
/// changes go back through the engine's own entry points.
pub trait TimelineObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}
