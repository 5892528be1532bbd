//! Calendar tick planning for the timeline axis.
//!
//! A planning pass is a pure function of the visible range, the current time
//! and the viewport: generate candidates, project them, cull the ones leaving
//! the viewport, then resolve overlaps by kind precedence.

pub mod candidates;
pub mod labels;
pub mod measure;
pub mod planner;

pub use candidates::{
    CandidateWindow, DEFAULT_DAY_TICK_THRESHOLD_DAYS, TickCandidate, TickKind,
    generate_tick_candidates,
};
pub use labels::{EnglishLabels, TickLabelFormatter};
pub use measure::{CharWidthMeasure, FixedWidthMeasure, TickMeasure};
pub use planner::{
    DEFAULT_COLLISION_MARGIN_PX, PlacedTick, TickAnchor, TickPlanConfig, TickPlanInput,
    layout_ticks, place_ticks, plan_ticks, resolve_collisions,
};
