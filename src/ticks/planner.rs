use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::fixed_offset;
use crate::core::{Projection, TimeRange, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::ticks::{
    CandidateWindow, DEFAULT_DAY_TICK_THRESHOLD_DAYS, TickCandidate, TickKind, TickLabelFormatter,
    TickMeasure, generate_tick_candidates,
};

pub const DEFAULT_COLLISION_MARGIN_PX: f64 = 5.0;

/// Where a tick's footprint sits relative to its projected position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickAnchor {
    /// Footprint centered on the tick position.
    #[default]
    Center,
    /// Footprint starts at the tick position and extends right.
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickPlanConfig {
    pub day_tick_threshold_days: f64,
    pub collision_margin_px: f64,
    pub anchor: TickAnchor,
    /// Fixed offset from UTC used for calendar boundaries.
    ///
    /// No daylight-saving rules are applied: in a zone that observes DST the
    /// month and day ticks sit one hour off for part of the year unless the
    /// host updates this value when the offset changes.
    pub utc_offset_minutes: i32,
}

impl Default for TickPlanConfig {
    fn default() -> Self {
        Self {
            day_tick_threshold_days: DEFAULT_DAY_TICK_THRESHOLD_DAYS,
            collision_margin_px: DEFAULT_COLLISION_MARGIN_PX,
            anchor: TickAnchor::Center,
            utc_offset_minutes: 0,
        }
    }
}

impl TickPlanConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.day_tick_threshold_days.is_finite() || self.day_tick_threshold_days < 0.0 {
            return Err(TimelineError::InvalidData(
                "tick config `day_tick_threshold_days` must be finite and >= 0".to_owned(),
            ));
        }
        if !self.collision_margin_px.is_finite() || self.collision_margin_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "tick config `collision_margin_px` must be finite and >= 0".to_owned(),
            ));
        }
        fixed_offset(self.utc_offset_minutes)?;
        Ok(self)
    }
}

/// A tick candidate after projection and collision resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTick {
    pub label: String,
    pub kind: TickKind,
    pub timestamp: f64,
    pub x_px: f64,
    pub left_px: f64,
    pub right_px: f64,
    pub visible: bool,
}

impl PlacedTick {
    fn overlaps_within(&self, other: &PlacedTick, margin_px: f64) -> bool {
        other.left_px < self.right_px + margin_px && other.right_px > self.left_px - margin_px
    }
}

/// Everything one planning pass needs besides the measure and formatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPlanInput {
    pub range: TimeRange,
    pub now: f64,
    pub viewport: Viewport,
    pub config: TickPlanConfig,
}

/// Returns the ticks to render, ordered by position.
pub fn plan_ticks(
    input: TickPlanInput,
    measure: &dyn TickMeasure,
    formatter: &dyn TickLabelFormatter,
) -> TimelineResult<Vec<PlacedTick>> {
    let mut ticks = layout_ticks(input, measure, formatter)?;
    ticks.retain(|tick| tick.visible);
    Ok(ticks)
}

/// Like [`plan_ticks`] but keeps culled and colliding ticks with `visible = false`.
pub fn layout_ticks(
    input: TickPlanInput,
    measure: &dyn TickMeasure,
    formatter: &dyn TickLabelFormatter,
) -> TimelineResult<Vec<PlacedTick>> {
    let config = input.config.validate()?;
    let candidates = generate_tick_candidates(
        CandidateWindow {
            range: input.range,
            now: input.now,
            day_tick_threshold_days: config.day_tick_threshold_days,
            offset: fixed_offset(config.utc_offset_minutes)?,
        },
        formatter,
    )?;
    let candidate_count = candidates.len();

    let projection = Projection::new(input.range, input.viewport);
    let mut placed = place_ticks(candidates, projection, measure, config.anchor)?;
    for tick in &mut placed {
        tick.visible = input.viewport.contains_span(tick.left_px, tick.right_px);
    }
    let after_cull = placed.iter().filter(|tick| tick.visible).count();

    resolve_collisions(&mut placed, config.collision_margin_px);
    trace!(
        candidate_count,
        after_cull,
        visible = placed.iter().filter(|tick| tick.visible).count(),
        "planned timeline ticks"
    );
    Ok(placed)
}

/// Projects candidates into viewport space using the injected measure.
pub fn place_ticks(
    candidates: Vec<TickCandidate>,
    projection: Projection,
    measure: &dyn TickMeasure,
    anchor: TickAnchor,
) -> TimelineResult<Vec<PlacedTick>> {
    candidates
        .into_iter()
        .map(|candidate| {
            let width = measure.measure(&candidate);
            if !width.is_finite() || width < 0.0 {
                return Err(TimelineError::InvalidMeasure {
                    label: candidate.label,
                    width_px: width,
                });
            }
            let x = projection.x_px(candidate.timestamp);
            let (left, right) = match anchor {
                TickAnchor::Center => (x - width / 2.0, x + width / 2.0),
                TickAnchor::Start => (x, x + width),
            };
            Ok(PlacedTick {
                label: candidate.label,
                kind: candidate.kind,
                timestamp: candidate.timestamp,
                x_px: x,
                left_px: left,
                right_px: right,
                visible: true,
            })
        })
        .collect()
}

/// Hides ticks that overlap a higher-precedence visible tick.
///
/// Ticks are visited by descending priority, and in their existing
/// (chronological) order within one priority. Each still-visible tick hides
/// every later-visited tick whose footprint comes within `margin_px` of its
/// own. A hidden tick never hides anything.
pub fn resolve_collisions(ticks: &mut [PlacedTick], margin_px: f64) {
    let mut order: Vec<usize> = (0..ticks.len()).collect();
    order.sort_by_key(|&index| Reverse(ticks[index].kind.priority()));

    for (position, &current) in order.iter().enumerate() {
        if !ticks[current].visible {
            continue;
        }
        for &other in &order[position + 1..] {
            if ticks[other].visible && ticks[current].overlaps_within(&ticks[other], margin_px) {
                ticks[other].visible = false;
            }
        }
    }
}
