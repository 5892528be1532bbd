use chrono::Utc;
use tracing::{debug, trace};

use crate::core::primitives::datetime_to_unix_millis;
use crate::core::{Projection, RangeController, TimeRange, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{TimelineContext, TimelineEvent, TimelineObserver};
use crate::interaction::{
    InteractionMode, InteractionState, TouchPoint, WheelInput, resolve_pixel_pan_delta_time,
    resolve_wheel_pan_delta_time, resolve_wheel_zoom_factor,
};
use crate::ticks::{
    EnglishLabels, PlacedTick, TickLabelFormatter, TickMeasure, TickPlanInput, layout_ticks,
    plan_ticks,
};

use super::{EngineSnapshot, TimelineEngineConfig};

/// Owns the visible range of one timeline and routes every input to it.
///
/// All range changes (setters, wheel, pinch, drag) go through the inner
/// [`RangeController`], and observers are notified once per effective change.
pub struct TimelineEngine {
    config: TimelineEngineConfig,
    controller: RangeController,
    interaction: InteractionState,
    now: f64,
    observers: Vec<Box<dyn TimelineObserver>>,
}

impl TimelineEngine {
    /// Builds an engine with `now` read from the system clock.
    pub fn new(config: TimelineEngineConfig) -> TimelineResult<Self> {
        Self::with_now(config, datetime_to_unix_millis(Utc::now()))
    }

    pub fn with_now(config: TimelineEngineConfig, now: f64) -> TimelineResult<Self> {
        let config = config.validate()?;
        if !now.is_finite() {
            return Err(TimelineError::InvalidTimestamp(now));
        }
        let controller = match config.initial_range {
            Some(initial) => RangeController::with_filtered(config.total_range, initial),
            None => RangeController::new(config.total_range),
        };
        debug!(
            total_start = config.total_range.start(),
            total_end = config.total_range.end(),
            "timeline engine init"
        );

        Ok(Self {
            config,
            controller,
            interaction: InteractionState::default(),
            now,
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn total_range(&self) -> TimeRange {
        self.controller.total_range()
    }

    #[must_use]
    pub fn filtered_range(&self) -> TimeRange {
        self.controller.filtered_range()
    }

    #[must_use]
    pub fn selection_fractions(&self) -> (f64, f64) {
        self.controller.selection_fractions()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn set_now(&mut self, now: f64) -> TimelineResult<()> {
        if !now.is_finite() {
            return Err(TimelineError::InvalidTimestamp(now));
        }
        if now != self.now {
            self.now = now;
            self.emit(TimelineEvent::NowChanged { now });
        }
        Ok(())
    }

    /// Re-reads the system clock; hosts typically call this once a minute.
    pub fn refresh_now(&mut self) -> TimelineResult<()> {
        self.set_now(datetime_to_unix_millis(Utc::now()))
    }

    #[must_use]
    pub fn projection(&self, viewport: Viewport) -> Projection {
        self.controller.projection(viewport)
    }

    pub fn set_range(&mut self, range: TimeRange) -> bool {
        let changed = self.controller.set_range(range);
        self.after_range_update(changed)
    }

    pub fn update_range<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(TimeRange) -> TimeRange,
    {
        let changed = self.controller.update_range(updater);
        self.after_range_update(changed)
    }

    pub fn zoom(&mut self, factor: f64, basis: TimeRange) -> TimelineResult<bool> {
        let changed = self.controller.zoom(factor, basis)?;
        Ok(self.after_range_update(changed))
    }

    pub fn pan_by(&mut self, delta_millis: f64) -> TimelineResult<bool> {
        let changed = self.controller.pan_by(delta_millis)?;
        Ok(self.after_range_update(changed))
    }

    pub fn reset_range(&mut self) -> bool {
        let changed = self.controller.reset();
        self.after_range_update(changed)
    }

    /// Applies dual-handle slider positions given as fractions of the total range.
    pub fn set_range_from_fractions(&mut self, start: f64, end: f64) -> TimelineResult<bool> {
        let changed = self.controller.set_range_from_fractions(start, end)?;
        Ok(self.after_range_update(changed))
    }

    /// Handles a wheel event.
    ///
    /// With the zoom modifier held, vertical scrolling zooms the live visible
    /// range by a fixed step. Horizontal scrolling pans.
    pub fn on_wheel(&mut self, input: WheelInput) -> TimelineResult<bool> {
        if let Some(factor) = resolve_wheel_zoom_factor(
            input,
            self.config.wheel_zoom_in_factor,
            self.config.wheel_zoom_out_factor,
        ) {
            return self.zoom(factor, self.filtered_range());
        }

        match resolve_wheel_pan_delta_time(
            input.delta_x,
            self.filtered_range().span(),
            self.config.wheel_pan_step_ratio,
        )? {
            Some(delta) => self.pan_by(delta),
            None => Ok(false),
        }
    }

    /// Begins a two-finger gesture, capturing the current visible range.
    ///
    /// A drag in progress is ended first, so observers see `PanEnded` before
    /// `PinchStarted`.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        let basis = self.filtered_range();
        let was_panning = self.interaction.mode() == InteractionMode::Panning;
        let started = self.interaction.on_pinch_start(touches, basis);
        if started {
            if was_panning {
                self.emit(TimelineEvent::PanEnded);
            }
            self.emit(TimelineEvent::PinchStarted);
        }
        started
    }

    /// Applies a pinch move against the range captured at gesture start.
    ///
    /// Moves without an active gesture are ignored.
    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> TimelineResult<bool> {
        match self.interaction.on_pinch_move(touches) {
            Some(pinch) => self.zoom(pinch.factor, pinch.basis),
            None => {
                trace!(touches = touches.len(), "touch move without active pinch");
                Ok(false)
            }
        }
    }

    pub fn on_touch_end(&mut self) {
        let was_pinching = self.interaction.pinch().is_some();
        self.interaction.on_pinch_end();
        if was_pinching {
            self.emit(TimelineEvent::PinchEnded);
        }
    }

    /// Starts a drag; a repeated press while dragging only moves the anchor.
    pub fn on_pointer_down(&mut self, x: f64) {
        let was_panning = self.interaction.mode() == InteractionMode::Panning;
        self.interaction.on_pan_start(x);
        if !was_panning && self.interaction.mode() == InteractionMode::Panning {
            self.emit(TimelineEvent::PanStarted);
        }
    }

    /// Drags the visible range so the content follows the pointer.
    pub fn on_pointer_move(&mut self, x: f64, viewport: Viewport) -> TimelineResult<bool> {
        let Some(delta_px) = self.interaction.on_pan_move(x) else {
            return Ok(false);
        };
        let delta = resolve_pixel_pan_delta_time(
            delta_px,
            viewport.width_px,
            self.filtered_range().span(),
        )?;
        self.pan_by(delta)
    }

    pub fn on_pointer_up(&mut self) {
        let was_panning = self.interaction.mode() == InteractionMode::Panning;
        self.interaction.on_pan_end();
        if was_panning {
            self.emit(TimelineEvent::PanEnded);
        }
    }

    /// Visible ticks for the current range, labeled in English.
    pub fn plan_ticks(
        &self,
        viewport: Viewport,
        measure: &dyn TickMeasure,
    ) -> TimelineResult<Vec<PlacedTick>> {
        self.plan_ticks_with(viewport, measure, &EnglishLabels)
    }

    pub fn plan_ticks_with(
        &self,
        viewport: Viewport,
        measure: &dyn TickMeasure,
        formatter: &dyn TickLabelFormatter,
    ) -> TimelineResult<Vec<PlacedTick>> {
        plan_ticks(self.tick_input(viewport), measure, formatter)
    }

    /// All tick candidates with their visibility after culling and collisions.
    pub fn layout_ticks_with(
        &self,
        viewport: Viewport,
        measure: &dyn TickMeasure,
        formatter: &dyn TickLabelFormatter,
    ) -> TimelineResult<Vec<PlacedTick>> {
        layout_ticks(self.tick_input(viewport), measure, formatter)
    }

    pub fn add_observer(&mut self, observer: Box<dyn TimelineObserver>) -> TimelineResult<()> {
        if self.observers.iter().any(|o| o.id() == observer.id()) {
            return Err(TimelineError::InvalidData(format!(
                "observer `{}` is already registered",
                observer.id()
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id; returns `true` when one was registered.
    pub fn remove_observer(&mut self, id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id() != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            total_range: self.total_range(),
            filtered_range: self.filtered_range(),
            selection: self.selection_fractions(),
            now: self.now,
            interaction_mode: self.interaction.mode(),
        }
    }

    fn tick_input(&self, viewport: Viewport) -> TickPlanInput {
        TickPlanInput {
            range: self.filtered_range(),
            now: self.now,
            viewport,
            config: self.config.ticks,
        }
    }

    fn after_range_update(&mut self, changed: bool) -> bool {
        if changed {
            let range = self.filtered_range();
            self.emit(TimelineEvent::RangeChanged {
                start: range.start(),
                end: range.end(),
            });
        }
        changed
    }

    fn context(&self) -> TimelineContext {
        TimelineContext {
            total_range: self.total_range(),
            filtered_range: self.filtered_range(),
            selection: self.selection_fractions(),
            now: self.now,
            interaction_mode: self.interaction.mode(),
        }
    }

    fn emit(&mut self, event: TimelineEvent) {
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}
