use std::rc::{Rc, Weak};

use tactile_engine::coords::Vec2;
use tactile_engine::time::Clock;

use crate::surface::{EventMask, SurfaceId, SurfaceTree};

use super::adjustment::Adjustment;
use super::animation::AnimationRun;
use super::axis::{Orientation, Overshoot, PanAxis, StepParams};
use super::config::{
    PanConfig, PanMode, INITIAL_HINT_DELAY_MS, INITIAL_HINT_HOLD_MS, SCROLL_FADE_IN_INTERVAL_MS,
    SCROLL_FADE_INTERVAL_MS, ACCEL_FACTOR,
};
use super::error::ConfigError;
use super::fade::{FadeTick, IndicatorFade};
use super::gesture::{GesturePhase, GestureState};
use super::physics;
use super::signal::PanSignal;
use super::timer::{TimerControl, TimerKind, TimerRequest, TimerSet};

/// Kinetic pan surface.
///
/// Owns both scroll axes, the gesture in progress, the scroll indicator fade
/// and an optional `scroll_to` animation. It is driven from outside through
/// typed intake methods (`on_press`, `on_motion`, `on_release`, `on_timer`,
/// ...). Every call may queue [`PanSignal`]s and [`TimerRequest`]s, which the
/// owner drains with [`take_signals`](Self::take_signals) and
/// [`take_timer_requests`](Self::take_timer_requests).
///
/// Content is a surface of an external [`SurfaceTree`]; the area only keeps
/// its handle and checks it is still alive before forwarding events to it.
///
/// # Example
/// ```rust,ignore
/// let clock = Rc::new(ManualClock::new());
/// let mut area = PannableArea::try_new(PanConfig::default(), &clock)?;
/// area.set_child(Some(content));
/// area.allocate(&tree, Vec2::new(400.0, 300.0));
/// area.realize();
/// area.scroll_to(-1.0, 900.0);
/// ```
pub struct PannableArea {
    pub(crate) config: PanConfig,
    pub(crate) h: PanAxis,
    pub(crate) v: PanAxis,
    pub(crate) gesture: GestureState,
    pub(crate) fade: IndicatorFade,
    pub(crate) animation: Option<AnimationRun>,
    pub(crate) timers: TimerSet,
    signals: Vec<PanSignal>,
    pub(crate) clock: Weak<dyn Clock>,
    pub(crate) content: Option<SurfaceId>,
    pub(crate) focus: Option<SurfaceId>,
    pub(crate) center_pending: bool,
    realized: bool,
    enabled: bool,
    pub(crate) viewport: Vec2,
    /// Pointer position of the latest accelerated-mode sample.
    pub(crate) accel_pos: Vec2,
    /// Drag motion waiting for the next `MotionFlush`.
    pub(crate) motion_pending: Vec2,
    pub(crate) vel_factor: f64,
    reported_values: (f64, f64),
    reported_overshoot: (i32, i32),
    on_panning_started: Option<Box<dyn FnMut() -> bool>>,
}

impl PannableArea {
    /// Creates an area with the stock configuration.
    pub fn new<C: Clock + 'static>(clock: &Rc<C>) -> Self {
        Self::build(PanConfig::default(), clock)
    }

    /// Creates an area after validating `config`.
    pub fn try_new<C: Clock + 'static>(config: PanConfig, clock: &Rc<C>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build<C: Clock + 'static>(config: PanConfig, clock: &Rc<C>) -> Self {
        let clock: Weak<C> = Rc::downgrade(clock);
        let clock: Weak<dyn Clock> = clock;
        let vel_factor = physics::vel_factor(config.deceleration, config.sps, config.scroll_time);
        Self {
            config,
            h: PanAxis::new(Orientation::Horizontal),
            v: PanAxis::new(Orientation::Vertical),
            gesture: GestureState::default(),
            fade: IndicatorFade::default(),
            animation: None,
            timers: TimerSet::default(),
            signals: Vec::new(),
            clock,
            content: None,
            focus: None,
            center_pending: false,
            realized: false,
            enabled: true,
            viewport: Vec2::zero(),
            accel_pos: Vec2::zero(),
            motion_pending: Vec2::zero(),
            vel_factor,
            reported_values: (0.0, 0.0),
            reported_overshoot: (0, 0),
            on_panning_started: None,
        }
    }

    /// Handler consulted when a drag turns into a pan. Returning `true` vetoes it.
    pub fn on_panning_started(mut self, f: impl FnMut() -> bool + 'static) -> Self {
        self.on_panning_started = Some(Box::new(f));
        self
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Marks the area as shown. Starts the scroll hint if content overflows.
    pub fn realize(&mut self) {
        if self.realized {
            return;
        }
        self.realized = true;
        log::debug!("pannable area realized");

        if self.config.initial_hint && (self.h.is_scrollable() || self.v.is_scrollable()) {
            self.with_fade(|f| f.begin_hint(INITIAL_HINT_HOLD_MS / SCROLL_FADE_INTERVAL_MS));
            self.timers.start(TimerKind::InitialHint, INITIAL_HINT_DELAY_MS);
        }
    }

    /// Hides the area, cancelling every timer and the gesture in progress.
    pub fn unrealize(&mut self) {
        if !self.realized {
            return;
        }
        self.stop_all();
        self.realized = false;
        log::debug!("pannable area unrealized");
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.stop_all();
        }
        log::debug!("pannable area enabled = {}", enabled);
    }

    /// Sets the scrollable content surface.
    pub fn set_child(&mut self, content: Option<SurfaceId>) {
        if self.content == content {
            return;
        }
        self.gesture.captured = None;
        self.content = content;
    }

    /// Records the focused descendant. With `center_on_child_focus` the
    /// area scrolls it into view on the next key or pointer release.
    pub fn set_focus_child(&mut self, focus: Option<SurfaceId>) {
        self.focus = focus;
        if self.config.center_on_child_focus && focus.is_some() {
            self.center_pending = true;
        }
    }

    fn stop_all(&mut self) {
        if self.timers.is_active(TimerKind::Physics) {
            self.emit(PanSignal::PanningFinished);
        }
        self.timers.cancel_all();
        self.animation = None;
        self.h.halt();
        self.v.halt();
        self.motion_pending = Vec2::zero();
        self.gesture.captured = None;
        self.gesture.button_pressed = false;
        self.gesture.moved = false;
        self.gesture.phase = GesturePhase::Idle;
        self.notify_changes();
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Lays the area out over a `viewport`-sized rectangle.
    ///
    /// Both ranges start at zero and extend to the content surface's size.
    pub fn allocate(&mut self, tree: &SurfaceTree, viewport: Vec2) {
        let content = self.content.and_then(|c| tree.size(c)).unwrap_or_default();
        let was_scrollable = (self.h.is_scrollable(), self.v.is_scrollable());

        self.viewport = viewport;
        self.h.adjustment.configure(0.0, content.x, viewport.x);
        self.v.adjustment.configure(0.0, content.y, viewport.y);

        let vmax = self.config.velocity_max;
        for axis in [&mut self.h, &mut self.v] {
            let adj = axis.adjustment;
            axis.accel_velocity = if adj.page_size() > 0.0 {
                vmax.min(adj.upper() / adj.page_size() * ACCEL_FACTOR)
            } else {
                vmax
            };
            if !axis.is_scrollable() {
                axis.halt();
            }
            // Keep content glued to the far edge while it bounces there.
            if axis.overshoot.dist < 0 {
                axis.adjustment.set_value(adj.max_value());
            }
        }
        self.notify_changes();

        let scrollable = (self.h.is_scrollable(), self.v.is_scrollable());
        if self.realized
            && scrollable != was_scrollable
            && (scrollable.0 || scrollable.1)
            && !self.timers.is_active(TimerKind::InitialHint)
        {
            let delay = self.config.fade_delay_ticks();
            self.with_fade(|f| f.resume(delay));
            self.launch_fade(1.0);
        }
    }

    /// Rendered position of the content relative to the viewport,
    /// including overshoot excursion.
    pub fn content_origin(&self) -> Vec2 {
        Vec2::new(
            self.h.overshoot.dist as f64 - self.h.value(),
            self.v.overshoot.dist as f64 - self.v.value(),
        )
    }

    pub(crate) fn to_content(&self, p: Vec2) -> Vec2 {
        p - self.content_origin()
    }

    /// Deepest content surface under a viewport point.
    pub fn child_surface_at(&self, tree: &SurfaceTree, x: f64, y: f64) -> Option<SurfaceId> {
        let content = self.content?;
        tree.topmost(content, self.to_content(Vec2::new(x, y)), EventMask::ALL)
            .map(|(id, _)| id)
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Horizontal range. Read-only: move the content through the area's API.
    pub fn hadjustment(&self) -> &Adjustment {
        self.h.adjustment()
    }

    /// Vertical range. Read-only: move the content through the area's API.
    pub fn vadjustment(&self) -> &Adjustment {
        self.v.adjustment()
    }

    pub fn axis(&self, orientation: Orientation) -> &PanAxis {
        match orientation {
            Orientation::Horizontal => &self.h,
            Orientation::Vertical => &self.v,
        }
    }

    pub fn overshoot(&self, orientation: Orientation) -> Overshoot {
        self.axis(orientation).overshoot()
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.h.velocity, self.v.velocity)
    }

    pub fn indicator_alpha(&self) -> f64 {
        self.fade.alpha()
    }

    pub fn fade(&self) -> &IndicatorFade {
        &self.fade
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn animation(&self) -> Option<&AnimationRun> {
        self.animation.as_ref()
    }

    pub fn content(&self) -> Option<SurfaceId> {
        self.content
    }

    pub fn is_realized(&self) -> bool {
        self.realized
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the inertial tick is running.
    pub fn is_panning(&self) -> bool {
        self.timers.is_active(TimerKind::Physics)
    }

    pub fn take_signals(&mut self) -> Vec<PanSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn take_timer_requests(&mut self) -> Vec<TimerRequest> {
        self.timers.take_requests()
    }

    // ── timers ────────────────────────────────────────────────────────────

    /// Runs the callback of a fired timer.
    pub fn on_timer(&mut self, kind: TimerKind) -> TimerControl {
        if !self.timers.is_active(kind) {
            log::debug!("ignoring stale {:?} timer", kind);
            return TimerControl::Break;
        }
        match kind {
            TimerKind::Physics => self.physics_tick(),
            TimerKind::MotionFlush => self.flush_motion(),
            TimerKind::IndicatorFade => self.fade_tick(),
            TimerKind::InitialHint => self.hint_tick(),
            TimerKind::Frame => self.animation_frame(),
        }
    }

    pub(crate) fn stop_timer(&mut self, kind: TimerKind) -> TimerControl {
        self.timers.finished(kind);
        TimerControl::Break
    }

    fn physics_tick(&mut self) -> TimerControl {
        if !self.enabled || self.config.mode == PanMode::Push {
            self.finish_panning();
            return self.stop_timer(TimerKind::Physics);
        }

        self.scroll_by(self.h.velocity, self.v.velocity);
        log::trace!(
            "physics tick: value ({:.1}, {:.1}) velocity ({:.2}, {:.2}) overshoot ({}, {})",
            self.h.value(),
            self.v.value(),
            self.h.velocity,
            self.v.velocity,
            self.h.overshoot.dist,
            self.v.overshoot.dist,
        );

        if self.gesture.button_pressed {
            if self.config.mode == PanMode::Auto {
                return self.stop_timer(TimerKind::Physics);
            }
            return TimerControl::Continue;
        }

        if self.h.overshoot.dist != 0 || self.v.overshoot.dist != 0 {
            return TimerControl::Continue;
        }

        let decel = self.config.deceleration;
        if self.h.pending_target.is_some() || self.v.pending_target.is_some() {
            // Gliding to a target: keep a minimum speed so it is reached.
            for axis in [&mut self.h, &mut self.v] {
                if axis.velocity.abs() >= 1.5 {
                    axis.velocity *= decel;
                }
            }
            return TimerControl::Continue;
        }

        let low_friction = self.config.low_friction_mode;
        let movement = self.config.movement;
        let fast = 0.8 * self.config.velocity_max;
        for axis in [&mut self.h, &mut self.v] {
            if !low_friction || (movement.allows(axis.orientation()) && axis.velocity.abs() < fast) {
                axis.velocity *= decel;
            }
        }

        if self.h.velocity.abs() < 1.0 && self.v.velocity.abs() < 1.0 {
            self.h.velocity = 0.0;
            self.v.velocity = 0.0;
            self.finish_panning();
            return self.stop_timer(TimerKind::Physics);
        }
        TimerControl::Continue
    }

    fn flush_motion(&mut self) -> TimerControl {
        let pending = std::mem::take(&mut self.motion_pending);
        if !pending.is_zero() {
            self.scroll_by(pending.x, pending.y);
        }
        self.stop_timer(TimerKind::MotionFlush)
    }

    fn fade_tick(&mut self) -> TimerControl {
        let vmin = self.config.velocity_min;
        let moving = (self.h.velocity.abs() > vmin || self.v.velocity.abs() > vmin)
            && !self.gesture.button_pressed;
        match self.with_fade(|f| f.tick(moving)) {
            FadeTick::Continue => TimerControl::Continue,
            FadeTick::Finished => self.stop_timer(TimerKind::IndicatorFade),
            FadeTick::Relaunch => {
                self.timers.finished(TimerKind::IndicatorFade);
                self.timers.start(TimerKind::IndicatorFade, SCROLL_FADE_INTERVAL_MS);
                TimerControl::Break
            }
        }
    }

    fn hint_tick(&mut self) -> TimerControl {
        self.timers.finished(TimerKind::InitialHint);
        self.timers.start(TimerKind::IndicatorFade, SCROLL_FADE_IN_INTERVAL_MS);
        TimerControl::Break
    }

    // ── shared internals ──────────────────────────────────────────────────

    pub(crate) fn emit(&mut self, signal: PanSignal) {
        log::trace!("signal {:?}", signal);
        self.signals.push(signal);
    }

    /// Emits `PanningStarted` and returns whether the handler vetoed it.
    pub(crate) fn panning_started(&mut self) -> bool {
        let vetoed = match self.on_panning_started.as_mut() {
            Some(f) => f(),
            None => false,
        };
        log::debug!("panning started (vetoed = {})", vetoed);
        self.emit(PanSignal::PanningStarted { vetoed });
        vetoed
    }

    pub(crate) fn finish_panning(&mut self) {
        log::debug!("panning finished");
        self.emit(PanSignal::PanningFinished);
        if self.gesture.phase == GesturePhase::Released {
            self.gesture.phase = GesturePhase::Idle;
        }
    }

    /// Cancels inertial motion, dropping velocity and overshoot.
    pub(crate) fn stop_physics(&mut self) {
        if self.timers.cancel(TimerKind::Physics) {
            self.h.halt();
            self.v.halt();
            self.finish_panning();
            self.notify_changes();
        }
    }

    /// Scrolls both axes by `(dx, dy)` (content moves with the pointer).
    pub(crate) fn scroll_by(&mut self, dx: f64, dy: f64) {
        if self.content.is_none() {
            return;
        }

        let mut params = StepParams {
            pressed: self.gesture.button_pressed,
            bounce_steps: self.config.bounce_steps,
            overshoot_max: 0,
            vmax_overshooting: self.config.velocity_overshooting_max,
        };

        let mut free_x = true;
        let mut free_y = true;

        if self.v.is_scrollable() {
            params.overshoot_max = self.config.overshoot_limit(Orientation::Vertical);
            free_y = self.v.step(dy, &params);
        } else {
            self.v.halt();
        }

        if self.h.is_scrollable() {
            params.overshoot_max = self.config.overshoot_limit(Orientation::Horizontal);
            free_x = self.h.step(dx, &params);
        } else {
            self.h.halt();
        }

        self.notify_changes();

        // Blocked at an edge: measure acceleration from the current pointer
        // so reversing direction responds at once.
        if self.config.mode == PanMode::Accelerated {
            if !free_x {
                self.gesture.pos.x = self.accel_pos.x;
            }
            if !free_y {
                self.gesture.pos.y = self.accel_pos.y;
            }
        }
    }

    /// Reports value and overshoot changes since the last call.
    pub(crate) fn notify_changes(&mut self) {
        let values = (self.h.value(), self.v.value());
        if values != self.reported_values {
            self.reported_values = values;
            self.emit(PanSignal::ValueChanged { hvalue: values.0, vvalue: values.1 });

            if self.realized && (self.h.is_scrollable() || self.v.is_scrollable()) {
                let delay = self.config.fade_delay_ticks();
                self.with_fade(|f| f.resume(delay));
                self.launch_fade(1.0);
            }
        }

        let overshoot = (self.h.overshoot.dist, self.v.overshoot.dist);
        if overshoot != self.reported_overshoot {
            self.reported_overshoot = overshoot;
            self.emit(PanSignal::OvershootChanged { horizontal: overshoot.0, vertical: overshoot.1 });
        }
    }

    /// Mutates the fade state, reporting any opacity change.
    pub(crate) fn with_fade<R>(&mut self, f: impl FnOnce(&mut IndicatorFade) -> R) -> R {
        let before = self.fade.alpha();
        let r = f(&mut self.fade);
        let after = self.fade.alpha();
        if after != before {
            self.emit(PanSignal::IndicatorAlpha(after));
        }
        r
    }

    /// Sets the indicator opacity and makes sure the fade timer runs.
    pub(crate) fn launch_fade(&mut self, alpha: f64) {
        self.with_fade(|f| f.show(alpha));
        if !self.timers.is_active(TimerKind::IndicatorFade)
            && !self.timers.is_active(TimerKind::InitialHint)
        {
            self.timers.start(TimerKind::IndicatorFade, SCROLL_FADE_INTERVAL_MS);
        }
    }
}
