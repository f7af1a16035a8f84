//! Pointer, wheel and key intake of [`PannableArea`].
//!
//! Every handler returns whether the event was consumed. The area sits on
//! top of its content: pointer events are always consumed, and the surface
//! under the press receives synthetic copies through
//! [`PanSignal::Forward`].

use tactile_engine::coords::{Rect, Vec2};
use tactile_engine::input::{
    InputEvent, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    ScrollDirection, Timestamp,
};

use crate::event::EventResult;
use crate::surface::{EventMask, SurfaceId, SurfaceTree};

use super::area::PannableArea;
use super::config::{
    PanMode, CURSOR_STOPPED_DISTANCE, CURSOR_STOPPED_TIMEOUT_MS, FAST_CLICK_MS,
    MAX_SPEED_THRESHOLD, MIN_ACCEL_THRESHOLD, MOTION_EVENTS_PER_SECOND, OUT_OF_BOUNDS,
    WHEEL_HOLD_TICKS,
};
use super::axis::Overshoot;
use super::gesture::{EventKind, GesturePhase};
use super::physics;
use super::signal::{ForwardKind, ForwardedEvent, MovementDirection, PanSignal};
use super::timer::TimerKind;

/// One pointer sample in viewport and screen coordinates.
#[derive(Debug, Copy, Clone)]
struct Sample {
    pos: Vec2,
    root: Vec2,
    time: Timestamp,
}

impl From<&PointerButtonEvent> for Sample {
    fn from(ev: &PointerButtonEvent) -> Self {
        Sample { pos: Vec2::new(ev.x, ev.y), root: Vec2::new(ev.x_root, ev.y_root), time: ev.time }
    }
}

impl From<&PointerMoveEvent> for Sample {
    fn from(ev: &PointerMoveEvent) -> Self {
        Sample { pos: Vec2::new(ev.x, ev.y), root: Vec2::new(ev.x_root, ev.y_root), time: ev.time }
    }
}

impl PannableArea {
    /// Routes a normalized input event to the matching handler.
    pub fn handle_input(&mut self, tree: &SurfaceTree, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::PointerButton(ev) => match ev.state {
                MouseButtonState::Pressed => self.on_press(tree, ev),
                MouseButtonState::Released => self.on_release(tree, ev),
            },
            InputEvent::PointerMoved(ev) => self.on_motion(tree, ev),
            InputEvent::MouseWheel { delta, .. } => match delta.direction() {
                Some(direction) => self.on_scroll(direction),
                None => EventResult::Ignored,
            },
            InputEvent::PointerLeft { time } => self.on_leave(tree, *time),
            InputEvent::Key { state: KeyState::Released, .. } => self.on_key_release(tree),
            _ => EventResult::Ignored,
        }
    }

    // ── press ─────────────────────────────────────────────────────────────

    pub fn on_press(&mut self, tree: &SurfaceTree, ev: &PointerButtonEvent) -> EventResult {
        let repeated = self.gesture.is_duplicate(ev.time, EventKind::Press);
        self.gesture.selection_movement = ev.modifiers.shift && repeated;

        if !self.is_enabled()
            || ev.button != MouseButton::Left
            || self.gesture.selection_movement
            || repeated
        {
            return EventResult::Consumed;
        }
        let Some(content) = self.content else {
            return EventResult::Consumed;
        };

        let s = Sample::from(ev);
        self.with_fade(|f| f.interrupt());
        self.launch_fade(self.fade.alpha());

        self.gesture.record(s.time, EventKind::Press);
        self.gesture.last_press_time = s.time;
        self.gesture.last_root = s.root;
        self.h.pending_target = None;
        self.v.pending_target = None;

        // A press without a release in between: close the old capture.
        if self.gesture.button_pressed {
            if let Some(child) = self.captured_alive(tree) {
                self.forward(child, ForwardKind::Leave, Vec2::zero(), s.root, s.time);
            }
        }

        self.gesture.pos = s.pos;
        self.gesture.press_origin = s.pos;

        // A press that stops a fast glide is a catch, not a click.
        let fast = self.config.velocity_max * self.config.velocity_fast_factor;
        let hit = if self.h.velocity.abs() <= fast && self.v.velocity.abs() <= fast {
            tree.topmost(content, self.to_content(s.pos), EventMask::BUTTON_PRESS)
        } else {
            None
        };

        self.gesture.button_pressed = true;
        self.gesture.pre_press_velocity = self.velocity();
        self.h.velocity = 0.0;
        self.v.velocity = 0.0;

        if self.timers.cancel(TimerKind::Physics) {
            self.finish_panning();
        }
        if self.animation.take().is_some() {
            self.timers.cancel(TimerKind::Frame);
        }
        self.gesture.phase = GesturePhase::Pressed;

        self.gesture.captured = hit.map(|(id, _)| id);
        if let Some((child, local)) = hit {
            self.gesture.child_size = tree.size(child).unwrap_or_default();
            self.gesture.child_origin = local;
            self.gesture.last_in = true;
            self.forward(child, ForwardKind::Enter, local, s.root, s.time);
            self.forward(child, ForwardKind::ButtonPress, local, s.root, s.time);
        }

        log::debug!(
            "press at ({:.1}, {:.1}), captured {}",
            s.pos.x,
            s.pos.y,
            self.gesture.captured.map(|c| tree.label(c)).unwrap_or("nothing"),
        );
        EventResult::Consumed
    }

    // ── motion ────────────────────────────────────────────────────────────

    pub fn on_motion(&mut self, tree: &SurfaceTree, ev: &PointerMoveEvent) -> EventResult {
        if self.content.is_none()
            || !self.is_enabled()
            || !self.gesture.button_pressed
            || self.gesture.is_duplicate(ev.time, EventKind::Motion)
        {
            return EventResult::Consumed;
        }

        let s = Sample::from(ev);
        self.gesture.last_root = s.root;
        let captured = self.captured_alive(tree);

        if !self.gesture.selection_movement {
            if self.gesture.last_kind == Some(EventKind::Press) {
                self.gesture.first_drag = true;
            }

            let mut d = s.pos - self.gesture.pos;
            if !self.gesture.moved {
                self.check_move(&s, captured, &mut d);
            }

            if self.gesture.moved {
                self.handle_move(&s, d);
            } else if let Some(child) = captured {
                let p = self.gesture.child_point(s.pos);
                let inside = Rect::from_size(self.gesture.child_size).contains_inclusive(p);
                if inside != self.gesture.last_in {
                    let kind = if inside { ForwardKind::Enter } else { ForwardKind::Leave };
                    self.forward(child, kind, p, s.root, s.time);
                    self.gesture.last_in = inside;
                }
            }
            self.gesture.record(s.time, EventKind::Motion);
        }

        if let Some(child) = captured {
            let p = self.gesture.child_point(s.pos);
            self.forward(child, ForwardKind::Motion, p, s.root, s.time);
        }
        EventResult::Consumed
    }

    /// Decides whether the drag becomes a pan, and along which axis.
    fn check_move(&mut self, s: &Sample, captured: Option<SurfaceId>, d: &mut Vec2) {
        let threshold = self.config.panning_threshold;
        if !self.gesture.first_drag
            || self.gesture.moved
            || (d.x.abs() <= threshold && d.y.abs() <= threshold)
        {
            return;
        }

        self.gesture.moved = true;
        *d = Vec2::zero();

        let origin = self.gesture.press_origin;
        let travel = (origin - s.pos).abs();
        let margin = self.config.direction_error_margin;
        let movement = self.config.movement;
        let h_free = self.h.is_scrollable() && movement.horizontal;
        let v_free = self.v.is_scrollable() && movement.vertical;

        if travel.y >= travel.x {
            let direction = if origin.y > s.pos.y { MovementDirection::Up } else { MovementDirection::Down };
            self.emit(PanSignal::VerticalMovement { direction, x: origin.x, y: origin.y });
            if !v_free && (!h_free || travel.y - travel.x >= margin) {
                self.gesture.moved = false;
            }
        } else {
            let direction = if origin.x > s.pos.x { MovementDirection::Left } else { MovementDirection::Right };
            self.emit(PanSignal::HorizontalMovement { direction, x: origin.x, y: origin.y });
            if !h_free && (!v_free || travel.x - travel.y >= margin) {
                self.gesture.moved = false;
            }
        }

        if self.gesture.moved {
            if let Some(child) = captured {
                let p = self.gesture.child_point(s.pos);
                self.forward(child, ForwardKind::Leave, p, s.root, s.time);
            }
            self.gesture.moved = !self.panning_started();
            if self.gesture.moved {
                self.gesture.phase = GesturePhase::Dragging;
            }
        }
        self.gesture.first_drag = false;

        if self.config.mode == PanMode::Accelerated {
            self.timers.start(TimerKind::Physics, self.config.tick_interval_ms());
        }
    }

    /// Applies one drag sample according to the pan mode. Returns the delta
    /// with disallowed axes zeroed.
    fn handle_move(&mut self, s: &Sample, d: Vec2) -> Vec2 {
        let mut d = d;
        match self.config.mode {
            PanMode::Push => {
                self.motion_scroll(d);
                self.gesture.pos = s.pos;
            }
            PanMode::Accelerated => {
                let (vmin, vmax) = (self.config.velocity_min, self.config.velocity_max);
                self.accel_pos = s.pos;
                self.h.velocity = physics::accelerated_velocity(d.x, self.viewport.x, vmin, vmax);
                self.v.velocity = physics::accelerated_velocity(d.y, self.viewport.y, vmin, vmax);
            }
            PanMode::Auto => {
                let dt = self.gesture.elapsed_since_last(s.time) as f64;
                let c = &self.config;
                let movement = c.movement;

                if movement.vertical {
                    let dist = s.pos.y - self.gesture.pos.y;
                    self.v.velocity = physics::drag_velocity(
                        self.v.velocity, dt, dist, c.velocity_max, c.drag_inertia, c.force,
                    );
                } else {
                    d.y = 0.0;
                    self.v.velocity = 0.0;
                }

                if movement.horizontal {
                    let dist = s.pos.x - self.gesture.pos.x;
                    self.h.velocity = physics::drag_velocity(
                        self.h.velocity, dt, dist, c.velocity_max, c.drag_inertia, c.force,
                    );
                } else {
                    d.x = 0.0;
                    self.h.velocity = 0.0;
                }

                self.motion_scroll(d);

                if movement.horizontal {
                    self.gesture.pos.x = s.pos.x;
                }
                if movement.vertical {
                    self.gesture.pos.y = s.pos.y;
                }
            }
        }
        d
    }

    /// Scrolls at most once per motion interval, accumulating in between.
    fn motion_scroll(&mut self, d: Vec2) {
        if self.timers.is_active(TimerKind::MotionFlush) {
            self.motion_pending += d;
        } else {
            self.scroll_by(d.x, d.y);
            self.motion_pending = Vec2::zero();
            self.timers.start(TimerKind::MotionFlush, 1000 / MOTION_EVENTS_PER_SECOND);
        }
    }

    // ── release ───────────────────────────────────────────────────────────

    pub fn on_release(&mut self, tree: &SurfaceTree, ev: &PointerButtonEvent) -> EventResult {
        if self.gesture.is_duplicate(ev.time, EventKind::Release)
            || !self.gesture.button_pressed
            || !self.is_enabled()
            || ev.button != MouseButton::Left
        {
            return EventResult::Consumed;
        }
        let Some(content) = self.content else {
            return EventResult::Consumed;
        };

        let s = Sample::from(ev);
        self.gesture.last_root = s.root;
        let captured = self.captured_alive(tree);
        let mut gliding = false;

        if !self.gesture.selection_movement {
            if self.gesture.last_kind == Some(EventKind::Motion) {
                let mut d = s.pos - self.gesture.pos;
                self.check_move(&s, captured, &mut d);

                if self.gesture.moved {
                    let delta = self.gesture.elapsed_since_last(s.time);
                    let d = self.handle_move(&s, d);

                    if self.timers.cancel(TimerKind::MotionFlush) {
                        let pending = std::mem::take(&mut self.motion_pending);
                        if !pending.is_zero() {
                            self.scroll_by(pending.x, pending.y);
                        }
                    }
                    self.motion_pending = Vec2::zero();

                    // The pointer rested before lifting: no fling.
                    if delta >= CURSOR_STOPPED_TIMEOUT_MS {
                        if d.x.abs() < CURSOR_STOPPED_DISTANCE {
                            self.h.velocity = 0.0;
                        }
                        if d.y.abs() < CURSOR_STOPPED_DISTANCE {
                            self.v.velocity = 0.0;
                        }
                    }
                }
            }

            // Released while stretched: bounce back.
            let bounce_steps = self.config.bounce_steps.max(1);
            for axis in [&mut self.h, &mut self.v] {
                if axis.overshoot.dist != 0 {
                    axis.overshoot.steps = bounce_steps;
                    axis.velocity = axis.overshoot.dist as f64 * 0.9;
                }
            }

            self.gesture.button_pressed = false;

            let vmin = self.config.velocity_min;
            let pre = self.gesture.pre_press_velocity;
            let mut force_fast = true;
            if s.time.wrapping_sub(self.gesture.last_press_time) < FAST_CLICK_MS
                && (pre.x.abs() > vmin || pre.y.abs() > vmin)
                && (pre.x.abs() > MIN_ACCEL_THRESHOLD || pre.y.abs() > MIN_ACCEL_THRESHOLD)
            {
                self.h.velocity = physics::fast_click_boost(self.h.velocity, pre.x, self.h.accel_velocity);
                self.v.velocity = physics::fast_click_boost(self.v.velocity, pre.y, self.v.accel_velocity);
                force_fast = false;
            }

            let stretched = self.h.overshoot.dist != 0 || self.v.overshoot.dist != 0;
            if self.h.velocity.abs() >= vmin || self.v.velocity.abs() >= vmin || stretched {
                if !self.gesture.moved {
                    self.panning_started();
                }
                self.with_fade(|f| f.show(1.0));

                if force_fast {
                    for axis in [&mut self.h, &mut self.v] {
                        if axis.velocity.abs() > MAX_SPEED_THRESHOLD
                            && axis.accel_velocity > MAX_SPEED_THRESHOLD
                        {
                            axis.velocity = axis.accel_velocity.copysign(axis.velocity);
                        }
                    }
                }

                self.timers.start(TimerKind::Physics, self.config.tick_interval_ms());
                gliding = true;
            } else {
                if self.center_pending {
                    self.center_on_focus(tree);
                }
                if self.gesture.moved {
                    self.emit(PanSignal::PanningFinished);
                }
            }
            self.center_pending = false;

            let delay = self.config.fade_delay_ticks();
            self.with_fade(|f| f.resume(delay));
            self.launch_fade(self.fade.alpha());
        } else {
            self.gesture.button_pressed = false;
        }

        self.gesture.record(s.time, EventKind::Release);
        self.gesture.phase = if gliding { GesturePhase::Released } else { GesturePhase::Idle };
        log::debug!(
            "release at ({:.1}, {:.1}), velocity ({:.1}, {:.1})",
            s.pos.x,
            s.pos.y,
            self.h.velocity,
            self.v.velocity,
        );

        let Some(child) = captured else {
            self.gesture.captured = None;
            self.gesture.moved = false;
            return EventResult::Consumed;
        };

        let hit = tree.topmost(content, self.to_content(s.pos), EventMask::BUTTON_RELEASE);
        let p = self.gesture.child_point(s.pos);

        if hit.map(|(id, _)| id) != Some(child) || self.gesture.moved {
            // Panned or slid off: the surface must not see a click.
            let off = Vec2::new(OUT_OF_BOUNDS, OUT_OF_BOUNDS);
            self.forward(child, ForwardKind::Leave, p, s.root, s.time);
            self.forward(child, ForwardKind::ButtonRelease, off, s.root, s.time);
        } else {
            self.forward(child, ForwardKind::ButtonRelease, p, s.root, s.time);
            self.forward(child, ForwardKind::Leave, p, s.root, s.time);
        }

        self.gesture.captured = None;
        self.gesture.moved = false;
        EventResult::Consumed
    }

    // ── crossing, wheel, keys ─────────────────────────────────────────────

    /// Pointer left the area.
    pub fn on_leave(&mut self, tree: &SurfaceTree, time: Timestamp) -> EventResult {
        if let Some(child) = self.captured_alive(tree) {
            if self.gesture.last_in {
                self.gesture.last_in = false;
                let root = self.gesture.last_root;
                self.forward(child, ForwardKind::Leave, Vec2::zero(), root, time);
            }
        }
        EventResult::Ignored
    }

    /// One wheel notch. Moves by `page_size^(2/3)` along the wheel's axis.
    pub fn on_scroll(&mut self, direction: ScrollDirection) -> EventResult {
        if !self.is_enabled() || self.content.is_none() {
            return EventResult::Consumed;
        }

        if self.timers.cancel(TimerKind::Physics) {
            for axis in [&mut self.h, &mut self.v] {
                axis.velocity = 0.0;
                axis.overshoot = Overshoot::NONE;
            }
            self.finish_panning();
        }

        let (axis, sign) = match direction {
            ScrollDirection::Up => (&mut self.v, -1.0),
            ScrollDirection::Down => (&mut self.v, 1.0),
            ScrollDirection::Left => (&mut self.h, -1.0),
            ScrollDirection::Right => (&mut self.h, 1.0),
        };
        let step = axis.adjustment.page_size().powf(2.0 / 3.0) * sign;
        let value = axis.adjustment.value() + step;
        axis.adjustment.set_value(value);
        self.notify_changes();

        let delay = self.config.fade_delay_ticks() + WHEEL_HOLD_TICKS;
        self.with_fade(|f| f.resume(delay));
        self.launch_fade(1.0);
        EventResult::Consumed
    }

    /// Any key release centers a pending focus change.
    pub fn on_key_release(&mut self, tree: &SurfaceTree) -> EventResult {
        if self.center_pending {
            self.center_on_focus(tree);
            self.center_pending = false;
        }
        EventResult::Ignored
    }

    fn center_on_focus(&mut self, tree: &SurfaceTree) {
        let Some(focus) = self.focus else { return };
        if !self.is_realized() || !tree.is_alive(focus) {
            return;
        }
        self.scroll_to_child(tree, focus);
    }

    // ── forwarding ────────────────────────────────────────────────────────

    /// The captured surface, dropped if it has been destroyed.
    fn captured_alive(&mut self, tree: &SurfaceTree) -> Option<SurfaceId> {
        let id = self.gesture.captured?;
        if tree.is_alive(id) {
            return Some(id);
        }
        log::debug!("captured surface {:?} destroyed mid-gesture", id);
        self.gesture.captured = None;
        None
    }

    fn forward(&mut self, target: SurfaceId, kind: ForwardKind, at: Vec2, root: Vec2, time: Timestamp) {
        self.emit(PanSignal::Forward(ForwardedEvent {
            target,
            kind,
            x: at.x,
            y: at.y,
            x_root: root.x,
            y_root: root.y,
            time,
        }));
    }
}
