//! Programmatic scrolling: animated, instant and inertial.

use tactile_engine::coords::Vec2;

use crate::surface::{SurfaceId, SurfaceTree};

use super::adjustment::Adjustment;
use super::area::PannableArea;
use super::config::{PanMode, FRAME_INTERVAL_MS};
use super::physics::ease_out_cubic;
use super::timer::{TimerControl, TimerKind};

/// Coordinate meaning "leave this axis where it is".
pub const IGNORE_AXIS: f64 = -1.0;

/// An eased transition between two scroll positions.
///
/// Times are microseconds on the area's clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationRun {
    pub source: Vec2,
    pub target: Vec2,
    pub start_us: i64,
    pub end_us: i64,
}

impl AnimationRun {
    /// Position at `now_us`, or `None` once the run is over.
    pub fn sample(&self, now_us: i64) -> Option<Vec2> {
        if now_us >= self.end_us {
            return None;
        }
        let span = (self.end_us - self.start_us).max(1) as f64;
        let t = ((now_us - self.start_us) as f64 / span).clamp(0.0, 1.0);
        let e = ease_out_cubic(t);
        Some(self.source + (self.target - self.source) * e)
    }
}

impl PannableArea {
    /// Smoothly scrolls so `(x, y)` of the content ends up centered.
    ///
    /// Pass [`IGNORE_AXIS`] for a coordinate to leave that axis alone. Falls
    /// back to [`jump_to`](Self::jump_to) when `animation_duration` is zero.
    ///
    /// # Panics
    /// If the area is not realized.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.move_to(x, y, true);
    }

    /// Like [`scroll_to`](Self::scroll_to) without the animation.
    ///
    /// # Panics
    /// If the area is not realized.
    pub fn jump_to(&mut self, x: f64, y: f64) {
        self.move_to(x, y, false);
    }

    /// Centers `(x, y)` with an inertial glide that lands exactly on it.
    ///
    /// Push mode has no inertia and jumps instead.
    ///
    /// # Panics
    /// If the area is not realized.
    pub fn glide_to(&mut self, x: f64, y: f64) {
        if self.config.mode == PanMode::Push {
            self.jump_to(x, y);
            return;
        }
        let Some((tx, ty)) = self.centered_targets(x, y) else {
            return;
        };

        self.end_animation();
        let vf = self.vel_factor;
        for (axis, target) in [(&mut self.h, tx), (&mut self.v, ty)] {
            axis.pending_target = None;
            let Some(target) = target else { continue };
            let dist = target - axis.value();
            if dist != 0.0 {
                axis.pending_target = Some(target);
                axis.velocity = -dist / vf;
            }
        }

        log::debug!("glide to ({:?}, {:?})", tx, ty);
        self.launch_fade(1.0);
        self.timers.start(TimerKind::Physics, self.config.tick_interval_ms());
    }

    /// Scrolls so the top-left corner of `child` is centered.
    ///
    /// # Panics
    /// If the area is not realized.
    pub fn scroll_to_child(&mut self, tree: &SurfaceTree, child: SurfaceId) {
        if let Some(p) = self.child_position(tree, child) {
            self.scroll_to(p.x, p.y);
        }
    }

    /// Instant variant of [`scroll_to_child`](Self::scroll_to_child).
    ///
    /// # Panics
    /// If the area is not realized.
    pub fn jump_to_child(&mut self, tree: &SurfaceTree, child: SurfaceId) {
        if let Some(p) = self.child_position(tree, child) {
            self.jump_to(p.x, p.y);
        }
    }

    fn child_position(&self, tree: &SurfaceTree, child: SurfaceId) -> Option<Vec2> {
        assert!(self.is_realized(), "scrolling to a child of an unrealized pannable area");
        let content = self.content?;
        if !tree.is_ancestor(content, child) {
            log::warn!("surface '{}' is not inside the pannable content", tree.label(child));
            return None;
        }
        tree.translate_to_ancestor(child, content, Vec2::zero())
    }

    /// Per-axis value that centers `(x, y)`, or `None` when there is nothing to do.
    fn centered_targets(&self, x: f64, y: f64) -> Option<(Option<f64>, Option<f64>)> {
        assert!(self.is_realized(), "scrolling an unrealized pannable area");

        if !self.h.is_scrollable() && !self.v.is_scrollable() {
            return None;
        }
        if x == IGNORE_AXIS && y == IGNORE_AXIS {
            return None;
        }

        let center = |adj: &Adjustment, c: f64| {
            (c != IGNORE_AXIS).then(|| adj.clamp(c - adj.page_size() / 2.0))
        };
        Some((center(self.h.adjustment(), x), center(self.v.adjustment(), y)))
    }

    fn move_to(&mut self, x: f64, y: f64, animate: bool) {
        let Some((tx, ty)) = self.centered_targets(x, y) else {
            return;
        };
        let target = Vec2::new(tx.unwrap_or(self.h.value()), ty.unwrap_or(self.v.value()));

        let clock = self.clock.upgrade();
        let duration = self.config.animation_duration;
        match clock {
            Some(clock) if animate && duration != 0 => {
                if self.animation.is_some_and(|run| run.target == target)
                    && self.timers.is_active(TimerKind::Frame)
                {
                    return;
                }
                self.stop_physics();

                let start_us = clock.now_us();
                self.animation = Some(AnimationRun {
                    source: Vec2::new(self.h.value(), self.v.value()),
                    target,
                    start_us,
                    end_us: start_us + duration as i64 * 1000,
                });
                log::debug!("animating to ({:.1}, {:.1}) over {} ms", target.x, target.y, duration);
                self.timers.start(TimerKind::Frame, FRAME_INTERVAL_MS);
            }
            _ => {
                self.stop_physics();
                self.end_animation();
                self.set_values(target);
            }
        }
    }

    fn end_animation(&mut self) {
        self.animation = None;
        self.timers.cancel(TimerKind::Frame);
    }

    fn set_values(&mut self, p: Vec2) {
        self.h.adjustment.set_value(p.x);
        self.v.adjustment.set_value(p.y);
        self.notify_changes();
    }

    pub(crate) fn animation_frame(&mut self) -> TimerControl {
        let Some(run) = self.animation else {
            return self.stop_timer(TimerKind::Frame);
        };
        // Without a clock the run cannot progress: land on the target.
        let now = self.clock.upgrade().map(|c| c.now_us()).unwrap_or(run.end_us);

        match run.sample(now) {
            Some(p) => {
                self.set_values(p);
                TimerControl::Continue
            }
            None => {
                self.set_values(run.target);
                self.animation = None;
                self.stop_timer(TimerKind::Frame)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_eases_out_and_ends() {
        let run = AnimationRun {
            source: Vec2::new(0.0, 100.0),
            target: Vec2::new(0.0, 300.0),
            start_us: 1_000,
            end_us: 201_000,
        };
        assert_eq!(run.sample(1_000), Some(Vec2::new(0.0, 100.0)));

        let half = run.sample(101_000).unwrap();
        // ease_out_cubic(0.5) = 0.875
        assert!((half.y - 275.0).abs() < 1e-9);

        assert_eq!(run.sample(201_000), None);
        assert_eq!(run.sample(500_000), None);
    }

    #[test]
    fn sample_before_start_is_source() {
        let run = AnimationRun {
            source: Vec2::new(10.0, 0.0),
            target: Vec2::new(20.0, 0.0),
            start_us: 5_000,
            end_us: 6_000,
        };
        assert_eq!(run.sample(0), Some(Vec2::new(10.0, 0.0)));
    }
}
