//! One-dimensional scroll axis with edge overshoot.

use super::adjustment::Adjustment;

/// Which of the two axes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Edge overshoot of one axis.
///
/// `steps == 0` means no overshoot. While active, `steps` counts bounce
/// ticks spent moving outward and `dist` is the visual excursion in pixels:
/// positive past the lower edge, negative past the upper edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Overshoot {
    pub steps: u32,
    pub dist: i32,
}

impl Overshoot {
    pub const NONE: Overshoot = Overshoot { steps: 0, dist: 0 };

    #[inline]
    pub fn is_active(&self) -> bool {
        self.steps > 0
    }
}

/// Per-tick parameters shared by both axes.
#[derive(Debug, Copy, Clone)]
pub(crate) struct StepParams {
    pub pressed: bool,
    pub bounce_steps: u32,
    pub overshoot_max: i32,
    pub vmax_overshooting: f64,
}

/// Scroll state of one axis: range, velocity, overshoot and glide target.
#[derive(Debug, Clone)]
pub struct PanAxis {
    orientation: Orientation,
    pub(crate) adjustment: Adjustment,
    pub(crate) velocity: f64,
    pub(crate) overshoot: Overshoot,
    pub(crate) pending_target: Option<f64>,
    /// Speed granted by a fast click, derived from content/page ratio.
    pub(crate) accel_velocity: f64,
}

impl PanAxis {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            adjustment: Adjustment::default(),
            velocity: 0.0,
            overshoot: Overshoot::NONE,
            pending_target: None,
            accel_velocity: 0.0,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn adjustment(&self) -> &Adjustment {
        &self.adjustment
    }

    pub fn value(&self) -> f64 {
        self.adjustment.value()
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn overshoot(&self) -> Overshoot {
        self.overshoot
    }

    pub fn pending_target(&self) -> Option<f64> {
        self.pending_target
    }

    pub fn is_scrollable(&self) -> bool {
        self.adjustment.is_scrollable()
    }

    /// Drops velocity, overshoot and glide target.
    pub(crate) fn halt(&mut self) {
        self.velocity = 0.0;
        self.overshoot = Overshoot::NONE;
        self.pending_target = None;
    }

    /// Moves the axis by `inc` (value decreases by `inc`).
    ///
    /// Outside overshoot the value is clamped to the range; hitting an edge
    /// starts an overshoot, or kills the velocity when `overshoot_max` is
    /// zero. During overshoot the excursion either runs the bounce model
    /// (finger up) or follows `inc` directly (finger down).
    ///
    /// Returns `false` when the move was cut short by an edge.
    pub(crate) fn step(&mut self, inc: f64, p: &StepParams) -> bool {
        let adj = &mut self.adjustment;
        let mut dist = adj.value() - inc;
        let mut unobstructed = true;

        if !self.overshoot.is_active() {
            if dist < adj.lower() {
                unobstructed = false;
                dist = adj.lower();
                self.pending_target = None;
                if p.overshoot_max != 0 {
                    self.overshoot.steps = 1;
                    self.overshoot.dist = clamp_dist(
                        self.overshoot.dist as f64 + self.velocity,
                        0,
                        p.overshoot_max,
                    );
                    self.velocity = self.velocity.min(p.vmax_overshooting);
                } else {
                    self.velocity = 0.0;
                }
            } else if dist > adj.max_value() {
                unobstructed = false;
                dist = adj.max_value();
                self.pending_target = None;
                if p.overshoot_max != 0 {
                    self.overshoot.steps = 1;
                    self.overshoot.dist = clamp_dist(
                        self.overshoot.dist as f64 + self.velocity,
                        -p.overshoot_max,
                        0,
                    );
                    self.velocity = self.velocity.max(-p.vmax_overshooting);
                } else {
                    self.velocity = 0.0;
                }
            } else if let Some(target) = self.pending_target {
                if (inc < 0.0 && target <= dist) || (inc > 0.0 && target >= dist) {
                    dist = target;
                    self.pending_target = None;
                    self.velocity = 0.0;
                }
            }
            adj.set_value(dist);
        } else if !p.pressed {
            self.bounce(p);
        } else {
            let max = p.overshoot_max;
            let o = &mut self.overshoot;
            if o.dist > 0 {
                o.dist = clamp_dist(o.dist as f64 + inc, 0, max);
            } else if o.dist < 0 {
                o.dist = clamp_dist(o.dist as f64 + inc, -max, 0);
            } else {
                o.steps = 0;
                adj.set_value(dist);
            }
        }

        unobstructed
    }

    fn bounce(&mut self, p: &StepParams) {
        let max = p.overshoot_max;
        let o = &mut self.overshoot;
        let vel = &mut self.velocity;

        if o.dist > 0 {
            if o.steps < p.bounce_steps && *vel > 0.0 {
                o.steps += 1;
                *vel *= o.dist as f64 / max as f64;
            } else if o.steps >= p.bounce_steps && *vel > 0.0 {
                *vel = -*vel;
            } else if (o.steps > 1 && *vel < 0.0) || *vel == 0.0 {
                *vel = (-(o.dist as f64 * 0.8)).min(-10.0);
            }
            o.dist = clamp_dist(o.dist as f64 + *vel, 0, max);
        } else if o.dist < 0 {
            if o.steps < p.bounce_steps && *vel < 0.0 {
                o.steps += 1;
                *vel *= -(o.dist as f64 / max as f64);
            } else if o.steps >= p.bounce_steps && *vel < 0.0 {
                *vel = -*vel;
            } else if (o.steps > 1 && *vel > 0.0) || *vel == 0.0 {
                *vel = (-(o.dist as f64 * 0.8)).max(10.0);
            }
            o.dist = clamp_dist(o.dist as f64 + *vel, -max, 0);
        } else {
            o.steps = 0;
            *vel = 0.0;
        }
    }
}

/// Clamps in floating point, then truncates toward zero.
fn clamp_dist(v: f64, lo: i32, hi: i32) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(lo as f64, hi as f64) as i32
}
