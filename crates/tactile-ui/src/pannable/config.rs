//! Tunables of the kinetic pan engine.

use super::axis::Orientation;
use super::error::ConfigError;

/// Samples below this magnitude are treated as zero.
pub(crate) const RATIO_TOLERANCE: f64 = 1e-6;

/// Scroll indicator fade-in tick.
pub(crate) const SCROLL_FADE_IN_INTERVAL_MS: u32 = 50;
/// Scroll indicator hold / fade-out tick.
pub(crate) const SCROLL_FADE_INTERVAL_MS: u32 = 100;
pub(crate) const INITIAL_HINT_DELAY_MS: u32 = 300;
pub(crate) const INITIAL_HINT_HOLD_MS: u32 = 2000;
/// Extra fade ticks granted to wheel scrolling.
pub(crate) const WHEEL_HOLD_TICKS: u32 = 20;

pub(crate) const MOTION_EVENTS_PER_SECOND: u32 = 25;
pub(crate) const CURSOR_STOPPED_TIMEOUT_MS: u32 = 200;
pub(crate) const CURSOR_STOPPED_DISTANCE: f64 = 4.0;
pub(crate) const MAX_SPEED_THRESHOLD: f64 = 280.0;
pub(crate) const ACCEL_FACTOR: f64 = 27.0;
pub(crate) const MIN_ACCEL_THRESHOLD: f64 = 40.0;
pub(crate) const FAST_CLICK_MS: u32 = 125;
pub(crate) const FRAME_INTERVAL_MS: u32 = 16;

/// Coordinate used for a release that must not land on the captured surface.
pub(crate) const OUT_OF_BOUNDS: f64 = -16384.0;

/// How pointer motion turns into scrolling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PanMode {
    /// Content follows the finger exactly; no inertia.
    Push,
    /// Speed grows with the distance from the press point.
    Accelerated,
    /// Content follows the finger and keeps gliding after release.
    #[default]
    Auto,
}

/// Axes the user is allowed to pan along.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MovementMode {
    pub horizontal: bool,
    pub vertical: bool,
}

impl MovementMode {
    pub const HORIZONTAL: MovementMode = MovementMode { horizontal: true, vertical: false };
    pub const VERTICAL: MovementMode = MovementMode { horizontal: false, vertical: true };
    pub const BOTH: MovementMode = MovementMode { horizontal: true, vertical: true };

    #[inline]
    pub fn allows(self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }
}

impl Default for MovementMode {
    fn default() -> Self {
        Self::VERTICAL
    }
}

/// Pan engine configuration.
///
/// Velocities are in pixels per physics tick. Durations are milliseconds
/// unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PanConfig {
    pub mode: PanMode,
    pub movement: MovementMode,
    pub velocity_min: f64,
    pub velocity_max: f64,
    /// Speed cap while bouncing past an edge.
    pub velocity_overshooting_max: f64,
    /// Fraction of `velocity_max` above which a press does not reach children.
    pub velocity_fast_factor: f64,
    pub deceleration: f64,
    pub drag_inertia: f64,
    /// Physics ticks per second.
    pub sps: u32,
    pub panning_threshold: f64,
    pub scrollbar_fade_delay: u32,
    pub bounce_steps: u32,
    pub force: f64,
    pub direction_error_margin: f64,
    pub vovershoot_max: i32,
    pub hovershoot_max: i32,
    /// Seconds a `glide_to` takes to arrive.
    pub scroll_time: f64,
    pub initial_hint: bool,
    pub low_friction_mode: bool,
    pub center_on_child_focus: bool,
    /// Duration of an animated `scroll_to`. Zero makes it a jump.
    pub animation_duration: u32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            mode:                      PanMode::Auto,
            movement:                  MovementMode::VERTICAL,
            velocity_min:              20.0,
            velocity_max:              500.0,
            velocity_overshooting_max: 30.0,
            velocity_fast_factor:      0.02,
            deceleration:              0.93,
            drag_inertia:              0.85,
            sps:                       20,
            panning_threshold:         25.0,
            scrollbar_fade_delay:      1000,
            bounce_steps:              3,
            force:                     50.0,
            direction_error_margin:    10.0,
            vovershoot_max:            150,
            hovershoot_max:            150,
            scroll_time:               1.0,
            initial_hint:              true,
            low_friction_mode:         false,
            center_on_child_focus:     false,
            animation_duration:        200,
        }
    }
}

impl PanConfig {
    pub fn mode(mut self, v: PanMode) -> Self {
        self.mode = v;
        self
    }

    pub fn movement(mut self, v: MovementMode) -> Self {
        self.movement = v;
        self
    }

    pub fn velocity_range(mut self, min: f64, max: f64) -> Self {
        self.velocity_min = min;
        self.velocity_max = max;
        self
    }

    pub fn velocity_overshooting_max(mut self, v: f64) -> Self {
        self.velocity_overshooting_max = v;
        self
    }

    pub fn deceleration(mut self, v: f64) -> Self {
        self.deceleration = v;
        self
    }

    pub fn drag_inertia(mut self, v: f64) -> Self {
        self.drag_inertia = v;
        self
    }

    pub fn sps(mut self, v: u32) -> Self {
        self.sps = v;
        self
    }

    pub fn panning_threshold(mut self, v: f64) -> Self {
        self.panning_threshold = v;
        self
    }

    pub fn bounce_steps(mut self, v: u32) -> Self {
        self.bounce_steps = v;
        self
    }

    pub fn force(mut self, v: f64) -> Self {
        self.force = v;
        self
    }

    pub fn overshoot_max(mut self, horizontal: i32, vertical: i32) -> Self {
        self.hovershoot_max = horizontal;
        self.vovershoot_max = vertical;
        self
    }

    pub fn scroll_time(mut self, seconds: f64) -> Self {
        self.scroll_time = seconds;
        self
    }

    pub fn initial_hint(mut self, v: bool) -> Self {
        self.initial_hint = v;
        self
    }

    pub fn low_friction_mode(mut self, v: bool) -> Self {
        self.low_friction_mode = v;
        self
    }

    pub fn center_on_child_focus(mut self, v: bool) -> Self {
        self.center_on_child_focus = v;
        self
    }

    pub fn animation_duration(mut self, ms: u32) -> Self {
        self.animation_duration = ms;
        self
    }

    pub fn scrollbar_fade_delay(mut self, ms: u32) -> Self {
        self.scrollbar_fade_delay = ms;
        self
    }

    /// Checks that every tunable is in a range the physics can handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_non_negative = |field: &'static str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::new(field, v, "a finite value >= 0"))
            }
        };

        finite_non_negative("velocity_min", self.velocity_min)?;
        finite_non_negative("velocity_max", self.velocity_max)?;
        finite_non_negative("velocity_overshooting_max", self.velocity_overshooting_max)?;
        finite_non_negative("velocity_fast_factor", self.velocity_fast_factor)?;
        finite_non_negative("panning_threshold", self.panning_threshold)?;
        finite_non_negative("force", self.force)?;
        finite_non_negative("direction_error_margin", self.direction_error_margin)?;

        if self.velocity_min > self.velocity_max {
            return Err(ConfigError::new("velocity_min", self.velocity_min, "<= velocity_max"));
        }
        if !(self.deceleration > 0.0 && self.deceleration < 1.0) {
            return Err(ConfigError::new("deceleration", self.deceleration, "a value in (0, 1)"));
        }
        if !(0.0..=1.0).contains(&self.drag_inertia) {
            return Err(ConfigError::new("drag_inertia", self.drag_inertia, "a value in [0, 1]"));
        }
        if self.sps == 0 {
            return Err(ConfigError::new("sps", 0.0, "> 0"));
        }
        if !(self.scroll_time.is_finite() && self.scroll_time > 0.0) {
            return Err(ConfigError::new("scroll_time", self.scroll_time, "> 0"));
        }
        if self.vovershoot_max < 0 {
            return Err(ConfigError::new("vovershoot_max", self.vovershoot_max as f64, ">= 0"));
        }
        if self.hovershoot_max < 0 {
            return Err(ConfigError::new("hovershoot_max", self.hovershoot_max as f64, ">= 0"));
        }
        Ok(())
    }

    /// Interval between physics ticks.
    pub(crate) fn tick_interval_ms(&self) -> u32 {
        (1000 / self.sps.max(1)).max(1)
    }

    /// Fade-out hold expressed in fade ticks.
    pub(crate) fn fade_delay_ticks(&self) -> u32 {
        self.scrollbar_fade_delay / SCROLL_FADE_INTERVAL_MS
    }

    pub(crate) fn overshoot_limit(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.hovershoot_max,
            Orientation::Vertical => self.vovershoot_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(PanConfig::default().validate(), Ok(()));
        assert_eq!(PanConfig::default().tick_interval_ms(), 50);
        assert_eq!(PanConfig::default().fade_delay_ticks(), 10);
    }

    #[test]
    fn deceleration_must_be_open_unit_interval() {
        let err = PanConfig::default().deceleration(1.0).validate().unwrap_err();
        assert_eq!(err.field, "deceleration");
        assert!(PanConfig::default().deceleration(0.0).validate().is_err());
    }

    #[test]
    fn velocity_range_must_be_ordered() {
        let err = PanConfig::default().velocity_range(50.0, 10.0).validate().unwrap_err();
        assert_eq!(err.field, "velocity_min");
        assert!(err.to_string().contains("velocity_max"));
    }

    #[test]
    fn rejects_zero_sps_and_negative_overshoot() {
        assert_eq!(PanConfig::default().sps(0).validate().unwrap_err().field, "sps");
        assert_eq!(
            PanConfig::default().overshoot_max(-1, 10).validate().unwrap_err().field,
            "hovershoot_max"
        );
    }

    #[test]
    fn rejects_nan_force() {
        assert_eq!(PanConfig::default().force(f64::NAN).validate().unwrap_err().field, "force");
    }

    #[test]
    fn movement_mode_allows() {
        assert!(MovementMode::VERTICAL.allows(Orientation::Vertical));
        assert!(!MovementMode::VERTICAL.allows(Orientation::Horizontal));
        assert!(MovementMode::BOTH.allows(Orientation::Horizontal));
    }
}
