//! Scroll indicator opacity.

const STEP: f64 = 0.2;

/// What the indicator is currently doing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FadeDirection {
    In,
    Out,
    Hold,
}

/// Opacity state machine of the scroll indicators.
///
/// Driven by the `IndicatorFade` timer: fades in while a finger is down or
/// a hint is showing, holds for `hold_counter` ticks once fully visible,
/// then fades out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorFade {
    alpha: f64,
    fade_in: bool,
    interrupted: bool,
    hold_counter: u32,
}

/// Outcome of one fade tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum FadeTick {
    Continue,
    Finished,
    /// Fade-in completed; restart at the hold/fade-out rate.
    Relaunch,
}

impl IndicatorFade {
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn hold_counter(&self) -> u32 {
        self.hold_counter
    }

    pub fn direction(&self) -> FadeDirection {
        if (self.interrupted || self.fade_in) && self.alpha <= 0.9 {
            FadeDirection::In
        } else if self.interrupted || (self.alpha > 0.9 && self.hold_counter > 0) {
            FadeDirection::Hold
        } else {
            FadeDirection::Out
        }
    }

    /// Hidden indicator that fades in, then holds for `hold_ticks`.
    pub(crate) fn begin_hint(&mut self, hold_ticks: u32) {
        self.fade_in = true;
        self.alpha = 0.0;
        self.interrupted = false;
        self.hold_counter = hold_ticks;
    }

    /// Finger down: fade in and stay visible.
    pub(crate) fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Resume normal fading after `hold_ticks`.
    pub(crate) fn resume(&mut self, hold_ticks: u32) {
        self.interrupted = false;
        self.hold_counter = hold_ticks;
    }

    /// Sets opacity directly and leaves hint mode.
    pub(crate) fn show(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.fade_in = false;
    }

    /// Advances one tick. `moving` freezes the fade while content glides.
    pub(crate) fn tick(&mut self, moving: bool) -> FadeTick {
        if moving {
            return FadeTick::Continue;
        }

        if self.interrupted || self.fade_in {
            if self.alpha > 0.9 {
                self.alpha = 1.0;
                if self.fade_in {
                    self.fade_in = false;
                    return FadeTick::Relaunch;
                }
                return FadeTick::Finished;
            }
            self.alpha = (self.alpha + STEP).min(1.0);
            return FadeTick::Continue;
        }

        if self.alpha > 0.9 && self.hold_counter > 0 {
            self.hold_counter -= 1;
            return FadeTick::Continue;
        }

        if self.alpha < 0.1 {
            self.alpha = 0.0;
            return FadeTick::Finished;
        }
        self.alpha = (self.alpha - STEP).max(0.0);
        FadeTick::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_stop(f: &mut IndicatorFade, moving: bool) -> (usize, FadeTick) {
        for i in 1..=200 {
            let t = f.tick(moving);
            if t != FadeTick::Continue {
                return (i, t);
            }
        }
        panic!("fade never stopped");
    }

    #[test]
    fn hint_fades_in_then_relaunches() {
        let mut f = IndicatorFade::default();
        f.begin_hint(20);
        assert_eq!(f.direction(), FadeDirection::In);
        let (ticks, end) = run_until_stop(&mut f, false);
        assert_eq!(end, FadeTick::Relaunch);
        assert_eq!(ticks, 6);
        assert_eq!(f.alpha(), 1.0);
        assert_eq!(f.direction(), FadeDirection::Hold);
    }

    #[test]
    fn holds_then_fades_out() {
        let mut f = IndicatorFade::default();
        f.show(1.0);
        f.resume(3);
        for _ in 0..3 {
            assert_eq!(f.tick(false), FadeTick::Continue);
            assert_eq!(f.alpha(), 1.0);
        }
        assert_eq!(f.direction(), FadeDirection::Out);
        let (_, end) = run_until_stop(&mut f, false);
        assert_eq!(end, FadeTick::Finished);
        assert_eq!(f.alpha(), 0.0);
    }

    #[test]
    fn moving_content_freezes_fade() {
        let mut f = IndicatorFade::default();
        f.show(1.0);
        f.resume(0);
        for _ in 0..10 {
            assert_eq!(f.tick(true), FadeTick::Continue);
        }
        assert_eq!(f.alpha(), 1.0);
    }

    #[test]
    fn interrupt_fades_in_and_stops_visible() {
        let mut f = IndicatorFade::default();
        f.show(0.4);
        f.interrupt();
        let (_, end) = run_until_stop(&mut f, false);
        assert_eq!(end, FadeTick::Finished);
        assert_eq!(f.alpha(), 1.0);
        assert_eq!(f.direction(), FadeDirection::Hold);
    }
}
