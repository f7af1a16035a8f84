//! Timer bookkeeping.
//!
//! The engine does not own timers. It records start/cancel requests, and the
//! host calls back into `PannableArea::on_timer` when one fires.

use std::collections::HashSet;

/// Timer sources used by the pan engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TimerKind {
    /// Inertial physics tick.
    Physics,
    /// Delivery of coalesced drag motion.
    MotionFlush,
    /// Scroll indicator fade.
    IndicatorFade,
    /// Delay before the scroll hint shown after realize.
    InitialHint,
    /// Frame tick of an animated `scroll_to`.
    Frame,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimerRequest {
    /// Fire `kind` every `interval_ms` until it returns `Break` or is cancelled.
    Start { kind: TimerKind, interval_ms: u32 },
    Cancel(TimerKind),
}

/// Return value of a timer callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimerControl {
    Continue,
    Break,
}

/// Active timer kinds plus requests not yet collected by the host.
#[derive(Debug, Default)]
pub(crate) struct TimerSet {
    active: HashSet<TimerKind>,
    requests: Vec<TimerRequest>,
}

impl TimerSet {
    /// Starts `kind` unless it is already running. Returns `true` if started.
    pub fn start(&mut self, kind: TimerKind, interval_ms: u32) -> bool {
        if !self.active.insert(kind) {
            return false;
        }
        log::trace!("timer start {:?} every {} ms", kind, interval_ms);
        self.requests.push(TimerRequest::Start { kind, interval_ms });
        true
    }

    /// Cancels `kind`. Returns `true` if it was running.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        if !self.active.remove(&kind) {
            return false;
        }
        log::trace!("timer cancel {:?}", kind);
        self.requests.push(TimerRequest::Cancel(kind));
        true
    }

    /// Marks `kind` as stopped by its own callback returning `Break`.
    pub fn finished(&mut self, kind: TimerKind) {
        self.active.remove(&kind);
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn cancel_all(&mut self) {
        let mut kinds: Vec<TimerKind> = self.active.iter().copied().collect();
        kinds.sort_by_key(|k| *k as u8);
        for kind in kinds {
            self.cancel(kind);
        }
    }

    pub fn take_requests(&mut self) -> Vec<TimerRequest> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_not_doubled() {
        let mut t = TimerSet::default();
        assert!(t.start(TimerKind::Physics, 50));
        assert!(!t.start(TimerKind::Physics, 50));
        assert_eq!(
            t.take_requests(),
            vec![TimerRequest::Start { kind: TimerKind::Physics, interval_ms: 50 }]
        );
    }

    #[test]
    fn cancel_only_reports_running_timers() {
        let mut t = TimerSet::default();
        assert!(!t.cancel(TimerKind::Frame));
        t.start(TimerKind::Frame, 16);
        assert!(t.cancel(TimerKind::Frame));
        assert!(!t.is_active(TimerKind::Frame));
        assert_eq!(t.take_requests().len(), 2);
    }

    #[test]
    fn finished_does_not_emit_cancel() {
        let mut t = TimerSet::default();
        t.start(TimerKind::MotionFlush, 40);
        t.take_requests();
        t.finished(TimerKind::MotionFlush);
        assert!(t.take_requests().is_empty());
        assert!(t.start(TimerKind::MotionFlush, 40));
    }

    #[test]
    fn cancel_all_is_ordered() {
        let mut t = TimerSet::default();
        t.start(TimerKind::Frame, 16);
        t.start(TimerKind::Physics, 50);
        t.take_requests();
        t.cancel_all();
        assert_eq!(
            t.take_requests(),
            vec![TimerRequest::Cancel(TimerKind::Physics), TimerRequest::Cancel(TimerKind::Frame)]
        );
    }
}
