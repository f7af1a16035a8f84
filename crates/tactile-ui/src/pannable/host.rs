//! Deterministic timer host.
//!
//! [`PannableArea`] only asks for timers; something has to run them. A
//! real toolkit maps [`TimerRequest`]s onto its main loop. [`ManualHost`]
//! does it against a [`ManualClock`] so gestures can be scripted and
//! replayed tick by tick.

use std::rc::Rc;

use tactile_engine::input::InputEvent;
use tactile_engine::time::{Clock, ManualClock};

use crate::event::EventResult;
use crate::surface::SurfaceTree;

use super::area::PannableArea;
use super::timer::{TimerControl, TimerKind, TimerRequest};

/// A pending timer popped from a [`TimerQueue`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub kind: TimerKind,
    pub due_ms: i64,
    pub interval_ms: u32,
    seq: u64,
}

/// Periodic timers ordered by due time, then by start order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<ScheduledTimer>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies start and cancel requests issued at `now_ms`.
    ///
    /// Starting a scheduled kind restarts it.
    pub fn apply(&mut self, now_ms: i64, requests: impl IntoIterator<Item = TimerRequest>) {
        for request in requests {
            match request {
                TimerRequest::Start { kind, interval_ms } => {
                    self.remove(kind);
                    self.schedule(kind, now_ms + interval_ms as i64, interval_ms);
                }
                TimerRequest::Cancel(kind) => self.remove(kind),
            }
        }
    }

    /// Earliest pending timer and its due time.
    pub fn next_due(&self) -> Option<(TimerKind, i64)> {
        self.earliest().map(|i| (self.entries[i].kind, self.entries[i].due_ms))
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Schedules the next period of a timer whose callback returned `Continue`.
    pub fn repeat(&mut self, timer: ScheduledTimer) {
        self.schedule(timer.kind, timer.due_ms + timer.interval_ms as i64, timer.interval_ms);
    }

    fn schedule(&mut self, kind: TimerKind, due_ms: i64, interval_ms: u32) {
        self.seq += 1;
        self.entries.push(ScheduledTimer { kind, due_ms, interval_ms, seq: self.seq });
    }

    fn remove(&mut self, kind: TimerKind) {
        self.entries.retain(|e| e.kind != kind);
    }

    fn earliest(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)
    }

    /// Removes and returns the earliest timer due at or before `until_ms`.
    pub fn pop_due(&mut self, until_ms: i64) -> Option<ScheduledTimer> {
        let i = self.earliest()?;
        if self.entries[i].due_ms > until_ms {
            return None;
        }
        Some(self.entries.remove(i))
    }
}

/// Drives a [`PannableArea`] with a manual clock.
///
/// Input goes through [`dispatch`](Self::dispatch), which first runs every
/// timer due before the event's timestamp.
pub struct ManualHost {
    clock: Rc<ManualClock>,
    queue: TimerQueue,
}

impl ManualHost {
    pub fn new(start_ms: i64) -> Self {
        Self { clock: Rc::new(ManualClock::starting_at_ms(start_ms)), queue: TimerQueue::new() }
    }

    /// Clock to hand to [`PannableArea::try_new`].
    pub fn clock(&self) -> &Rc<ManualClock> {
        &self.clock
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn queue(&self) -> &TimerQueue {
        &self.queue
    }

    /// Picks up timer requests the area issued outside a timer callback.
    pub fn sync(&mut self, area: &mut PannableArea) {
        let now = self.now_ms();
        self.queue.apply(now, area.take_timer_requests());
    }

    /// Fires every timer due up to `until_ms`, then moves the clock there.
    /// Returns the number of callbacks run.
    pub fn advance_to(&mut self, area: &mut PannableArea, until_ms: i64) -> usize {
        self.sync(area);
        let mut fired = 0;
        while let Some(entry) = self.queue.pop_due(until_ms) {
            self.clock.set_ms(entry.due_ms);
            if area.on_timer(entry.kind) == TimerControl::Continue {
                self.queue.repeat(entry);
            }
            self.sync(area);
            fired += 1;
        }
        self.clock.set_ms(until_ms);
        fired
    }

    pub fn advance(&mut self, area: &mut PannableArea, ms: i64) -> usize {
        let until = self.now_ms() + ms;
        self.advance_to(area, until)
    }

    /// Runs timers until none is left. Returns `false` if some were still
    /// pending after `max_ms`.
    pub fn run_until_idle(&mut self, area: &mut PannableArea, max_ms: i64) -> bool {
        self.sync(area);
        let limit = self.now_ms() + max_ms;
        while let Some((_, due)) = self.queue.next_due() {
            if due > limit {
                log::debug!("timers still pending after {} ms", max_ms);
                return false;
            }
            self.advance_to(area, due);
        }
        true
    }

    /// Delivers `event` at its own timestamp.
    pub fn dispatch(&mut self, area: &mut PannableArea, tree: &SurfaceTree, event: &InputEvent) -> EventResult {
        if let Some(time) = event.time() {
            self.advance_to(area, time as i64);
        }
        let result = area.handle_input(tree, event);
        self.sync(area);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_orders_by_due_then_start_order() {
        let mut q = TimerQueue::new();
        q.apply(
            0,
            [
                TimerRequest::Start { kind: TimerKind::IndicatorFade, interval_ms: 100 },
                TimerRequest::Start { kind: TimerKind::Physics, interval_ms: 50 },
                TimerRequest::Start { kind: TimerKind::MotionFlush, interval_ms: 50 },
            ],
        );
        assert_eq!(q.next_due(), Some((TimerKind::Physics, 50)));
        assert_eq!(q.pop_due(49), None);
        assert_eq!(q.pop_due(50).map(|e| e.kind), Some(TimerKind::Physics));
        assert_eq!(q.pop_due(50).map(|e| e.kind), Some(TimerKind::MotionFlush));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn start_restarts_and_cancel_removes() {
        let mut q = TimerQueue::new();
        q.apply(0, [TimerRequest::Start { kind: TimerKind::Frame, interval_ms: 16 }]);
        q.apply(10, [TimerRequest::Start { kind: TimerKind::Frame, interval_ms: 16 }]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some((TimerKind::Frame, 26)));

        q.apply(12, [TimerRequest::Cancel(TimerKind::Frame)]);
        assert!(q.is_empty());
        assert!(!q.is_scheduled(TimerKind::Frame));
    }
}
