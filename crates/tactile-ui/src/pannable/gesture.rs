//! Pointer gesture bookkeeping.

use tactile_engine::coords::Vec2;
use tactile_engine::input::Timestamp;

use crate::surface::SurfaceId;

/// Coarse stage of the current pointer interaction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Button down, panning threshold not crossed.
    Pressed,
    /// Button down, locked onto an axis.
    Dragging,
    /// Button up, content still gliding.
    Released,
}

/// Kind of the last accepted pointer event, used to drop re-deliveries.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventKind {
    Press,
    Motion,
    Release,
}

/// State of the gesture in progress.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pub(crate) phase: GesturePhase,
    /// Reference point for motion deltas, viewport coordinates.
    pub(crate) pos: Vec2,
    pub(crate) press_origin: Vec2,
    /// Press point in the captured surface's coordinates.
    pub(crate) child_origin: Vec2,
    pub(crate) child_size: Vec2,
    pub(crate) captured: Option<SurfaceId>,
    /// Screen position of the latest pointer event.
    pub(crate) last_root: Vec2,
    /// Whether the pointer is inside the captured surface.
    pub(crate) last_in: bool,
    pub(crate) last_time: Timestamp,
    pub(crate) last_press_time: Timestamp,
    pub(crate) last_kind: Option<EventKind>,
    pub(crate) button_pressed: bool,
    /// Panning threshold crossed and not vetoed.
    pub(crate) moved: bool,
    pub(crate) first_drag: bool,
    /// Shift-click extending a selection; panning stays off.
    pub(crate) selection_movement: bool,
    /// Velocity at the moment of the press, for the fast-click boost.
    pub(crate) pre_press_velocity: Vec2,
}

impl GestureState {
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn press_origin(&self) -> Vec2 {
        self.press_origin
    }

    pub fn captured(&self) -> Option<SurfaceId> {
        self.captured
    }

    pub fn is_pressed(&self) -> bool {
        self.button_pressed
    }

    /// Whether the drag has locked onto an axis.
    pub fn movement_decided(&self) -> bool {
        self.moved
    }

    /// `true` if an event of `kind` at `time` repeats the last accepted one.
    pub fn is_duplicate(&self, time: Timestamp, kind: EventKind) -> bool {
        self.last_kind == Some(kind) && self.last_time == time
    }

    pub(crate) fn record(&mut self, time: Timestamp, kind: EventKind) {
        self.last_time = time;
        self.last_kind = Some(kind);
    }

    /// Point in the captured surface's coordinates for a viewport point.
    pub(crate) fn child_point(&self, p: Vec2) -> Vec2 {
        self.child_origin + (p - self.press_origin)
    }

    pub(crate) fn elapsed_since_last(&self, time: Timestamp) -> u32 {
        time.wrapping_sub(self.last_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requires_same_time_and_kind() {
        let mut g = GestureState::default();
        assert!(!g.is_duplicate(0, EventKind::Motion));
        g.record(100, EventKind::Motion);
        assert!(g.is_duplicate(100, EventKind::Motion));
        assert!(!g.is_duplicate(100, EventKind::Release));
        assert!(!g.is_duplicate(101, EventKind::Motion));
    }

    #[test]
    fn child_point_follows_pointer() {
        let g = GestureState {
            press_origin: Vec2::new(100.0, 200.0),
            child_origin: Vec2::new(5.0, 6.0),
            ..GestureState::default()
        };
        assert_eq!(g.child_point(Vec2::new(110.0, 180.0)), Vec2::new(15.0, -14.0));
    }

    #[test]
    fn elapsed_wraps() {
        let mut g = GestureState::default();
        g.record(u32::MAX - 9, EventKind::Press);
        assert_eq!(g.elapsed_since_last(10), 20);
    }
}
