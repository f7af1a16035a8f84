//! Outbound notifications of a [`PannableArea`](super::PannableArea).
//!
//! Every intake method appends to a queue that the owner drains with
//! `take_signals()` after the call returns.

use tactile_engine::input::Timestamp;

use crate::surface::SurfaceId;

/// Direction of the gesture that started a pan.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MovementDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Kind of a synthetic event delivered to a captured surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ForwardKind {
    Enter,
    Leave,
    ButtonPress,
    Motion,
    ButtonRelease,
}

/// Synthetic event for a content surface, in that surface's coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ForwardedEvent {
    pub target: SurfaceId,
    pub kind: ForwardKind,
    pub x: f64,
    pub y: f64,
    pub x_root: f64,
    pub y_root: f64,
    pub time: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanSignal {
    /// The gesture locked onto the horizontal axis. `x`/`y` is the press point.
    HorizontalMovement { direction: MovementDirection, x: f64, y: f64 },
    /// The gesture locked onto the vertical axis. `x`/`y` is the press point.
    VerticalMovement { direction: MovementDirection, x: f64, y: f64 },
    /// Panning began; `vetoed` reports the handler's answer.
    PanningStarted { vetoed: bool },
    PanningFinished,
    ValueChanged { hvalue: f64, vvalue: f64 },
    OvershootChanged { horizontal: i32, vertical: i32 },
    IndicatorAlpha(f64),
    Forward(ForwardedEvent),
}
