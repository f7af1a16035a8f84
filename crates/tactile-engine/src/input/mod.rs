//! Input subsystem.
//!
//! Public API is platform-agnostic. Platform adapters under `platform`
//! translate native window events into `InputEvent`s.

pub mod platform;

mod state;
mod types;

pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
    ScrollDirection,
    Timestamp,
};
