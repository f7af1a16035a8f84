//! Tactile UI: kinetic pan surfaces on top of `tactile-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tactile_ui::prelude::*;
//!
//! let mut tree = SurfaceTree::new();
//! let content = tree.insert_root("list", Rect::new(0.0, 0.0, 400.0, 3000.0), EventMask::ALL);
//!
//! let mut host = ManualHost::new(0);
//! let mut area = PannableArea::try_new(PanConfig::default(), host.clock())?
//!     .on_panning_started(|| false);
//! area.set_child(Some(content));
//! area.allocate(&tree, Vec2::new(400.0, 600.0));
//! area.realize();
//!
//! // Feed input, let timers run, then react to what happened.
//! host.dispatch(&mut area, &tree, &event);
//! host.run_until_idle(&mut area, 5_000);
//! for signal in area.take_signals() {
//!     // redraw, deliver forwarded events, ...
//! }
//! ```

pub mod event;
pub mod pannable;
pub mod surface;

/// Everything needed to host a pannable area.
pub mod prelude {
    pub use crate::event::EventResult;
    pub use crate::pannable::{
        ForwardKind, ForwardedEvent, ManualHost, MovementDirection, MovementMode, Orientation,
        PanConfig, PanMode, PanSignal, PannableArea, TimerControl, TimerKind, TimerRequest,
        IGNORE_AXIS,
    };
    pub use crate::surface::{EventMask, SurfaceId, SurfaceTree};

    // Re-export the engine primitives everyone needs.
    pub use tactile_engine::coords::{Rect, Vec2};
    pub use tactile_engine::input::{InputEvent, PointerButtonEvent, PointerMoveEvent};
    pub use tactile_engine::time::{Clock, ManualClock, SystemClock};
}
