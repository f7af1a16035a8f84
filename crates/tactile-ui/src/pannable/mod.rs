//! Kinetic panning.
//!
//! A [`PannableArea`] turns press/drag/release sequences on a viewport into
//! scrolling of a larger content surface: drags move the content, flings
//! keep it gliding with decaying velocity, and running past an edge
//! stretches the content before it bounces back. Presses that never become
//! a pan are forwarded to the surface under the pointer, so content stays
//! clickable.
//!
//! The area owns no event loop. Hosts feed it input and timer callbacks,
//! then drain the [`PanSignal`]s and [`TimerRequest`]s it queued.
//! [`ManualHost`] is a complete host running on a manual clock.

mod adjustment;
mod animation;
mod area;
mod axis;
mod config;
mod error;
mod fade;
mod gesture;
mod host;
mod input;
pub mod physics;
mod signal;
mod timer;


pub use adjustment::Adjustment;
pub use animation::{AnimationRun, IGNORE_AXIS};
pub use area::PannableArea;
pub use axis::{Orientation, Overshoot, PanAxis};
pub use config::{MovementMode, PanConfig, PanMode};
pub use error::ConfigError;
pub use fade::{FadeDirection, IndicatorFade};
pub use gesture::{EventKind, GesturePhase, GestureState};
pub use host::{ManualHost, ScheduledTimer, TimerQueue};
pub use signal::{ForwardKind, ForwardedEvent, MovementDirection, PanSignal};
pub use timer::{TimerControl, TimerKind, TimerRequest};
