//! Time subsystem.
//!
//! Provides a `Clock` abstraction so time-driven state machines can be
//! exercised deterministically:
//! - `SystemClock` for interactive hosts
//! - `ManualClock` for tests and scripted playback

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
