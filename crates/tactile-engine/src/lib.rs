//! Tactile engine crate.
//!
//! This crate owns the platform-agnostic pieces used by higher layers:
//! geometry, timestamped input events, clocks and logger setup.

pub mod input;
pub mod time;

pub mod logging;
pub mod coords;
