//! Platform adapters.

#[cfg(feature = "winit")]
pub mod winit;
