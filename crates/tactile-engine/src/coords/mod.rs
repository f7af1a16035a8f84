//! Coordinate and geometry types shared by the engine and the pan surface.
//!
//! Canonical space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Values are `f64` so that scroll offsets and physics accumulate without
//! visible drift over long gestures.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
