//! Front-end traits
//!
//! These traits define the interface between drawing code, the encoder
//! and whatever replays the resulting pin sequence.

pub mod max7219;
pub mod surface;

pub use max7219::{Max7219, PinEvents};
pub use surface::{LedSurface, LedSurfaceExt};
