//! Board-agnostic LED matrix encoder for cascaded MAX7219 chips
//!
//! This crate turns drawing intent into the pin sequence that programs a
//! rectangle of MAX7219 chips sharing one serial bus:
//!
//! - Display grid with per-chip bitmaps and a transmitted snapshot
//! - Row diff engine that only resends changed rows
//! - Unchecked [`LedMatrix`] front end for a single rendering thread
//! - Bounds-checked, lock-guarded [`CheckedLedMatrix`]
//! - [`SevenSegments`] front end for digit displays
//! - Configuration type definitions
//!
//! Nothing here touches hardware. Every operation returns an ordered
//! `Vec<PinEvent>` for a pin executor to replay.
//!
//! ```text
//! set_led ─▶ DisplayGrid ─▶ DrawPlan ─▶ serialize ─▶ Vec<PinEvent> ─▶ executor
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod checked;
pub mod config;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod seven_segment;
pub mod traits;

pub use checked::CheckedLedMatrix;
pub use error::Error;
pub use grid::{
    DisplayGrid, DrawPlan, Geometry, MAX_DISPLAY_COLUMNS, MAX_DISPLAY_COUNT, MAX_DISPLAY_ROWS,
};
pub use matrix::{LedMatrix, INIT_SEQUENCE};
pub use seven_segment::SevenSegments;
pub use traits::{LedSurface, LedSurfaceExt, Max7219, PinEvents};

pub use ledgrid_protocol::{PinEvent, RegisterAddress, RegisterWrite};
