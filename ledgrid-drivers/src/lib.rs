//! Pin executors and drivers for MAX7219 cascades
//!
//! This crate replays the pin sequences produced by `ledgrid-core`:
//!
//! - GPIO bit-bang executor over `embedded-hal` output pins
//! - Recording executor for capturing sequences
//! - Cascade simulator modelling the chips' shift registers
//! - [`MatrixDriver`] pairing a front end with an executor

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod driver;
pub mod executor;

pub use driver::{DriverError, MatrixDriver};
pub use executor::{
    CascadeSimulator, GpioExecutor, PinExecutor, RecordError, RecordingExecutor, SimError,
};
