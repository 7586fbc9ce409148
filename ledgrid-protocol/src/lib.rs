//! MAX7219 wire protocol
//!
//! This crate defines the chip-facing side of the LED matrix encoder:
//! the register map, the pin events of the three-wire bus, and the
//! serializer that turns one batch of register writes into a framed
//! pin sequence.
//!
//! # Protocol Overview
//!
//! Every chip in a cascade receives one 16-bit packet per transmission:
//! ```text
//! ┌─────────┬─────────┬─────────┐
//! │ unused  │ ADDRESS │ DATA    │
//! │ 4 bits  │ 4 bits  │ 8 bits  │
//! └─────────┴─────────┴─────────┘
//! ```
//!
//! Packets are clocked MSB first on DIN while LOAD/CS is low; the rising
//! edge of LOAD/CS latches them into all chips at once.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod pin;
pub mod register;
pub mod serializer;

pub use pin::{Line, PinEvent};
pub use register::{
    DecodeMode, DisplayTest, RegisterAddress, RegisterWrite, ScanLimit, Shutdown, DIGIT_COUNT,
    MAX_INTENSITY,
};
pub use serializer::{serialize, serialize_into, serialized_len_bound, Serializer, PACKET_BITS};
