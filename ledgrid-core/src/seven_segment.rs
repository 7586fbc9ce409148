//! Seven-segment front end
//!
//! The chips can also drive classic digit displays: each digit register
//! holds one digit's segments. The bus operations are the same as for a
//! matrix, so they forward to an [`LedMatrix`]. There is no defined
//! mapping from segments or decimal values to bit patterns yet, so those
//! operations, and `reset`, report [`Error::Unsupported`].

use ledgrid_protocol::RegisterWrite;

use crate::error::Error;
use crate::matrix::LedMatrix;
use crate::traits::{Max7219, PinEvents};

/// Cascade of MAX7219 chips driving digit displays
#[derive(Debug, Clone)]
pub struct SevenSegments {
    matrix: LedMatrix,
}

impl SevenSegments {
    /// Create a digit-display cascade
    ///
    /// # Arguments
    /// - `digit_segments`: segments per digit, typically 7 or 8
    /// - `display_digits`: digits per chip (1-8)
    /// - `display_count`: chips in the cascade
    pub fn new(
        digit_segments: usize,
        display_digits: usize,
        display_count: usize,
    ) -> Result<Self, Error> {
        let matrix = LedMatrix::new(display_digits, digit_segments, 1, display_count)?;
        Ok(Self { matrix })
    }

    /// Switch one segment of one digit
    pub fn set_segment(
        &mut self,
        _segment: usize,
        _digit: usize,
        _display: usize,
        _on: bool,
    ) -> Result<(), Error> {
        Err(Error::Unsupported)
    }

    /// Show a value on one digit
    pub fn set_digit_value(
        &mut self,
        _digit: usize,
        _display: usize,
        _value: u32,
    ) -> Result<(), Error> {
        Err(Error::Unsupported)
    }

    /// Show a value across all digits of one chip
    pub fn set_display_value(&mut self, _display: usize, _value: u32) -> Result<(), Error> {
        Err(Error::Unsupported)
    }
}

impl Max7219 for SevenSegments {
    fn display_count(&self) -> usize {
        self.matrix.display_count()
    }

    fn reset(&mut self) -> Result<PinEvents, Error> {
        Err(Error::Unsupported)
    }

    fn execute(&mut self, batch: &[RegisterWrite]) -> Result<PinEvents, Error> {
        self.matrix.execute(batch)
    }

    fn execute_all(&mut self, write: RegisterWrite) -> Result<PinEvents, Error> {
        Ok(self.matrix.execute_all(write))
    }

    fn draw(&mut self) -> Result<PinEvents, Error> {
        Ok(self.matrix.draw())
    }
}
