//! Bounds-checked, lock-guarded LED matrix
//!
//! [`CheckedLedMatrix`] wraps an [`LedMatrix`] and validates every
//! coordinate. Cell reads and writes take `&self` and run under a blocking
//! mutex, so drawing code on several contexts can share one matrix.
//!
//! The lock covers a single cell access only. `draw`, `reset` and
//! `execute` need `&mut self`, which already rules out concurrent cell
//! access; a caller that wants a frame-consistent snapshot across many
//! `set_led` calls has to coordinate that itself.

use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use ledgrid_protocol::{PinEvent, RegisterWrite};

use crate::error::Error;
use crate::grid::Geometry;
use crate::matrix::LedMatrix;
use crate::traits::{LedSurface, Max7219, PinEvents};

/// Validating wrapper around [`LedMatrix`]
pub struct CheckedLedMatrix<M: RawMutex = CriticalSectionRawMutex> {
    inner: Mutex<M, RefCell<LedMatrix>>,
    geometry: Geometry,
}

impl<M: RawMutex> CheckedLedMatrix<M> {
    /// Create a checked matrix, see [`LedMatrix::new`]
    pub fn new(
        display_rows: usize,
        display_columns: usize,
        vertical_count: usize,
        horizontal_count: usize,
    ) -> Result<Self, Error> {
        LedMatrix::new(
            display_rows,
            display_columns,
            vertical_count,
            horizontal_count,
        )
        .map(Self::wrap)
    }

    /// Wrap an existing matrix, keeping its state
    pub fn wrap(matrix: LedMatrix) -> Self {
        let geometry = *matrix.geometry();
        Self {
            inner: Mutex::new(RefCell::new(matrix)),
            geometry,
        }
    }

    /// Unwrap into the unchecked matrix
    pub fn into_inner(self) -> LedMatrix {
        self.inner.into_inner().into_inner()
    }

    /// Matrix geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Number of chips in the cascade
    pub fn display_count(&self) -> usize {
        self.geometry.display_count()
    }

    fn check(&self, row: usize, col: usize) -> Result<(), Error> {
        if self.geometry.contains(row, col) {
            Ok(())
        } else {
            Err(Error::OutOfRange { row, col })
        }
    }

    /// Read one LED
    ///
    /// Fails with [`Error::OutOfRange`] outside the matrix.
    pub fn get_led(&self, row: usize, col: usize) -> Result<bool, Error> {
        self.check(row, col)?;
        Ok(self.inner.lock(|matrix| matrix.borrow().get_led(row, col)))
    }

    /// Write one LED
    ///
    /// Fails with [`Error::OutOfRange`] outside the matrix.
    pub fn set_led(&self, row: usize, col: usize, on: bool) -> Result<(), Error> {
        self.check(row, col)?;
        self.inner
            .lock(|matrix| matrix.borrow_mut().set_led(row, col, on));
        Ok(())
    }

    fn matrix_mut(&mut self) -> &mut LedMatrix {
        self.inner.get_mut().get_mut()
    }

    /// See [`LedMatrix::reset`]
    pub fn reset(&mut self) -> Vec<PinEvent> {
        self.matrix_mut().reset()
    }

    /// See [`LedMatrix::execute`]
    pub fn execute(&mut self, batch: &[RegisterWrite]) -> Result<Vec<PinEvent>, Error> {
        self.matrix_mut().execute(batch)
    }

    /// See [`LedMatrix::execute_all`]
    pub fn execute_all(&mut self, write: RegisterWrite) -> Vec<PinEvent> {
        self.matrix_mut().execute_all(write)
    }

    /// See [`LedMatrix::draw`]
    pub fn draw(&mut self) -> Vec<PinEvent> {
        self.matrix_mut().draw()
    }
}

impl<M: RawMutex> LedSurface for CheckedLedMatrix<M> {
    fn rows(&self) -> usize {
        self.geometry.rows()
    }

    fn columns(&self) -> usize {
        self.geometry.columns()
    }

    fn get_led(&self, row: usize, col: usize) -> Result<bool, Error> {
        CheckedLedMatrix::get_led(self, row, col)
    }

    fn set_led(&mut self, row: usize, col: usize, on: bool) -> Result<(), Error> {
        CheckedLedMatrix::set_led(self, row, col, on)
    }
}

impl<M: RawMutex> Max7219 for CheckedLedMatrix<M> {
    fn display_count(&self) -> usize {
        CheckedLedMatrix::display_count(self)
    }

    fn reset(&mut self) -> Result<PinEvents, Error> {
        Ok(CheckedLedMatrix::reset(self))
    }

    fn execute(&mut self, batch: &[RegisterWrite]) -> Result<PinEvents, Error> {
        CheckedLedMatrix::execute(self, batch)
    }

    fn execute_all(&mut self, write: RegisterWrite) -> Result<PinEvents, Error> {
        Ok(CheckedLedMatrix::execute_all(self, write))
    }

    fn draw(&mut self) -> Result<PinEvents, Error> {
        Ok(CheckedLedMatrix::draw(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LedSurfaceExt;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_out_of_range_rejected() {
        let matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 1, 2).unwrap();
        assert_eq!(
            matrix.set_led(8, 0, true),
            Err(Error::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            matrix.get_led(0, 16),
            Err(Error::OutOfRange { row: 0, col: 16 })
        );
        assert_eq!(matrix.get_led(7, 15), Ok(false));
    }

    #[test]
    fn test_rejected_write_leaves_frame_clean() {
        let mut matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 2, 2).unwrap();
        // Would wrap into display 2 on the unchecked path
        assert!(matrix.set_led(0, 16, true).is_err());
        assert!(matrix.draw().is_empty());
    }

    #[test]
    fn test_second_display_addressing() {
        let matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 1, 2).unwrap();
        matrix.set_led(0, 9, true).unwrap();
        assert_eq!(matrix.get_led(0, 9), Ok(true));

        let inner = matrix.into_inner();
        assert_eq!(inner.grid().display(1), Some(1 << 1));
    }

    #[test]
    fn test_reset_then_draw_is_empty() {
        let mut matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 1, 4).unwrap();
        matrix.set_led(3, 30, true).unwrap();
        assert!(!matrix.reset().is_empty());
        assert!(matrix.draw().is_empty());
        assert_eq!(matrix.get_led(3, 30), Ok(false));
    }

    #[test]
    fn test_execute_length_checked() {
        let mut matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 1, 2).unwrap();
        assert_eq!(
            matrix.execute(&[RegisterWrite::NO_OP]),
            Err(Error::InvalidBatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_line_clipped_to_surface() {
        let mut matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 1, 1).unwrap();
        // Would fail with OutOfRange if the line were not clipped
        matrix.line(-3, -3, 10, 10, true).unwrap();
        for i in 0..8 {
            assert_eq!(matrix.get_led(i, i), Ok(true));
        }
        assert_eq!(matrix.get_led(0, 1), Ok(false));
    }

    #[test]
    fn test_shared_between_threads() {
        let matrix: Arc<CheckedLedMatrix> = Arc::new(CheckedLedMatrix::new(8, 8, 1, 4).unwrap());

        let handles: std::vec::Vec<_> = (0..4)
            .map(|display| {
                let matrix = Arc::clone(&matrix);
                thread::spawn(move || {
                    for row in 0..8 {
                        matrix.set_led(row, display * 8 + row, true).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut matrix = Arc::into_inner(matrix).unwrap();
        for display in 0..4 {
            for row in 0..8 {
                assert_eq!(matrix.get_led(row, display * 8 + row), Ok(true));
            }
        }
        assert!(!matrix.draw().is_empty());
    }

    proptest! {
        #[test]
        fn prop_read_after_write(row in 0usize..16, col in 0usize..24, on in any::<bool>()) {
            let matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 2, 3).unwrap();
            prop_assert_eq!(matrix.set_led(row, col, on), Ok(()));
            prop_assert_eq!(matrix.get_led(row, col), Ok(on));
        }

        #[test]
        fn prop_out_of_range_always_rejected(row in 16usize..64, col in 0usize..64) {
            let matrix = CheckedLedMatrix::<NoopRawMutex>::new(8, 8, 2, 3).unwrap();
            prop_assert_eq!(matrix.set_led(row, col, true), Err(Error::OutOfRange { row, col }));
            prop_assert!(matrix.get_led(row, col).is_err());
        }
    }
}
