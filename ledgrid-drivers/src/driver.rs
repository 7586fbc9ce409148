//! Matrix driver
//!
//! Pairs a MAX7219 front end with a pin executor so callers can draw
//! without handling pin sequences themselves.

use ledgrid_core::{Error, LedSurface, Max7219, RegisterWrite};

use crate::executor::PinExecutor;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// The front end rejected the operation
    Matrix(Error),
    /// The executor failed while replaying
    Pin(E),
}

impl<E> From<Error> for DriverError<E> {
    fn from(e: Error) -> Self {
        DriverError::Matrix(e)
    }
}

/// A front end plus the executor that replays its output
pub struct MatrixDriver<D, X> {
    matrix: D,
    executor: X,
}

impl<D, X> MatrixDriver<D, X>
where
    D: Max7219,
    X: PinExecutor,
{
    /// Create a driver; nothing is sent until [`Self::reset`]
    pub fn new(matrix: D, executor: X) -> Self {
        Self { matrix, executor }
    }

    /// Program every chip and clear the display
    pub fn reset(&mut self) -> Result<(), DriverError<X::Error>> {
        let events = self.matrix.reset()?;
        self.executor.execute(&events).map_err(DriverError::Pin)
    }

    /// Send pending LED changes
    pub fn draw(&mut self) -> Result<(), DriverError<X::Error>> {
        let events = self.matrix.draw()?;
        self.executor.execute(&events).map_err(DriverError::Pin)
    }

    /// Send one write per chip
    pub fn execute(&mut self, batch: &[RegisterWrite]) -> Result<(), DriverError<X::Error>> {
        let events = self.matrix.execute(batch)?;
        self.executor.execute(&events).map_err(DriverError::Pin)
    }

    /// Send the same write to every chip
    pub fn execute_all(&mut self, write: RegisterWrite) -> Result<(), DriverError<X::Error>> {
        let events = self.matrix.execute_all(write)?;
        self.executor.execute(&events).map_err(DriverError::Pin)
    }

    /// Front end
    pub fn matrix(&self) -> &D {
        &self.matrix
    }

    /// Mutable front end, for drawing
    pub fn matrix_mut(&mut self) -> &mut D {
        &mut self.matrix
    }

    /// Executor
    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Split into front end and executor
    pub fn release(self) -> (D, X) {
        (self.matrix, self.executor)
    }
}

impl<D, X> MatrixDriver<D, X>
where
    D: Max7219 + LedSurface,
    X: PinExecutor,
{
    /// Set one LED and send the change immediately
    pub fn set_led_now(
        &mut self,
        row: usize,
        col: usize,
        on: bool,
    ) -> Result<(), DriverError<X::Error>> {
        self.matrix.set_led(row, col, on)?;
        self.draw()
    }
}
