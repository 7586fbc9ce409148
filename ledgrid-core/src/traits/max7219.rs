//! Bus-level operations shared by every MAX7219 front end

use alloc::vec::Vec;

use ledgrid_protocol::{PinEvent, RegisterWrite};

use crate::error::Error;

/// Ordered pin events to hand to a pin executor
pub type PinEvents = Vec<PinEvent>;

/// Trait for MAX7219 cascades
///
/// Every operation returns the pin sequence to replay, in order; nothing
/// touches hardware here. Implementations are stateful and not meant to
/// be shared between threads.
pub trait Max7219 {
    /// Number of chips in the cascade
    fn display_count(&self) -> usize;

    /// Initialize every chip and clear the display
    fn reset(&mut self) -> Result<PinEvents, Error>;

    /// Send one write per chip, in display order
    fn execute(&mut self, batch: &[RegisterWrite]) -> Result<PinEvents, Error>;

    /// Send the same write to every chip
    fn execute_all(&mut self, write: RegisterWrite) -> Result<PinEvents, Error>;

    /// Send every row that changed since the previous draw
    fn draw(&mut self) -> Result<PinEvents, Error>;
}
