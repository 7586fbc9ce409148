//! Unchecked LED matrix front end
//!
//! [`LedMatrix`] ties the display grid to the serializer. It is the fast
//! path: coordinates are not validated and nothing is synchronized.

use alloc::vec::Vec;

use ledgrid_protocol::{
    serialize_into, serialized_len_bound, DecodeMode, DisplayTest, PinEvent, RegisterAddress,
    RegisterWrite, ScanLimit, Shutdown,
};

use crate::error::Error;
use crate::grid::{DisplayGrid, Geometry};
use crate::traits::{LedSurface, Max7219, PinEvents};

/// Control register writes sent to every chip by `reset`, in order
pub const INIT_SEQUENCE: [RegisterWrite; 5] = [
    RegisterWrite::new(
        RegisterAddress::DisplayTest,
        DisplayTest::NormalOperation as u8,
    ),
    RegisterWrite::new(RegisterAddress::DecodeMode, DecodeMode::NoDecode as u8),
    RegisterWrite::new(RegisterAddress::ScanLimit, ScanLimit::Digits0to7 as u8),
    RegisterWrite::intensity(0),
    RegisterWrite::new(
        RegisterAddress::Shutdown,
        Shutdown::NormalOperation as u8,
    ),
];

/// LED matrix driven by a cascade of MAX7219 chips
///
/// Stateful and single-threaded. For validated coordinates and shared
/// access use [`CheckedLedMatrix`](crate::checked::CheckedLedMatrix).
#[derive(Debug, Clone)]
pub struct LedMatrix {
    grid: DisplayGrid,
}

impl LedMatrix {
    /// Create a matrix of `vertical_count × horizontal_count` chips
    ///
    /// For a row of four 8x8 modules use `LedMatrix::new(8, 8, 1, 4)`.
    pub fn new(
        display_rows: usize,
        display_columns: usize,
        vertical_count: usize,
        horizontal_count: usize,
    ) -> Result<Self, Error> {
        let geometry = Geometry::new(
            display_rows,
            display_columns,
            vertical_count,
            horizontal_count,
        )?;
        Ok(Self::with_geometry(geometry))
    }

    /// Create a matrix from a validated geometry
    pub fn with_geometry(geometry: Geometry) -> Self {
        Self {
            grid: DisplayGrid::new(geometry),
        }
    }

    /// Matrix geometry
    pub fn geometry(&self) -> &Geometry {
        self.grid.geometry()
    }

    /// Underlying grid state
    pub fn grid(&self) -> &DisplayGrid {
        &self.grid
    }

    /// Number of chips in the cascade
    pub fn display_count(&self) -> usize {
        self.grid.display_count()
    }

    /// Read one LED (unchecked, see [`DisplayGrid::get_led`])
    pub fn get_led(&self, row: usize, col: usize) -> bool {
        self.grid.get_led(row, col)
    }

    /// Write one LED (unchecked, see [`DisplayGrid::set_led`])
    pub fn set_led(&mut self, row: usize, col: usize, on: bool) {
        self.grid.set_led(row, col, on);
    }

    /// Initialize every chip and blank the matrix
    ///
    /// Sends [`INIT_SEQUENCE`] to all chips, then clears the bitmap and
    /// resends every row.
    pub fn reset(&mut self) -> Vec<PinEvent> {
        let count = self.display_count();
        let mut events = Vec::with_capacity(serialized_len_bound(count) * INIT_SEQUENCE.len());

        #[cfg(feature = "defmt")]
        defmt::debug!("reset: {} displays", count);

        for write in INIT_SEQUENCE {
            self.push_all(write, &mut events);
        }

        self.grid.clear();
        self.grid.invalidate();
        events.extend(self.draw());
        events
    }

    /// Send one explicit write per chip, bypassing the diff engine
    ///
    /// `batch[i]` goes to display `i`. Fails without side effects if the
    /// batch length differs from the display count.
    pub fn execute(&mut self, batch: &[RegisterWrite]) -> Result<Vec<PinEvent>, Error> {
        let expected = self.display_count();
        if batch.len() != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "rejected batch of {} writes for {} displays",
                batch.len(),
                expected
            );
            return Err(Error::InvalidBatch {
                expected,
                actual: batch.len(),
            });
        }

        let packets: Vec<u16> = batch.iter().map(|w| w.to_packet()).collect();
        let mut events = Vec::with_capacity(serialized_len_bound(packets.len()));
        serialize_into(&packets, &mut events);
        Ok(events)
    }

    /// Send the same write to every chip
    pub fn execute_all(&mut self, write: RegisterWrite) -> Vec<PinEvent> {
        let mut events = Vec::with_capacity(serialized_len_bound(self.display_count()));
        self.push_all(write, &mut events);
        events
    }

    /// Set the brightness of every chip (0-15)
    pub fn set_intensity(&mut self, duty: u8) -> Vec<PinEvent> {
        self.execute_all(RegisterWrite::intensity(duty))
    }

    /// Put every chip into or out of shutdown; bitmaps are kept
    pub fn set_shutdown(&mut self, shutdown: bool) -> Vec<PinEvent> {
        let mode = if shutdown {
            Shutdown::Shutdown
        } else {
            Shutdown::NormalOperation
        };
        self.execute_all(mode.into())
    }

    /// Send every row that changed since the previous draw
    ///
    /// Returns an empty sequence when nothing changed. Each step sends the
    /// next changed row of every chip, padding with no-ops.
    pub fn draw(&mut self) -> Vec<PinEvent> {
        if !self.grid.is_dirty() {
            return Vec::new();
        }

        let plan = self.grid.plan();
        let count = self.display_count();

        #[cfg(feature = "defmt")]
        defmt::trace!("draw: {} steps", plan.step_count());

        let mut packets: Vec<u16> = Vec::with_capacity(count);
        let mut events = Vec::with_capacity(serialized_len_bound(count) * plan.step_count());
        for step in 0..plan.step_count() {
            packets.clear();
            packets.extend(plan.step(step).map(|w| w.to_packet()));
            serialize_into(&packets, &mut events);
        }

        self.grid.commit();
        events
    }

    fn push_all(&self, write: RegisterWrite, events: &mut Vec<PinEvent>) {
        let packet = write.to_packet();
        let packets: Vec<u16> = core::iter::repeat(packet)
            .take(self.display_count())
            .collect();
        serialize_into(&packets, events);
    }
}

impl LedSurface for LedMatrix {
    fn rows(&self) -> usize {
        self.geometry().rows()
    }

    fn columns(&self) -> usize {
        self.geometry().columns()
    }

    fn get_led(&self, row: usize, col: usize) -> Result<bool, Error> {
        Ok(LedMatrix::get_led(self, row, col))
    }

    fn set_led(&mut self, row: usize, col: usize, on: bool) -> Result<(), Error> {
        LedMatrix::set_led(self, row, col, on);
        Ok(())
    }
}

impl Max7219 for LedMatrix {
    fn display_count(&self) -> usize {
        LedMatrix::display_count(self)
    }

    fn reset(&mut self) -> Result<PinEvents, Error> {
        Ok(LedMatrix::reset(self))
    }

    fn execute(&mut self, batch: &[RegisterWrite]) -> Result<PinEvents, Error> {
        LedMatrix::execute(self, batch)
    }

    fn execute_all(&mut self, write: RegisterWrite) -> Result<PinEvents, Error> {
        Ok(LedMatrix::execute_all(self, write))
    }

    fn draw(&mut self) -> Result<PinEvents, Error> {
        Ok(LedMatrix::draw(self))
    }
}
