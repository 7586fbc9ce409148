//! Display grid and row diff engine
//!
//! A matrix is a rectangle of `vertical_count × horizontal_count` chips,
//! each driving a `display_rows × display_columns` block of LEDs. Chip
//! state is one `u64` per display, row-major, row 0 in the low bits:
//!
//! ```text
//! bit = (row % display_rows) * display_columns + (col % display_columns)
//! display = (row / display_rows) * horizontal_count + (col / display_columns)
//! ```
//!
//! The grid keeps a snapshot of what was last transmitted. A draw only
//! sends rows whose bits differ from that snapshot.

use alloc::vec;
use alloc::vec::Vec;

use ledgrid_protocol::RegisterWrite;

use crate::error::Error;

/// Maximum rows per chip (digit registers)
pub const MAX_DISPLAY_ROWS: usize = 8;

/// Maximum columns per chip (segment lines)
pub const MAX_DISPLAY_COLUMNS: usize = 8;

/// Maximum chips in one matrix
///
/// Far beyond any real cascade; keeps the bitmap allocation bounded.
pub const MAX_DISPLAY_COUNT: usize = 1 << 16;

/// Snapshot value that makes every cleared row look changed
const ALL_CHANGED: u64 = u64::MAX;

/// Changed-row writes for one display, in row order
pub type RowWrites = heapless::Vec<RegisterWrite, MAX_DISPLAY_ROWS>;

/// Matrix geometry
///
/// Always valid once constructed: per-chip dimensions are 1-8 and both
/// display counts are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    display_rows: usize,
    display_columns: usize,
    vertical_count: usize,
    horizontal_count: usize,
}

impl Geometry {
    /// Validate and create a geometry
    ///
    /// # Arguments
    /// - `display_rows`: LED rows per chip (1-8)
    /// - `display_columns`: LED columns per chip (1-8)
    /// - `vertical_count`: chips stacked vertically
    /// - `horizontal_count`: chips side by side
    pub fn new(
        display_rows: usize,
        display_columns: usize,
        vertical_count: usize,
        horizontal_count: usize,
    ) -> Result<Self, Error> {
        if !(1..=MAX_DISPLAY_ROWS).contains(&display_rows)
            || !(1..=MAX_DISPLAY_COLUMNS).contains(&display_columns)
            || vertical_count == 0
            || horizontal_count == 0
        {
            return Err(Error::InvalidGeometry);
        }

        // Totals must be representable and the cascade bounded
        let display_count = vertical_count
            .checked_mul(horizontal_count)
            .ok_or(Error::InvalidGeometry)?;
        if display_count > MAX_DISPLAY_COUNT {
            return Err(Error::InvalidGeometry);
        }
        display_rows
            .checked_mul(vertical_count)
            .ok_or(Error::InvalidGeometry)?;
        display_columns
            .checked_mul(horizontal_count)
            .ok_or(Error::InvalidGeometry)?;

        Ok(Self {
            display_rows,
            display_columns,
            vertical_count,
            horizontal_count,
        })
    }

    /// LED rows per chip
    pub const fn display_rows(&self) -> usize {
        self.display_rows
    }

    /// LED columns per chip
    pub const fn display_columns(&self) -> usize {
        self.display_columns
    }

    /// Chips stacked vertically
    pub const fn vertical_count(&self) -> usize {
        self.vertical_count
    }

    /// Chips side by side
    pub const fn horizontal_count(&self) -> usize {
        self.horizontal_count
    }

    /// Number of chips in the cascade
    pub const fn display_count(&self) -> usize {
        self.vertical_count * self.horizontal_count
    }

    /// Total LED rows
    pub const fn rows(&self) -> usize {
        self.display_rows * self.vertical_count
    }

    /// Total LED columns
    pub const fn columns(&self) -> usize {
        self.display_columns * self.horizontal_count
    }

    /// Returns true if `(row, col)` lies inside the matrix
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.columns()
    }

    /// Mask selecting one row of a chip bitmap
    const fn row_mask(&self) -> u64 {
        0xFF >> (MAX_DISPLAY_COLUMNS - self.display_columns)
    }

    /// Display index of a block
    pub const fn display_index(&self, block_row: usize, block_col: usize) -> usize {
        block_row * self.horizontal_count + block_col
    }

    /// Map a coordinate to `(display index, bit position)`
    ///
    /// Columns past the right edge wrap into the next block row, like the
    /// addressing arithmetic implies. Returns `None` when the resulting
    /// display index is past the last chip.
    pub fn locate(&self, row: usize, col: usize) -> Option<(usize, u32)> {
        let index = (row / self.display_rows)
            .checked_mul(self.horizontal_count)?
            .checked_add(col / self.display_columns)?;
        if index >= self.display_count() {
            return None;
        }
        let bit = (row % self.display_rows) * self.display_columns + (col % self.display_columns);
        Some((index, bit as u32))
    }
}

/// Bitmap state for every chip plus the last transmitted snapshot
#[derive(Debug, Clone)]
pub struct DisplayGrid {
    geometry: Geometry,
    displays: Vec<u64>,
    previous: Vec<u64>,
    /// Set by any cell write, cleared by `commit`
    dirty: bool,
}

impl DisplayGrid {
    /// Create an all-off grid whose snapshot matches its state
    pub fn new(geometry: Geometry) -> Self {
        let count = geometry.display_count();
        Self {
            geometry,
            displays: vec![0; count],
            previous: vec![0; count],
            dirty: false,
        }
    }

    /// Grid geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Number of chips
    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    /// Current bitmap of one chip
    pub fn display(&self, index: usize) -> Option<u64> {
        self.displays.get(index).copied()
    }

    /// Read one LED
    ///
    /// Unchecked: coordinates wrap per [`Geometry::locate`], and anything
    /// past the last chip reads as off.
    pub fn get_led(&self, row: usize, col: usize) -> bool {
        self.geometry
            .locate(row, col)
            .and_then(|(index, bit)| self.displays.get(index).map(|d| (d >> bit) & 1 == 1))
            .unwrap_or(false)
    }

    /// Write one LED
    ///
    /// Writes past the last chip are ignored.
    pub fn set_led(&mut self, row: usize, col: usize, on: bool) {
        let Some((index, bit)) = self.geometry.locate(row, col) else {
            return;
        };
        if let Some(display) = self.displays.get_mut(index) {
            if on {
                *display |= 1 << bit;
            } else {
                *display &= !(1 << bit);
            }
            self.dirty = true;
        }
    }

    /// Turn every LED off
    pub fn clear(&mut self) {
        self.displays.fill(0);
        self.dirty = true;
    }

    /// Forget the transmitted snapshot so every cleared row is resent
    pub fn invalidate(&mut self) {
        self.previous.fill(ALL_CHANGED);
        self.dirty = true;
    }

    /// Check if any cell changed since the last commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Digit writes for the rows of one chip that differ from its snapshot
    fn row_writes(&self, current: u64, previous: u64) -> RowWrites {
        let mut writes = RowWrites::new();
        let diff = current ^ previous;
        if diff == 0 {
            return writes;
        }

        let mask = self.geometry.row_mask();
        let columns = self.geometry.display_columns;
        for row in 0..self.geometry.display_rows {
            let shift = row * columns;
            if (diff >> shift) & mask == 0 {
                continue;
            }
            let data = ((current >> shift) & mask) as u8;
            let Some(write) = RegisterWrite::digit(row, data) else {
                break;
            };
            // Capacity equals MAX_DISPLAY_ROWS and display_rows <= MAX_DISPLAY_ROWS
            if writes.push(write).is_err() {
                break;
            }
        }
        writes
    }

    /// Compute the writes needed to bring every chip up to date
    pub fn plan(&self) -> DrawPlan {
        let rows: Vec<RowWrites> = self
            .displays
            .iter()
            .zip(&self.previous)
            .map(|(current, previous)| self.row_writes(*current, *previous))
            .collect();
        let step_count = rows.iter().map(|w| w.len()).max().unwrap_or(0);
        DrawPlan { rows, step_count }
    }

    /// Record the current state as transmitted
    pub fn commit(&mut self) {
        self.previous.copy_from_slice(&self.displays);
        self.dirty = false;
    }
}

/// Per-chip changed-row writes, arranged into transmission steps
///
/// Step `s` carries the `s`-th changed row of every chip, padded with
/// no-ops for chips that have fewer changes.
#[derive(Debug, Clone)]
pub struct DrawPlan {
    rows: Vec<RowWrites>,
    step_count: usize,
}

impl DrawPlan {
    /// Number of transmissions needed
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns true if nothing needs sending
    pub fn is_empty(&self) -> bool {
        self.step_count == 0
    }

    /// Changed-row writes of one chip
    pub fn display_writes(&self, display: usize) -> &[RegisterWrite] {
        self.rows.get(display).map_or(&[], |w| w.as_slice())
    }

    /// The batch for one step, one write per chip in display order
    pub fn step(&self, step: usize) -> impl Iterator<Item = RegisterWrite> + '_ {
        self.rows
            .iter()
            .map(move |writes| writes.get(step).copied().unwrap_or(RegisterWrite::NO_OP))
    }
}
