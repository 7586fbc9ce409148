//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ledgrid_protocol::RegisterWrite;

use crate::error::Error;
use crate::grid::Geometry;
use crate::matrix::LedMatrix;

/// Matrix wiring and startup settings
///
/// Raw values as read from a config source; [`MatrixConfig::geometry`]
/// validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatrixConfig {
    /// LED rows per chip (1-8)
    pub display_rows: u8,
    /// LED columns per chip (1-8)
    pub display_columns: u8,
    /// Chips stacked vertically
    pub vertical_count: u16,
    /// Chips side by side
    pub horizontal_count: u16,
    /// Brightness applied after reset (0-15)
    pub intensity: u8,
}

impl Default for MatrixConfig {
    /// A strip of four 8x8 modules
    fn default() -> Self {
        Self {
            display_rows: 8,
            display_columns: 8,
            vertical_count: 1,
            horizontal_count: 4,
            intensity: 0,
        }
    }
}

impl MatrixConfig {
    /// Validate the geometry
    pub fn geometry(&self) -> Result<Geometry, Error> {
        Geometry::new(
            usize::from(self.display_rows),
            usize::from(self.display_columns),
            usize::from(self.vertical_count),
            usize::from(self.horizontal_count),
        )
    }

    /// Build an unchecked matrix with this geometry
    pub fn build(&self) -> Result<LedMatrix, Error> {
        self.geometry().map(LedMatrix::with_geometry)
    }

    /// Intensity write to send to every chip once reset is done
    pub fn intensity_write(&self) -> RegisterWrite {
        RegisterWrite::intensity(self.intensity)
    }
}
