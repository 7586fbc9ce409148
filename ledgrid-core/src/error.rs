//! Errors reported by the matrix encoder

use core::fmt;

/// Matrix encoder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Row/column counts outside 1..=8 or zero displays in a direction
    InvalidGeometry,
    /// Batch length does not match the number of displays
    InvalidBatch {
        /// Number of displays in the cascade
        expected: usize,
        /// Number of writes supplied
        actual: usize,
    },
    /// Coordinate outside the matrix
    OutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
    },
    /// Operation has no defined register mapping
    Unsupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry => f.write_str("invalid matrix geometry"),
            Error::InvalidBatch { expected, actual } => {
                write!(f, "batch has {actual} writes, cascade has {expected} displays")
            }
            Error::OutOfRange { row, col } => write!(f, "led ({row}, {col}) is outside the matrix"),
            Error::Unsupported => f.write_str("operation not supported"),
        }
    }
}

impl core::error::Error for Error {}
