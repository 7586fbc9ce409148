//! Pin events for the MAX7219 three-wire bus
//!
//! The bus has three lines driven by the host: LOAD/CS, CLK and DIN.
//! A [`PinEvent`] is one level change on one of those lines and is the
//! atomic unit handed to a pin executor.

/// One of the three host-driven bus lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// LOAD/CS: rising edge latches the shifted word into every chip
    ChipSelect,
    /// CLK: data is sampled on the rising edge
    Clock,
    /// DIN: serial data input of the first chip in the cascade
    Data,
}

/// A single level change on a bus line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinEvent {
    /// LOAD/CS high (end of transmission, latch)
    ChipSelectHigh,
    /// LOAD/CS low (begin transmission)
    ChipSelectLow,
    /// CLK high
    ClockHigh,
    /// CLK low
    ClockLow,
    /// DIN high
    DataHigh,
    /// DIN low
    DataLow,
}

impl PinEvent {
    /// Build an event from a line and a level
    pub const fn new(line: Line, high: bool) -> Self {
        match (line, high) {
            (Line::ChipSelect, true) => PinEvent::ChipSelectHigh,
            (Line::ChipSelect, false) => PinEvent::ChipSelectLow,
            (Line::Clock, true) => PinEvent::ClockHigh,
            (Line::Clock, false) => PinEvent::ClockLow,
            (Line::Data, true) => PinEvent::DataHigh,
            (Line::Data, false) => PinEvent::DataLow,
        }
    }

    /// Data-line event for the given bit value
    pub const fn data(high: bool) -> Self {
        Self::new(Line::Data, high)
    }

    /// The line this event drives
    pub const fn line(self) -> Line {
        match self {
            PinEvent::ChipSelectHigh | PinEvent::ChipSelectLow => Line::ChipSelect,
            PinEvent::ClockHigh | PinEvent::ClockLow => Line::Clock,
            PinEvent::DataHigh | PinEvent::DataLow => Line::Data,
        }
    }

    /// Returns true if the event drives its line high
    pub const fn is_high(self) -> bool {
        matches!(
            self,
            PinEvent::ChipSelectHigh | PinEvent::ClockHigh | PinEvent::DataHigh
        )
    }
}
