//! Recording executor
//!
//! Stores replayed events in a fixed-capacity buffer and tracks the level
//! of each line. Used for host tests and for capturing a sequence to replay
//! later.

use heapless::Vec;
use ledgrid_protocol::{Line, PinEvent};

use super::PinExecutor;

/// Recording errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Buffer full; the event was not recorded
    Full,
}

/// Executor that records up to `N` events
#[derive(Debug, Clone)]
pub struct RecordingExecutor<const N: usize> {
    events: Vec<PinEvent, N>,
    chip_select: bool,
    clock: bool,
    data: bool,
}

impl<const N: usize> RecordingExecutor<N> {
    /// Empty recorder with the idle bus levels
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            chip_select: true,
            clock: false,
            data: false,
        }
    }

    /// Recorded events in replay order
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Current level of a line
    pub fn level(&self, line: Line) -> bool {
        match line {
            Line::ChipSelect => self.chip_select,
            Line::Clock => self.clock,
            Line::Data => self.data,
        }
    }

    /// Number of times an event was recorded
    pub fn count(&self, event: PinEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    /// Drop recorded events, keeping line levels
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<const N: usize> Default for RecordingExecutor<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PinExecutor for RecordingExecutor<N> {
    type Error = RecordError;

    fn apply(&mut self, event: PinEvent) -> Result<(), RecordError> {
        self.events.push(event).map_err(|_| RecordError::Full)?;
        let level = event.is_high();
        match event.line() {
            Line::ChipSelect => self.chip_select = level,
            Line::Clock => self.clock = level,
            Line::Data => self.data = level,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgrid_protocol::serialize;

    #[test]
    fn test_idle_levels() {
        let rec = RecordingExecutor::<4>::new();
        assert!(rec.level(Line::ChipSelect));
        assert!(!rec.level(Line::Clock));
        assert!(!rec.level(Line::Data));
        assert!(rec.events().is_empty());
    }

    #[test]
    fn test_records_transmission() {
        let mut rec = RecordingExecutor::<64>::new();
        rec.execute_iter(serialize(&[0x0101])).unwrap();

        assert_eq!(rec.events().first(), Some(&PinEvent::ChipSelectLow));
        assert_eq!(rec.events().last(), Some(&PinEvent::ChipSelectHigh));
        assert_eq!(rec.count(PinEvent::ClockHigh), 16);
        assert_eq!(rec.count(PinEvent::DataHigh), 2);
        assert_eq!(rec.count(PinEvent::DataLow), 2);

        // Last bit of 0x0101 is 1
        assert!(rec.level(Line::Data));
        assert!(rec.level(Line::ChipSelect));
        assert!(!rec.level(Line::Clock));
    }

    #[test]
    fn test_full_buffer() {
        let mut rec = RecordingExecutor::<2>::new();
        let result = rec.execute(&[
            PinEvent::ChipSelectLow,
            PinEvent::DataHigh,
            PinEvent::ClockHigh,
        ]);

        assert_eq!(result, Err(RecordError::Full));
        assert_eq!(rec.events().len(), 2);
        // Rejected event has no effect on levels
        assert!(!rec.level(Line::Clock));
    }

    #[test]
    fn test_clear_keeps_levels() {
        let mut rec = RecordingExecutor::<4>::new();
        rec.apply(PinEvent::ChipSelectLow).unwrap();
        rec.clear();

        assert!(rec.events().is_empty());
        assert!(!rec.level(Line::ChipSelect));
    }
}
