//! Pin executors
//!
//! A pin executor replays the sequences produced by the encoder, in order
//! and synchronously. Bus timing is the executor's concern; the encoder
//! assumes nothing beyond strict ordering.
//!
//! - [`GpioExecutor`]: bit-bangs LOAD/CS, CLK and DIN on three GPIOs
//! - [`RecordingExecutor`]: captures events into a fixed buffer
//! - [`CascadeSimulator`]: models the chips' shift registers on the host

pub mod gpio;
pub mod recording;
pub mod simulator;

pub use gpio::GpioExecutor;
pub use recording::{RecordError, RecordingExecutor};
pub use simulator::{CascadeSimulator, SimError};

use ledgrid_protocol::PinEvent;

/// Trait for anything that can replay pin events
pub trait PinExecutor {
    /// Error type for a failed level change
    type Error;

    /// Apply a single event
    fn apply(&mut self, event: PinEvent) -> Result<(), Self::Error>;

    /// Replay a sequence in order, stopping at the first error
    fn execute(&mut self, events: &[PinEvent]) -> Result<(), Self::Error> {
        self.execute_iter(events.iter().copied())
    }

    /// Replay events straight from an iterator, e.g. a `Serializer`
    fn execute_iter<I>(&mut self, events: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = PinEvent>,
    {
        for event in events {
            self.apply(event)?;
        }
        Ok(())
    }
}
