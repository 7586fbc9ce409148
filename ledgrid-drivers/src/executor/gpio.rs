//! GPIO bit-bang executor
//!
//! Drives the three MAX7219 bus lines directly from GPIO pins. Any
//! `embedded-hal` output pin works; the three pins must share an error
//! type.

use embedded_hal::digital::OutputPin;
use ledgrid_protocol::PinEvent;

use super::PinExecutor;

/// Bit-bang executor over three output pins
pub struct GpioExecutor<CS, CLK, DIN> {
    /// LOAD/CS
    cs: CS,
    /// CLK
    clk: CLK,
    /// DIN
    din: DIN,
}

impl<CS, CLK, DIN> GpioExecutor<CS, CLK, DIN>
where
    CS: OutputPin,
    CLK: OutputPin<Error = CS::Error>,
    DIN: OutputPin<Error = CS::Error>,
{
    /// Create an executor; pin levels are left untouched
    pub fn new(cs: CS, clk: CLK, din: DIN) -> Self {
        Self { cs, clk, din }
    }

    /// Drive the idle bus state: LOAD/CS high, CLK low
    pub fn idle(&mut self) -> Result<(), CS::Error> {
        self.cs.set_high()?;
        self.clk.set_low()
    }

    /// Release the pins
    pub fn release(self) -> (CS, CLK, DIN) {
        (self.cs, self.clk, self.din)
    }
}

impl<CS, CLK, DIN> PinExecutor for GpioExecutor<CS, CLK, DIN>
where
    CS: OutputPin,
    CLK: OutputPin<Error = CS::Error>,
    DIN: OutputPin<Error = CS::Error>,
{
    type Error = CS::Error;

    fn apply(&mut self, event: PinEvent) -> Result<(), Self::Error> {
        match event {
            PinEvent::ChipSelectHigh => self.cs.set_high(),
            PinEvent::ChipSelectLow => self.cs.set_low(),
            PinEvent::ClockHigh => self.clk.set_high(),
            PinEvent::ClockLow => self.clk.set_low(),
            PinEvent::DataHigh => self.din.set_high(),
            PinEvent::DataLow => self.din.set_low(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error as PinError, ErrorKind, ErrorType};
    use ledgrid_protocol::{serialize, Line};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    type Trace = Rc<RefCell<Vec<PinEvent>>>;

    /// Mock GPIO pin recording every level change on a shared trace
    struct MockPin {
        line: Line,
        trace: Trace,
    }

    impl MockPin {
        fn new(line: Line, trace: &Trace) -> Self {
            Self {
                line,
                trace: Rc::clone(trace),
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.trace.borrow_mut().push(PinEvent::new(self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.trace.borrow_mut().push(PinEvent::new(self.line, true));
            Ok(())
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Broken;

    impl PinError for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin that fails after a number of successful writes
    struct FlakyPin {
        remaining: usize,
    }

    impl ErrorType for FlakyPin {
        type Error = Broken;
    }

    impl OutputPin for FlakyPin {
        fn set_low(&mut self) -> Result<(), Broken> {
            self.set_high()
        }

        fn set_high(&mut self) -> Result<(), Broken> {
            if self.remaining == 0 {
                return Err(Broken);
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    fn executor(trace: &Trace) -> GpioExecutor<MockPin, MockPin, MockPin> {
        GpioExecutor::new(
            MockPin::new(Line::ChipSelect, trace),
            MockPin::new(Line::Clock, trace),
            MockPin::new(Line::Data, trace),
        )
    }

    #[test]
    fn test_replays_in_order() {
        let trace = Trace::default();
        let mut gpio = executor(&trace);

        let events: Vec<PinEvent> = serialize(&[0x0C01, 0x0A0F]).collect();
        gpio.execute(&events).unwrap();

        assert_eq!(*trace.borrow(), events);
    }

    #[test]
    fn test_execute_iter_from_serializer() {
        let trace = Trace::default();
        let mut gpio = executor(&trace);

        gpio.execute_iter(serialize(&[0x0101])).unwrap();
        assert!(trace.borrow().iter().copied().eq(serialize(&[0x0101])));
    }

    #[test]
    fn test_idle_levels() {
        let trace = Trace::default();
        let mut gpio = executor(&trace);
        gpio.idle().unwrap();
        assert_eq!(
            trace.borrow().as_slice(),
            &[PinEvent::ChipSelectHigh, PinEvent::ClockLow]
        );
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut gpio = GpioExecutor::new(
            FlakyPin { remaining: 1 },
            FlakyPin { remaining: usize::MAX },
            FlakyPin { remaining: usize::MAX },
        );

        // CS low succeeds, CS high fails
        let result = gpio.execute(&[
            PinEvent::ChipSelectLow,
            PinEvent::ClockHigh,
            PinEvent::ChipSelectHigh,
            PinEvent::ClockLow,
        ]);
        assert_eq!(result, Err(Broken));

        let (_, clk, _) = gpio.release();
        assert_eq!(clk.remaining, usize::MAX - 1);
    }
}
