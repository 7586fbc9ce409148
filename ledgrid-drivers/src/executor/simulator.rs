//! Host-side model of a MAX7219 cascade
//!
//! Every chip is a 16-bit shift register whose MSB feeds the next chip's
//! input. CLK rising edges shift DIN into chip 0; a LOAD/CS rising edge
//! latches each chip's word into its register file.

use ledgrid_protocol::{PinEvent, RegisterAddress, RegisterWrite, DIGIT_COUNT, PACKET_BITS};

use super::PinExecutor;

/// Register file size, one slot per 4-bit address
const REGISTER_SLOTS: usize = 16;

/// Simulator errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// LOAD/CS rose after a frame that did not fill the whole cascade
    Frame {
        /// Bits clocked since LOAD/CS went low
        bits: usize,
    },
}

impl core::fmt::Display for SimError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SimError::Frame { bits } => write!(f, "latched a {} bit frame", bits),
        }
    }
}

/// `N` chained chips, chip 0 nearest to the host
#[derive(Debug, Clone)]
pub struct CascadeSimulator<const N: usize> {
    shift: [u16; N],
    registers: [[u8; REGISTER_SLOTS]; N],
    selected: bool,
    clock_high: bool,
    data_high: bool,
    bits: usize,
    latches: usize,
}

impl<const N: usize> CascadeSimulator<N> {
    /// Power-on state: every register zero, LOAD/CS high, CLK and DIN low
    pub const fn new() -> Self {
        Self {
            shift: [0; N],
            registers: [[0; REGISTER_SLOTS]; N],
            selected: false,
            clock_high: false,
            data_high: false,
            bits: 0,
            latches: 0,
        }
    }

    /// Latched value of a register
    pub fn register(&self, display: usize, address: RegisterAddress) -> Option<u8> {
        self.registers
            .get(display)
            .map(|file| file[address.value() as usize])
    }

    /// Latched digit registers of one chip, row 0 first
    pub fn digits(&self, display: usize) -> Option<[u8; DIGIT_COUNT]> {
        let file = self.registers.get(display)?;
        let mut rows = [0; DIGIT_COUNT];
        for (row, address) in RegisterAddress::DIGITS.iter().enumerate() {
            rows[row] = file[address.value() as usize];
        }
        Some(rows)
    }

    /// Current shift register contents of one chip
    pub fn shift_register(&self, display: usize) -> Option<u16> {
        self.shift.get(display).copied()
    }

    /// Number of successful latches
    pub fn latch_count(&self) -> usize {
        self.latches
    }

    /// Returns true while LOAD/CS is low
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    fn clock_in(&mut self) {
        let mut carry = self.data_high;
        for word in self.shift.iter_mut() {
            let out = *word & 0x8000 != 0;
            *word = (*word << 1) | u16::from(carry);
            carry = out;
        }
        self.bits += 1;
    }

    fn latch(&mut self) -> Result<(), SimError> {
        if self.bits != N * PACKET_BITS as usize {
            return Err(SimError::Frame { bits: self.bits });
        }
        for (word, file) in self.shift.iter().zip(self.registers.iter_mut()) {
            match RegisterWrite::from_packet(*word) {
                Some(write) if !write.is_no_op() => {
                    file[write.address.value() as usize] = write.data;
                }
                _ => {}
            }
        }
        self.latches += 1;
        Ok(())
    }
}

impl<const N: usize> Default for CascadeSimulator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PinExecutor for CascadeSimulator<N> {
    type Error = SimError;

    fn apply(&mut self, event: PinEvent) -> Result<(), SimError> {
        match event {
            PinEvent::ChipSelectLow => {
                if !self.selected {
                    self.selected = true;
                    self.bits = 0;
                }
            }
            PinEvent::ChipSelectHigh => {
                if self.selected {
                    self.selected = false;
                    return self.latch();
                }
            }
            PinEvent::ClockHigh => {
                if !self.clock_high {
                    self.clock_high = true;
                    self.clock_in();
                }
            }
            PinEvent::ClockLow => self.clock_high = false,
            PinEvent::DataHigh => self.data_high = true,
            PinEvent::DataLow => self.data_high = false,
        }
        Ok(())
    }
}
