//! MAX7219 register map and command values
//!
//! Serial data format (16 bits, MSB first):
//! ```text
//! ┌─────────┬─────────┬──────────┐
//! │ D15-D12 │ D11-D8  │ D7-D0    │
//! │ ignored │ ADDRESS │ DATA     │
//! └─────────┴─────────┴──────────┘
//! ```

/// Number of digit (row) registers on one chip
pub const DIGIT_COUNT: usize = 8;

/// Highest intensity duty value (4 bits)
pub const MAX_INTENSITY: u8 = 0x0F;

/// Register address map (datasheet table 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RegisterAddress {
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl RegisterAddress {
    /// Digit registers in row order
    pub const DIGITS: [RegisterAddress; DIGIT_COUNT] = [
        RegisterAddress::Digit0,
        RegisterAddress::Digit1,
        RegisterAddress::Digit2,
        RegisterAddress::Digit3,
        RegisterAddress::Digit4,
        RegisterAddress::Digit5,
        RegisterAddress::Digit6,
        RegisterAddress::Digit7,
    ];

    /// 4-bit address value
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Digit register for a row (0-7)
    pub fn digit(row: usize) -> Option<Self> {
        Self::DIGITS.get(row).copied()
    }

    /// Parse an address from its 4-bit value
    pub fn from_value(value: u8) -> Option<Self> {
        match value & 0x0F {
            0x00 => Some(RegisterAddress::NoOp),
            v @ 0x01..=0x08 => Self::digit(usize::from(v - 1)),
            0x09 => Some(RegisterAddress::DecodeMode),
            0x0A => Some(RegisterAddress::Intensity),
            0x0B => Some(RegisterAddress::ScanLimit),
            0x0C => Some(RegisterAddress::Shutdown),
            0x0F => Some(RegisterAddress::DisplayTest),
            _ => None,
        }
    }

    /// Returns true for Digit0..Digit7
    pub fn is_digit(self) -> bool {
        (0x01..=0x08).contains(&self.value())
    }
}

/// Decode-mode register values (datasheet table 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DecodeMode {
    NoDecode = 0x00,
    CodeBFor0 = 0x01,
    CodeBFor3to0 = 0x0F,
    CodeBFor7to0 = 0xFF,
}

/// Scan-limit register values (datasheet table 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ScanLimit {
    Digit0 = 0x00,
    Digits0to1 = 0x01,
    Digits0to2 = 0x02,
    Digits0to3 = 0x03,
    Digits0to4 = 0x04,
    Digits0to5 = 0x05,
    Digits0to6 = 0x06,
    Digits0to7 = 0x07,
}

/// Shutdown register values (datasheet table 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Shutdown {
    Shutdown = 0x00,
    NormalOperation = 0x01,
}

/// Display-test register values (datasheet table 10)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayTest {
    NormalOperation = 0x00,
    TestMode = 0x01,
}

/// One register write destined for a single chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Target register
    pub address: RegisterAddress,
    /// Register data
    pub data: u8,
}

impl RegisterWrite {
    /// Padding write; the chip ignores it
    pub const NO_OP: RegisterWrite = RegisterWrite::new(RegisterAddress::NoOp, 0x00);

    /// Create a write to an arbitrary register
    pub const fn new(address: RegisterAddress, data: u8) -> Self {
        Self { address, data }
    }

    /// Write a row pattern into a digit register
    ///
    /// Returns `None` if `row` is not 0-7.
    pub fn digit(row: usize, data: u8) -> Option<Self> {
        RegisterAddress::digit(row).map(|address| Self::new(address, data))
    }

    /// Intensity write, duty masked to 4 bits
    pub const fn intensity(duty: u8) -> Self {
        Self::new(RegisterAddress::Intensity, duty & MAX_INTENSITY)
    }

    /// 16-bit wire packet: `(address << 8) | data`
    pub const fn to_packet(self) -> u16 {
        (((self.address.value() & 0x0F) as u16) << 8) | self.data as u16
    }

    /// Decode a packet, ignoring D15-D12
    ///
    /// Returns `None` for addresses the chip does not define (0xD, 0xE).
    pub fn from_packet(packet: u16) -> Option<Self> {
        let address = RegisterAddress::from_value((packet >> 8) as u8)?;
        Some(Self::new(address, packet as u8))
    }

    /// Returns true for the padding write
    pub fn is_no_op(&self) -> bool {
        self.address == RegisterAddress::NoOp
    }
}

impl From<DecodeMode> for RegisterWrite {
    fn from(mode: DecodeMode) -> Self {
        Self::new(RegisterAddress::DecodeMode, mode as u8)
    }
}

impl From<ScanLimit> for RegisterWrite {
    fn from(limit: ScanLimit) -> Self {
        Self::new(RegisterAddress::ScanLimit, limit as u8)
    }
}

impl From<Shutdown> for RegisterWrite {
    fn from(mode: Shutdown) -> Self {
        Self::new(RegisterAddress::Shutdown, mode as u8)
    }
}

impl From<DisplayTest> for RegisterWrite {
    fn from(mode: DisplayTest) -> Self {
        Self::new(RegisterAddress::DisplayTest, mode as u8)
    }
}
