//! Packet serialization onto the LOAD/CS, CLK and DIN lines
//!
//! One transmission carries exactly one 16-bit packet per chip:
//! ```text
//! CS ‾‾\________________________ ... ____________/‾‾
//!        │ packet[n-1] │ packet[n-2] │ ... │ packet[0] │
//!        │ 16 bits MSB first, one CLK pulse per bit    │
//! ```
//!
//! Packets go out farthest chip first. Every word pushed into the chain
//! shifts the previous ones one chip further, so when CS rises chip `i`
//! holds `packet[i]`.
//!
//! DIN events are only emitted when the level changes; CLK is pulsed
//! for every bit regardless.

use crate::pin::PinEvent;

/// Bits per packet
pub const PACKET_BITS: u8 = 16;

/// Upper bound of events per packet (DIN + CLK high + CLK low per bit)
pub const MAX_EVENTS_PER_PACKET: usize = 3 * PACKET_BITS as usize;

/// Upper bound of events for a batch of `packets` packets
pub const fn serialized_len_bound(packets: usize) -> usize {
    2 + packets * MAX_EVENTS_PER_PACKET
}

/// Serialize one batch of packets, one per chip in cascade order
///
/// The returned iterator yields the framed pin sequence lazily.
pub fn serialize(packets: &[u16]) -> Serializer<'_> {
    Serializer::new(packets)
}

/// Append the framed sequence for one batch to `out`
///
/// Lets callers concatenate several transmissions into one buffer, e.g. a
/// `Vec<PinEvent>` reserved with [`serialized_len_bound`].
pub fn serialize_into<E>(packets: &[u16], out: &mut E)
where
    E: Extend<PinEvent>,
{
    out.extend(Serializer::new(packets));
}

/// Lazy pin-event stream for one batch
#[derive(Debug, Clone)]
pub struct Serializer<'a> {
    packets: &'a [u16],
    state: SerializeState,
    /// Last emitted DIN level within this transmission
    data_level: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SerializeState {
    /// CS low not yet emitted
    Begin,
    /// Emitting bit `bit` of `packets[packet]`
    Bit { packet: usize, bit: u8, phase: BitPhase },
    /// CS high not yet emitted
    End,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BitPhase {
    Data,
    ClockHigh,
    ClockLow,
}

impl<'a> Serializer<'a> {
    /// Create a serializer for the given batch
    pub fn new(packets: &'a [u16]) -> Self {
        Self {
            packets,
            state: SerializeState::Begin,
            data_level: None,
        }
    }

    fn first_bit(&self) -> SerializeState {
        match self.packets.len().checked_sub(1) {
            Some(last) => SerializeState::Bit {
                packet: last,
                bit: PACKET_BITS - 1,
                phase: BitPhase::Data,
            },
            None => SerializeState::End,
        }
    }

    fn next_bit(packet: usize, bit: u8) -> SerializeState {
        if bit > 0 {
            SerializeState::Bit {
                packet,
                bit: bit - 1,
                phase: BitPhase::Data,
            }
        } else if packet > 0 {
            SerializeState::Bit {
                packet: packet - 1,
                bit: PACKET_BITS - 1,
                phase: BitPhase::Data,
            }
        } else {
            SerializeState::End
        }
    }
}

impl Iterator for Serializer<'_> {
    type Item = PinEvent;

    fn next(&mut self) -> Option<PinEvent> {
        loop {
            match self.state {
                SerializeState::Begin => {
                    self.state = self.first_bit();
                    return Some(PinEvent::ChipSelectLow);
                }
                SerializeState::Bit {
                    packet,
                    bit,
                    phase: BitPhase::Data,
                } => {
                    self.state = SerializeState::Bit {
                        packet,
                        bit,
                        phase: BitPhase::ClockHigh,
                    };
                    let word = self.packets.get(packet).copied().unwrap_or(0);
                    let high = (word >> bit) & 1 == 1;
                    if self.data_level != Some(high) {
                        self.data_level = Some(high);
                        return Some(PinEvent::data(high));
                    }
                }
                SerializeState::Bit {
                    packet,
                    bit,
                    phase: BitPhase::ClockHigh,
                } => {
                    self.state = SerializeState::Bit {
                        packet,
                        bit,
                        phase: BitPhase::ClockLow,
                    };
                    return Some(PinEvent::ClockHigh);
                }
                SerializeState::Bit {
                    packet,
                    bit,
                    phase: BitPhase::ClockLow,
                } => {
                    self.state = Self::next_bit(packet, bit);
                    return Some(PinEvent::ClockLow);
                }
                SerializeState::End => {
                    self.state = SerializeState::Done;
                    return Some(PinEvent::ChipSelectHigh);
                }
                SerializeState::Done => return None,
            }
        }
    }
}

impl core::iter::FusedIterator for Serializer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use proptest::prelude::*;

    type Events = Vec<PinEvent, 512>;

    fn collect(packets: &[u16]) -> Events {
        let mut events = Events::new();
        for event in serialize(packets) {
            events.push(event).unwrap();
        }
        events
    }

    fn count(events: &[PinEvent], wanted: PinEvent) -> usize {
        events.iter().filter(|e| **e == wanted).count()
    }

    /// Rebuild the transmitted bit stream by sampling DIN at each CLK high
    fn sampled_bits(events: &[PinEvent]) -> Vec<bool, 512> {
        let mut bits = Vec::new();
        let mut din = false;
        for event in events {
            match event {
                PinEvent::DataHigh => din = true,
                PinEvent::DataLow => din = false,
                PinEvent::ClockHigh => bits.push(din).unwrap(),
                _ => {}
            }
        }
        bits
    }

    #[test]
    fn test_single_digit0_packet() {
        // Digit0 = 0x01: 0000 0001 0000 0001
        let events = collect(&[0x0101]);

        let mut expected = Events::new();
        expected.push(PinEvent::ChipSelectLow).unwrap();
        let mut level = None;
        for bit in (0..16).rev() {
            let high = (0x0101u16 >> bit) & 1 == 1;
            if level != Some(high) {
                expected.push(PinEvent::data(high)).unwrap();
                level = Some(high);
            }
            expected.push(PinEvent::ClockHigh).unwrap();
            expected.push(PinEvent::ClockLow).unwrap();
        }
        expected.push(PinEvent::ChipSelectHigh).unwrap();

        assert_eq!(events, expected);
        assert_eq!(events[1], PinEvent::DataLow);
        assert_eq!(count(&events, PinEvent::DataHigh), 2);
        assert_eq!(count(&events, PinEvent::DataLow), 2);
        assert_eq!(count(&events, PinEvent::ClockHigh), 16);
    }

    #[test]
    fn test_empty_batch_is_just_framing() {
        let events = collect(&[]);
        assert_eq!(
            events.as_slice(),
            &[PinEvent::ChipSelectLow, PinEvent::ChipSelectHigh]
        );
    }

    #[test]
    fn test_first_level_always_emitted() {
        let low = collect(&[0x0000]);
        assert_eq!(low[1], PinEvent::DataLow);
        assert_eq!(count(&low, PinEvent::DataLow), 1);
        assert_eq!(count(&low, PinEvent::DataHigh), 0);

        let high = collect(&[0xFFFF]);
        assert_eq!(high[1], PinEvent::DataHigh);
        assert_eq!(count(&high, PinEvent::DataHigh), 1);
    }

    #[test]
    fn test_farthest_chip_goes_first() {
        // chip 0 gets 0x0000, chip 1 gets 0xFFFF
        let events = collect(&[0x0000, 0xFFFF]);
        let bits = sampled_bits(&events);
        assert_eq!(bits.len(), 32);
        assert!(bits[..16].iter().all(|b| *b));
        assert!(bits[16..].iter().all(|b| !*b));
    }

    #[test]
    fn test_level_carries_across_packets() {
        // 0x0001 ends high, 0x8000 starts high: no DIN event at the boundary
        let events = collect(&[0x8000, 0x0001]);
        assert_eq!(count(&events, PinEvent::DataHigh), 1);
        assert_eq!(count(&events, PinEvent::DataLow), 2);
    }

    #[test]
    fn test_serialize_into_appends() {
        let mut events = Events::new();
        serialize_into(&[0x0C01], &mut events);
        let first = events.len();
        serialize_into(&[0x0A0F], &mut events);

        assert!(events[..first].iter().copied().eq(serialize(&[0x0C01])));
        assert!(events[first..].iter().copied().eq(serialize(&[0x0A0F])));
        assert_eq!(count(&events, PinEvent::ChipSelectHigh), 2);
    }

    #[test]
    fn test_len_bound() {
        assert_eq!(serialized_len_bound(0), 2);
        assert_eq!(serialized_len_bound(4), 2 + 4 * 48);
        let alternating = collect(&[0xAAAA, 0x5555]);
        assert!(alternating.len() <= serialized_len_bound(2));
    }

    proptest! {
        #[test]
        fn prop_framing(packets in proptest::collection::vec(any::<u16>(), 0..8)) {
            let events = collect(&packets);
            let n = packets.len();

            prop_assert_eq!(events.first(), Some(&PinEvent::ChipSelectLow));
            prop_assert_eq!(events.last(), Some(&PinEvent::ChipSelectHigh));
            prop_assert_eq!(count(&events, PinEvent::ChipSelectLow), 1);
            prop_assert_eq!(count(&events, PinEvent::ChipSelectHigh), 1);
            prop_assert_eq!(count(&events, PinEvent::ClockHigh), 16 * n);
            prop_assert_eq!(count(&events, PinEvent::ClockLow), 16 * n);

            let data = count(&events, PinEvent::DataHigh) + count(&events, PinEvent::DataLow);
            prop_assert!(data <= 16 * n);
            prop_assert!(events.len() <= serialized_len_bound(n));
        }

        #[test]
        fn prop_bits_are_reverse_chip_order_msb_first(
            packets in proptest::collection::vec(any::<u16>(), 1..8)
        ) {
            let events = collect(&packets);
            let bits = sampled_bits(&events);
            let mut expected = Vec::<bool, 512>::new();
            for packet in packets.iter().rev() {
                for bit in (0..16).rev() {
                    expected.push((packet >> bit) & 1 == 1).unwrap();
                }
            }
            prop_assert_eq!(bits, expected);
        }

        #[test]
        fn prop_no_redundant_data_events(packets in proptest::collection::vec(any::<u16>(), 1..8)) {
            let events = collect(&packets);
            let mut last = None;
            for event in events.iter().filter(|e| matches!(e, PinEvent::DataHigh | PinEvent::DataLow)) {
                prop_assert_ne!(Some(*event), last);
                last = Some(*event);
            }
        }
    }
}
