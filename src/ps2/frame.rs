//! PS/2 frame decoder.
//!
//! A device-to-host frame is 11 bits, each valid on the falling edge of
//! the clock line:
//!
//! ```text
//! bit 0      start (0)
//! bit 1..=8  data, LSB first
//! bit 9      odd parity
//! bit 10     stop (1)
//! ```
//!
//! Start, parity and stop bits are read but not validated. A frame that
//! loses edges stalls at its current bit until more edges arrive.

use super::Sample;

const START_BIT: u8 = 0;
const LAST_DATA_BIT: u8 = 8;
const PARITY_BIT: u8 = 9;

/// Bit-position state machine rebuilding one scancode byte per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameDecoder {
    bit_index: u8,
    shift: u8,
    last_clock: bool,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Decoder assuming the clock line idles high.
    pub const fn new() -> Self {
        Self::with_clock(true)
    }

    /// Decoder seeded with the clock level observed at start-up, so an
    /// already-low line is not taken for a falling edge.
    pub const fn with_clock(clock: bool) -> Self {
        Self {
            bit_index: 0,
            shift: 0,
            last_clock: clock,
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self, clock: bool) {
        *self = Self::with_clock(clock);
    }

    /// Position of the next bit to be consumed (0..=10).
    pub fn bit_index(&self) -> u8 {
        self.bit_index
    }

    /// Returns `true` while a frame is partially received.
    pub fn in_frame(&self) -> bool {
        self.bit_index != START_BIT
    }

    /// Feed one sample of both lines. Returns the scancode byte when the
    /// stop bit of a frame is clocked in.
    pub fn feed(&mut self, sample: Sample) -> Option<u8> {
        let falling = self.last_clock && !sample.clock;
        self.last_clock = sample.clock;
        if !falling {
            return None;
        }

        match self.bit_index {
            START_BIT | PARITY_BIT => {}
            1..=LAST_DATA_BIT => {
                self.shift >>= 1;
                if sample.data {
                    self.shift |= 0x80;
                }
            }
            _ => {
                let byte = self.shift;
                self.bit_index = 0;
                self.shift = 0;
                trace!("ps2: frame {=u8:#x}", byte);
                return Some(byte);
            }
        }

        self.bit_index += 1;
        None
    }
}
