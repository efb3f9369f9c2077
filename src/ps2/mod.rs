//! PS/2 keyboard input: line sampling, frame decoding, scancode
//! interpretation and translation to HID usages.
//!
//! ## Pipeline
//!
//! ```text
//! LineSampler ─► FrameDecoder ─► ScancodeInterpreter ─► KeyboardState
//!  (clk, data)    (11-bit frame)   (E0/F0 + tables)      (mods + 6 keys)
//! ```
//!
//! Everything runs synchronously inside [`Ps2Keyboard::poll`]; nothing
//! blocks and nothing is buffered beyond the frame in flight. The caller
//! decides the polling rate and must sample faster than the keyboard's
//! clock (10-16.7 kHz) or frames will stall.

pub mod frame;
#[cfg(feature = "embedded")]
pub mod gpio;
pub mod scancode;
pub mod tables;

#[cfg(test)]
mod tests;

use crate::state::KeyboardState;
use frame::FrameDecoder;
use scancode::{KeyEvent, ScancodeInterpreter};

/// Levels of the clock and data lines at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub clock: bool,
    pub data: bool,
}

impl Sample {
    pub const fn new(clock: bool, data: bool) -> Self {
        Self { clock, data }
    }
}

/// Source of clock/data line levels, read once per poll.
pub trait LineSampler {
    fn clock_level(&mut self) -> bool;
    fn data_level(&mut self) -> bool;

    fn sample(&mut self) -> Sample {
        let clock = self.clock_level();
        let data = self.data_level();
        Sample { clock, data }
    }
}

/// The full decode-and-state pipeline, owned by the polling task.
#[derive(Clone, Debug, Default)]
pub struct Ps2Keyboard {
    decoder: FrameDecoder,
    interpreter: ScancodeInterpreter,
    state: KeyboardState,
}

impl Ps2Keyboard {
    pub const fn new() -> Self {
        Self {
            decoder: FrameDecoder::new(),
            interpreter: ScancodeInterpreter::new(),
            state: KeyboardState::new(),
        }
    }

    /// Zero frame, prefix and key state. `clock` is the current level of
    /// the clock line, used as the edge detector's previous level.
    pub fn init(&mut self, clock: bool) {
        self.decoder.reset(clock);
        self.interpreter.reset();
        self.state.reset();
        info!("ps2: initialised (clock={=bool})", clock);
    }

    /// One poll tick: sample the lines and advance the pipeline.
    pub fn poll<S: LineSampler>(&mut self, lines: &mut S) -> Option<KeyEvent> {
        let sample = lines.sample();
        self.feed(sample)
    }

    /// Advance the pipeline with an already-taken sample.
    pub fn feed(&mut self, sample: Sample) -> Option<KeyEvent> {
        let code = self.decoder.feed(sample)?;
        self.process_scancode(code)
    }

    /// Interpret a complete scancode byte and apply the resulting event.
    pub fn process_scancode(&mut self, code: u8) -> Option<KeyEvent> {
        let event = self.interpreter.interpret(code)?;
        self.state.apply(event);
        Some(event)
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    /// Mutable access for the report task (`clear_changed`, `take_report`).
    pub fn state_mut(&mut self) -> &mut KeyboardState {
        &mut self.state
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    pub fn interpreter(&self) -> &ScancodeInterpreter {
        &self.interpreter
    }
}
