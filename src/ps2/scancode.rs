//! Set-2 scancode interpreter.
//!
//! One key transition arrives as 1-3 bytes: an optional `0xE0` (extended)
//! prefix, an optional `0xF0` (break) prefix and the scancode itself.
//! Prefixes only set flags; the next non-prefix byte is resolved against
//! them and clears both, whether or not it maps to a key.

use super::tables::{self, KeyMapping};

/// Prefix announcing a key release.
pub const BREAK_PREFIX: u8 = 0xF0;

/// Prefix selecting the extended scancode table.
pub const EXTENDED_PREFIX: u8 = 0xE0;

/// A resolved key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    Press(KeyMapping),
    Release(KeyMapping),
}

impl KeyEvent {
    pub fn mapping(&self) -> KeyMapping {
        match *self {
            KeyEvent::Press(m) | KeyEvent::Release(m) => m,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, KeyEvent::Press(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScancodeInterpreter {
    break_pending: bool,
    extended_pending: bool,
}

impl ScancodeInterpreter {
    pub const fn new() -> Self {
        Self {
            break_pending: false,
            extended_pending: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn break_pending(&self) -> bool {
        self.break_pending
    }

    pub fn extended_pending(&self) -> bool {
        self.extended_pending
    }

    /// Consume one scancode byte.
    pub fn interpret(&mut self, code: u8) -> Option<KeyEvent> {
        match code {
            BREAK_PREFIX => {
                self.break_pending = true;
                None
            }
            EXTENDED_PREFIX => {
                self.extended_pending = true;
                None
            }
            _ => {
                let mapping = tables::lookup(code, self.extended_pending);
                let is_break = self.break_pending;
                if mapping.is_none() {
                    debug!(
                        "ps2: unmapped scancode {=u8:#x} (extended={=bool})",
                        code,
                        self.extended_pending
                    );
                }
                self.reset();
                mapping.map(|m| {
                    if is_break {
                        KeyEvent::Release(m)
                    } else {
                        KeyEvent::Press(m)
                    }
                })
            }
        }
    }
}
