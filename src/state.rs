//! Pressed-key state shared between the decoder and the report task.
//!
//! Holds the modifier byte, six unordered key slots and a `changed` flag.
//! Only [`KeyboardState::press`] and [`KeyboardState::release`] mutate the
//! keys; both are idempotent and raise `changed` only when a modifier bit
//! flips or a slot is filled or emptied.
//!
//! Invariants:
//! - a non-zero slot never holds 0 or a modifier usage;
//! - a keycode occupies at most one slot;
//! - modifier bit `b` is set iff that modifier is held.

use heapless::Vec;

use crate::hid::keycodes::{Modifier, KEY_CAPS_LOCK};
use crate::hid::KeyboardReport;
use crate::ps2::scancode::KeyEvent;
use crate::ps2::tables::KeyMapping;

/// Maximum number of simultaneously reported non-modifier keys.
pub const ROLLOVER: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardState {
    modifiers: u8,
    keys: [u8; ROLLOVER],
    changed: bool,
}

impl KeyboardState {
    pub const fn new() -> Self {
        Self {
            modifiers: 0,
            keys: [0; ROLLOVER],
            changed: false,
        }
    }

    /// Release everything and clear the change flag.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Press(m) => self.press(m),
            KeyEvent::Release(m) => self.release(m),
        }
    }

    pub fn press(&mut self, mapping: KeyMapping) {
        match mapping {
            KeyMapping::Modifier(m) => self.set_modifier(m, true),
            KeyMapping::CapsLock => self.press_key(KEY_CAPS_LOCK),
            KeyMapping::Key(code) => match Modifier::from_usage(code) {
                Some(m) => self.set_modifier(m, true),
                None => self.press_key(code),
            },
        }
    }

    pub fn release(&mut self, mapping: KeyMapping) {
        match mapping {
            KeyMapping::Modifier(m) => self.set_modifier(m, false),
            KeyMapping::CapsLock => self.release_key(KEY_CAPS_LOCK),
            KeyMapping::Key(code) => match Modifier::from_usage(code) {
                Some(m) => self.set_modifier(m, false),
                None => self.release_key(code),
            },
        }
    }

    fn set_modifier(&mut self, modifier: Modifier, held: bool) {
        let bit = modifier.bit();
        let next = if held {
            self.modifiers | bit
        } else {
            self.modifiers & !bit
        };
        if next != self.modifiers {
            self.modifiers = next;
            self.changed = true;
        }
    }

    fn press_key(&mut self, code: u8) {
        if code == 0 || self.keys.contains(&code) {
            return;
        }
        match self.keys.iter_mut().find(|slot| **slot == 0) {
            Some(slot) => {
                *slot = code;
                self.changed = true;
            }
            None => debug!("keys: rollover, dropped {=u8:#x}", code),
        }
    }

    fn release_key(&mut self, code: u8) {
        if code == 0 {
            return;
        }
        if let Some(slot) = self.keys.iter_mut().find(|slot| **slot == code) {
            *slot = 0;
            self.changed = true;
        }
    }

    // Accessors for the report task

    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    /// Snapshot of the six slots, in slot order (not press order).
    pub fn keys(&self) -> [u8; ROLLOVER] {
        self.keys
    }

    /// Occupied slots only.
    pub fn pressed_keys(&self) -> Vec<u8, ROLLOVER> {
        self.keys.iter().copied().filter(|&k| k != 0).collect()
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Current state as an 8-byte boot keyboard report.
    pub fn report(&self) -> KeyboardReport {
        KeyboardReport::new(self.modifiers, self.keys)
    }

    /// Report for the poll-and-send-if-changed loop: returns the report and
    /// clears `changed`, or `None` when nothing changed since the last take.
    pub fn take_report(&mut self) -> Option<KeyboardReport> {
        if !self.changed {
            return None;
        }
        self.changed = false;
        Some(self.report())
    }
}
