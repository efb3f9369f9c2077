//! HID side of the bridge: keyboard usage IDs, the boot keyboard report
//! and its descriptor.

pub mod keyboard;
pub mod keycodes;

pub use keyboard::{KeyboardLeds, KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR};
pub use keycodes::Modifier;
