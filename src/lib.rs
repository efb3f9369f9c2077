//! PS/2 keyboard → USB HID bridge: host-testable core.
//!
//! Everything here is pure logic with no hardware access, so it builds
//! for the host and runs under `cargo test --lib`:
//!
//! - [`ps2`]: frame decoder, scancode interpreter, Set-2 translation tables
//!   and the [`ps2::Ps2Keyboard`] pipeline facade
//! - [`state`]: modifier byte + six-key rollover set with change tracking
//! - [`hid`]: boot keyboard report, LED output report, report descriptor
//! - [`status_logic`]: USB link tracking and status LED policy
//!
//! The embedded binary (`src/main.rs`, feature `embedded`) wires these to
//! GPIO, the USB device stack and the status LED.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod config;
pub mod hid;
pub mod ps2;
pub mod state;
pub mod status_logic;

pub use hid::KeyboardReport;
pub use ps2::{LineSampler, Ps2Keyboard, Sample};
pub use state::KeyboardState;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
