//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "ps2usb";
pub const USB_PRODUCT: &str = "PS/2-to-USB Keyboard Bridge";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID endpoint polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

/// Bus current requested from the host (mA). PS/2 keyboards can draw
/// well over 100 mA.
pub const USB_MAX_POWER_MA: u16 = 500;

// Report task

/// How often the report task checks the key state for changes (ms).
pub const REPORT_INTERVAL_MS: u64 = 10;

/// Depth of the keyboard → USB writer report queue.
pub const REPORT_QUEUE_DEPTH: usize = 8;

// Status LED

/// Blink period while the device is not mounted (ms).
pub const BLINK_NOT_MOUNTED_MS: u64 = 250;

/// Blink period while mounted (ms).
pub const BLINK_MOUNTED_MS: u64 = 1000;

/// Blink period while the bus is suspended (ms).
pub const BLINK_SUSPENDED_MS: u64 = 2500;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*` are
// picked in `main.rs`.  Adjust for your wiring.  Both PS/2 lines are
// open-collector and need the internal pull-ups (5 V keyboards need a
// level shifter).
//
//   PS/2 CLOCK  → P0.29
//   PS/2 DATA   → P0.30
//   Status LED  → P0.13 (LED1, active-low)
