//! USB Device subsystem - presents a boot-protocol HID keyboard to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  The keyboard task queues reports through
//! [`hid_device::offer_report`]; the writer task drains the queue into
//! the interrupt IN endpoint.

pub mod hid_device;
