//! Unified error type for the ps2usb firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! The PS/2 core never fails (bad input is dropped); only the USB side
//! produces errors, and none of them are fatal.

use defmt::Format;
use embassy_usb::driver::EndpointError;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, Format)]
pub enum Error {
    /// USB stack returned an error.
    Usb(UsbError),

    /// Buffer too small for the requested operation.
    BufferOverflow,
}

/// Subset of USB errors we propagate.
#[derive(Debug, Clone, Copy, Format)]
pub enum UsbError {
    /// Endpoint is not enabled: the host has not configured us, or the
    /// bus was reset or suspended.
    Disabled,
    /// Report larger than the endpoint's max packet size.
    PacketTooLarge,
}

// Convenience conversions

impl From<UsbError> for Error {
    fn from(e: UsbError) -> Self {
        Error::Usb(e)
    }
}

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::Disabled => UsbError::Disabled.into(),
            EndpointError::BufferOverflow => UsbError::PacketTooLarge.into(),
        }
    }
}
