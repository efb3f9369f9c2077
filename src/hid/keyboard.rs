//! USB HID keyboard report (boot protocol).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes, zero padded, unordered
//! ```
//!
//! The host answers with a 1-byte LED output report (Num/Caps/Scroll
//! Lock, Compose, Kana), parsed by [`KeyboardLeds`].

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 in the boot protocol).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    pub const fn new(modifier: u8, keycodes: [u8; 6]) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes,
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (8, or 0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys and no modifiers are held.
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Host-controlled keyboard LED state (boot protocol output report).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardLeds(pub u8);

impl KeyboardLeds {
    pub const NUM_LOCK: u8 = 0x01;
    pub const CAPS_LOCK: u8 = 0x02;
    pub const SCROLL_LOCK: u8 = 0x04;
    pub const COMPOSE: u8 = 0x08;
    pub const KANA: u8 = 0x10;

    /// Parse a SET_REPORT(Output) payload. An empty payload carries no
    /// LED state and is ignored.
    pub fn from_output_report(data: &[u8]) -> Option<Self> {
        data.first().map(|&b| Self(b))
    }

    pub fn caps_lock(&self) -> bool {
        self.0 & Self::CAPS_LOCK != 0
    }

    pub fn num_lock(&self) -> bool {
        self.0 & Self::NUM_LOCK != 0
    }

    pub fn scroll_lock(&self) -> bool {
        self.0 & Self::SCROLL_LOCK != 0
    }
}

// USB HID report descriptor for a boot-protocol keyboard

/// USB HID Report Descriptor for a standard keyboard, no report ID.
///
/// This descriptor tells the USB host that we are a keyboard with:
///   - 8 modifier key bits (input)
///   - 1 reserved byte
///   - 5 LED indicators (output)
///   - 6 key code bytes (input)
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - LED output (5 bits + 3 padding) -
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_report_empty() {
        let report = KeyboardReport::empty();
        assert!(report.is_empty());
        assert_eq!(report, KeyboardReport::default());
    }

    #[test]
    fn keyboard_report_serialize_layout() {
        let report = KeyboardReport::new(0x22, [0x04, 0x52, 0, 0, 0, 0]);
        let mut buf = [0xAAu8; 8];
        assert_eq!(report.serialize(&mut buf), KEYBOARD_REPORT_SIZE);
        assert_eq!(buf, [0x22, 0x00, 0x04, 0x52, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn keyboard_report_serialize_buffer_too_small() {
        let report = KeyboardReport::empty();
        let mut buf = [0u8; 7];
        assert_eq!(report.serialize(&mut buf), 0);
    }

    #[test]
    fn keyboard_report_modifier_only_is_not_empty() {
        let report = KeyboardReport::new(0x01, [0; 6]);
        assert!(!report.is_empty());
    }

    #[test]
    fn leds_from_output_report() {
        assert_eq!(KeyboardLeds::from_output_report(&[]), None);

        let leds = KeyboardLeds::from_output_report(&[0x02, 0xFF]).unwrap();
        assert!(leds.caps_lock());
        assert!(!leds.num_lock());
        assert!(!leds.scroll_lock());

        let leds = KeyboardLeds::from_output_report(&[0x05]).unwrap();
        assert!(!leds.caps_lock());
        assert!(leds.num_lock());
        assert!(leds.scroll_lock());
    }

    #[test]
    fn descriptor_is_a_single_application_collection() {
        assert_eq!(&KEYBOARD_REPORT_DESCRIPTOR[..6], &[0x05, 0x01, 0x09, 0x06, 0xA1, 0x01]);
        assert_eq!(KEYBOARD_REPORT_DESCRIPTOR.last(), Some(&0xC0));
        // No Report ID item (global tag 0x85) anywhere: boot layout only.
        let mut i = 0;
        while i < KEYBOARD_REPORT_DESCRIPTOR.len() {
            let prefix = KEYBOARD_REPORT_DESCRIPTOR[i];
            assert_ne!(prefix, 0x85);
            let size = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            i += 1 + size;
        }
    }
}
