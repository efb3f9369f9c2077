//! USB HID Keyboard/Keypad page usage IDs and modifier bits.
//!
//! Only the usages reachable from a PS/2 Set-2 keyboard are listed.

// Letters A-Z (0x04 - 0x1D)
pub const KEY_A: u8 = 0x04;
pub const KEY_B: u8 = 0x05;
pub const KEY_C: u8 = 0x06;
pub const KEY_D: u8 = 0x07;
pub const KEY_E: u8 = 0x08;
pub const KEY_F: u8 = 0x09;
pub const KEY_G: u8 = 0x0A;
pub const KEY_H: u8 = 0x0B;
pub const KEY_I: u8 = 0x0C;
pub const KEY_J: u8 = 0x0D;
pub const KEY_K: u8 = 0x0E;
pub const KEY_L: u8 = 0x0F;
pub const KEY_M: u8 = 0x10;
pub const KEY_N: u8 = 0x11;
pub const KEY_O: u8 = 0x12;
pub const KEY_P: u8 = 0x13;
pub const KEY_Q: u8 = 0x14;
pub const KEY_R: u8 = 0x15;
pub const KEY_S: u8 = 0x16;
pub const KEY_T: u8 = 0x17;
pub const KEY_U: u8 = 0x18;
pub const KEY_V: u8 = 0x19;
pub const KEY_W: u8 = 0x1A;
pub const KEY_X: u8 = 0x1B;
pub const KEY_Y: u8 = 0x1C;
pub const KEY_Z: u8 = 0x1D;

// Digits 1-0 (0x1E - 0x27)
pub const KEY_1: u8 = 0x1E;
pub const KEY_2: u8 = 0x1F;
pub const KEY_3: u8 = 0x20;
pub const KEY_4: u8 = 0x21;
pub const KEY_5: u8 = 0x22;
pub const KEY_6: u8 = 0x23;
pub const KEY_7: u8 = 0x24;
pub const KEY_8: u8 = 0x25;
pub const KEY_9: u8 = 0x26;
pub const KEY_0: u8 = 0x27;

pub const KEY_ENTER: u8 = 0x28;
pub const KEY_ESCAPE: u8 = 0x29;
pub const KEY_BACKSPACE: u8 = 0x2A;
pub const KEY_TAB: u8 = 0x2B;
pub const KEY_SPACE: u8 = 0x2C;
pub const KEY_MINUS: u8 = 0x2D;
pub const KEY_EQUAL: u8 = 0x2E;
pub const KEY_BRACKET_LEFT: u8 = 0x2F;
pub const KEY_BRACKET_RIGHT: u8 = 0x30;
pub const KEY_BACKSLASH: u8 = 0x31;
pub const KEY_SEMICOLON: u8 = 0x33;
pub const KEY_APOSTROPHE: u8 = 0x34;
pub const KEY_GRAVE: u8 = 0x35;
pub const KEY_COMMA: u8 = 0x36;
pub const KEY_PERIOD: u8 = 0x37;
pub const KEY_SLASH: u8 = 0x38;
pub const KEY_CAPS_LOCK: u8 = 0x39;

// F1-F12
pub const KEY_F1: u8 = 0x3A;
pub const KEY_F2: u8 = 0x3B;
pub const KEY_F3: u8 = 0x3C;
pub const KEY_F4: u8 = 0x3D;
pub const KEY_F5: u8 = 0x3E;
pub const KEY_F6: u8 = 0x3F;
pub const KEY_F7: u8 = 0x40;
pub const KEY_F8: u8 = 0x41;
pub const KEY_F9: u8 = 0x42;
pub const KEY_F10: u8 = 0x43;
pub const KEY_F11: u8 = 0x44;
pub const KEY_F12: u8 = 0x45;

pub const KEY_PRINT_SCREEN: u8 = 0x46;
pub const KEY_SCROLL_LOCK: u8 = 0x47;
pub const KEY_PAUSE: u8 = 0x48;

// Navigation cluster
pub const KEY_INSERT: u8 = 0x49;
pub const KEY_HOME: u8 = 0x4A;
pub const KEY_PAGE_UP: u8 = 0x4B;
pub const KEY_DELETE: u8 = 0x4C;
pub const KEY_END: u8 = 0x4D;
pub const KEY_PAGE_DOWN: u8 = 0x4E;
pub const KEY_ARROW_RIGHT: u8 = 0x4F;
pub const KEY_ARROW_LEFT: u8 = 0x50;
pub const KEY_ARROW_DOWN: u8 = 0x51;
pub const KEY_ARROW_UP: u8 = 0x52;

// Keypad
pub const KEY_NUM_LOCK: u8 = 0x53;
pub const KEY_KEYPAD_DIVIDE: u8 = 0x54;
pub const KEY_KEYPAD_MULTIPLY: u8 = 0x55;
pub const KEY_KEYPAD_SUBTRACT: u8 = 0x56;
pub const KEY_KEYPAD_ADD: u8 = 0x57;
pub const KEY_KEYPAD_ENTER: u8 = 0x58;
pub const KEY_KEYPAD_1: u8 = 0x59;
pub const KEY_KEYPAD_2: u8 = 0x5A;
pub const KEY_KEYPAD_3: u8 = 0x5B;
pub const KEY_KEYPAD_4: u8 = 0x5C;
pub const KEY_KEYPAD_5: u8 = 0x5D;
pub const KEY_KEYPAD_6: u8 = 0x5E;
pub const KEY_KEYPAD_7: u8 = 0x5F;
pub const KEY_KEYPAD_8: u8 = 0x60;
pub const KEY_KEYPAD_9: u8 = 0x61;
pub const KEY_KEYPAD_0: u8 = 0x62;
pub const KEY_KEYPAD_DECIMAL: u8 = 0x63;

pub const KEY_APPLICATION: u8 = 0x65;

/// First modifier usage (Left Control). Modifiers occupy 0xE0..=0xE7.
pub const KEY_LEFT_CTRL: u8 = 0xE0;

/// One of the eight modifier keys reported in byte 0 of the boot report.
///
/// Declaration order matches both the usage IDs (0xE0..=0xE7) and the
/// bit positions in the modifier byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftGui,
    RightCtrl,
    RightShift,
    RightAlt,
    RightGui,
}

impl Modifier {
    /// Bit mask of this modifier within the report's modifier byte.
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// HID usage ID (0xE0..=0xE7).
    pub const fn usage(self) -> u8 {
        KEY_LEFT_CTRL + self as u8
    }

    /// Map a modifier usage ID back to its modifier, if it is one.
    pub const fn from_usage(usage: u8) -> Option<Self> {
        match usage {
            0xE0 => Some(Modifier::LeftCtrl),
            0xE1 => Some(Modifier::LeftShift),
            0xE2 => Some(Modifier::LeftAlt),
            0xE3 => Some(Modifier::LeftGui),
            0xE4 => Some(Modifier::RightCtrl),
            0xE5 => Some(Modifier::RightShift),
            0xE6 => Some(Modifier::RightAlt),
            0xE7 => Some(Modifier::RightGui),
            _ => None,
        }
    }
}
