//! PS/2 Set-2 scancode → HID translation tables.
//!
//! Two 256-entry arrays indexed by the raw scancode byte: one for bare
//! scancodes and one for scancodes that followed an `0xE0` prefix. Entries
//! are built at compile time; `None` marks an unmapped scancode.

use crate::hid::keycodes::*;

/// What a scancode resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyMapping {
    /// An ordinary key, reported in one of the six key slots.
    Key(u8),
    /// A modifier, reported as a bit in the modifier byte.
    Modifier(Modifier),
    /// Caps Lock. Reported as an ordinary key; kept apart so the host's
    /// toggle semantics stay out of the key state.
    CapsLock,
}

pub type ScancodeTable = [Option<KeyMapping>; 256];

/// Bare Set-2 scancodes.
pub static STANDARD: ScancodeTable = standard_table();

/// Scancodes following the `0xE0` prefix.
pub static EXTENDED: ScancodeTable = extended_table();

/// Resolve a scancode through the standard or extended table.
pub fn lookup(code: u8, extended: bool) -> Option<KeyMapping> {
    let table = if extended { &EXTENDED } else { &STANDARD };
    table[code as usize]
}

const fn key(usage: u8) -> Option<KeyMapping> {
    Some(KeyMapping::Key(usage))
}

const fn modifier(m: Modifier) -> Option<KeyMapping> {
    Some(KeyMapping::Modifier(m))
}

const fn standard_table() -> ScancodeTable {
    let mut t: ScancodeTable = [None; 256];

    // 0x00-0x0F
    t[0x01] = key(KEY_F9);
    t[0x03] = key(KEY_F5);
    t[0x04] = key(KEY_F3);
    t[0x05] = key(KEY_F1);
    t[0x06] = key(KEY_F2);
    t[0x07] = key(KEY_F12);
    t[0x09] = key(KEY_F10);
    t[0x0A] = key(KEY_F8);
    t[0x0B] = key(KEY_F6);
    t[0x0C] = key(KEY_F4);
    t[0x0D] = key(KEY_TAB);
    t[0x0E] = key(KEY_GRAVE);

    // 0x10-0x1F
    t[0x11] = modifier(Modifier::LeftAlt);
    t[0x12] = modifier(Modifier::LeftShift);
    t[0x14] = modifier(Modifier::LeftCtrl);
    t[0x15] = key(KEY_Q);
    t[0x16] = key(KEY_1);
    t[0x1A] = key(KEY_Z);
    t[0x1B] = key(KEY_S);
    t[0x1C] = key(KEY_A);
    t[0x1D] = key(KEY_W);
    t[0x1E] = key(KEY_2);

    // 0x20-0x2F
    t[0x21] = key(KEY_C);
    t[0x22] = key(KEY_X);
    t[0x23] = key(KEY_D);
    t[0x24] = key(KEY_E);
    t[0x25] = key(KEY_4);
    t[0x26] = key(KEY_3);
    t[0x29] = key(KEY_SPACE);
    t[0x2A] = key(KEY_V);
    t[0x2B] = key(KEY_F);
    t[0x2C] = key(KEY_T);
    t[0x2D] = key(KEY_R);
    t[0x2E] = key(KEY_5);

    // 0x30-0x3F
    t[0x31] = key(KEY_N);
    t[0x32] = key(KEY_B);
    t[0x33] = key(KEY_H);
    t[0x34] = key(KEY_G);
    t[0x35] = key(KEY_Y);
    t[0x36] = key(KEY_6);
    t[0x3A] = key(KEY_M);
    t[0x3B] = key(KEY_J);
    t[0x3C] = key(KEY_U);
    t[0x3D] = key(KEY_7);
    t[0x3E] = key(KEY_8);

    // 0x40-0x4F
    t[0x41] = key(KEY_COMMA);
    t[0x42] = key(KEY_K);
    t[0x43] = key(KEY_I);
    t[0x44] = key(KEY_O);
    t[0x45] = key(KEY_0);
    t[0x46] = key(KEY_9);
    t[0x49] = key(KEY_PERIOD);
    t[0x4A] = key(KEY_SLASH);
    t[0x4B] = key(KEY_L);
    t[0x4C] = key(KEY_SEMICOLON);
    t[0x4D] = key(KEY_P);
    t[0x4E] = key(KEY_MINUS);

    // 0x50-0x5F
    t[0x52] = key(KEY_APOSTROPHE);
    t[0x54] = key(KEY_BRACKET_LEFT);
    t[0x55] = key(KEY_EQUAL);
    t[0x58] = Some(KeyMapping::CapsLock);
    t[0x59] = modifier(Modifier::RightShift);
    t[0x5A] = key(KEY_ENTER);
    t[0x5B] = key(KEY_BRACKET_RIGHT);
    t[0x5D] = key(KEY_BACKSLASH);

    // 0x60-0x6F
    t[0x66] = key(KEY_BACKSPACE);
    t[0x69] = key(KEY_KEYPAD_1);
    t[0x6B] = key(KEY_KEYPAD_4);
    t[0x6C] = key(KEY_KEYPAD_7);

    // 0x70-0x7F
    t[0x70] = key(KEY_KEYPAD_0);
    t[0x71] = key(KEY_KEYPAD_DECIMAL);
    t[0x72] = key(KEY_KEYPAD_2);
    t[0x73] = key(KEY_KEYPAD_5);
    t[0x74] = key(KEY_KEYPAD_6);
    t[0x75] = key(KEY_KEYPAD_8);
    t[0x76] = key(KEY_ESCAPE);
    t[0x77] = key(KEY_SCROLL_LOCK);
    t[0x78] = key(KEY_F11);
    t[0x79] = key(KEY_KEYPAD_ADD);
    t[0x7A] = key(KEY_KEYPAD_3);
    t[0x7B] = key(KEY_KEYPAD_SUBTRACT);
    t[0x7C] = key(KEY_KEYPAD_MULTIPLY);
    t[0x7D] = key(KEY_KEYPAD_9);
    t[0x7E] = key(KEY_NUM_LOCK);

    // 0x80-0x8F
    t[0x83] = key(KEY_F7);

    t
}

const fn extended_table() -> ScancodeTable {
    let mut t: ScancodeTable = [None; 256];

    t[0x11] = modifier(Modifier::RightAlt);
    t[0x14] = modifier(Modifier::RightCtrl);
    t[0x1F] = modifier(Modifier::LeftGui);
    t[0x27] = modifier(Modifier::RightGui);
    t[0x2F] = key(KEY_APPLICATION);

    // Keypad
    t[0x4A] = key(KEY_KEYPAD_DIVIDE);
    t[0x5A] = key(KEY_KEYPAD_ENTER);

    // Navigation cluster
    t[0x69] = key(KEY_END);
    t[0x6B] = key(KEY_ARROW_LEFT);
    t[0x6C] = key(KEY_HOME);
    t[0x70] = key(KEY_INSERT);
    t[0x71] = key(KEY_DELETE);
    t[0x72] = key(KEY_ARROW_DOWN);
    t[0x74] = key(KEY_ARROW_RIGHT);
    t[0x75] = key(KEY_ARROW_UP);
    t[0x7A] = key(KEY_PAGE_DOWN);
    t[0x7D] = key(KEY_PAGE_UP);

    t
}
