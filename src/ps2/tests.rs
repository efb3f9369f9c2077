//! Pipeline tests: line samples in, keyboard state out.
//!
//! Frames are synthesised as clock high/low sample pairs so every bit
//! passes through the edge detector exactly as it would on hardware.

use heapless::Vec;

use super::scancode::{KeyEvent, BREAK_PREFIX, EXTENDED_PREFIX};
use super::tables::KeyMapping;
use super::{LineSampler, Ps2Keyboard, Sample};
use crate::hid::keycodes::*;

/// Two samples per bit, 11 bits per frame, up to 3 frames per key event.
const MAX_SAMPLES: usize = 2 * 11 * 3;

fn odd_parity(byte: u8) -> bool {
    byte.count_ones() % 2 == 0
}

fn frame_samples(byte: u8, samples: &mut Vec<Sample, MAX_SAMPLES>) {
    let mut bits = [false; 11];
    bits[0] = false;
    for i in 0..8 {
        bits[1 + i] = byte & (1 << i) != 0;
    }
    bits[9] = odd_parity(byte);
    bits[10] = true;

    for &bit in &bits {
        samples.push(Sample::new(true, bit)).unwrap();
        samples.push(Sample::new(false, bit)).unwrap();
    }
}

/// Replays a fixed sample sequence, then idles high.
struct ScriptedLines {
    samples: Vec<Sample, MAX_SAMPLES>,
    pos: usize,
    current: Sample,
}

impl ScriptedLines {
    fn new(bytes: &[u8]) -> Self {
        let mut samples = Vec::new();
        for &b in bytes {
            frame_samples(b, &mut samples);
        }
        Self {
            samples,
            pos: 0,
            current: Sample::new(true, true),
        }
    }

    fn is_done(&self) -> bool {
        self.pos >= self.samples.len()
    }
}

impl LineSampler for ScriptedLines {
    fn clock_level(&mut self) -> bool {
        self.current = self
            .samples
            .get(self.pos)
            .copied()
            .unwrap_or(Sample::new(true, true));
        self.pos += 1;
        self.current.clock
    }

    fn data_level(&mut self) -> bool {
        self.current.data
    }
}

fn send(keyboard: &mut Ps2Keyboard, bytes: &[u8]) -> Option<KeyEvent> {
    let mut lines = ScriptedLines::new(bytes);
    let mut last = None;
    while !lines.is_done() {
        if let Some(event) = keyboard.poll(&mut lines) {
            last = Some(event);
        }
    }
    last
}

fn fresh() -> Ps2Keyboard {
    let mut keyboard = Ps2Keyboard::new();
    keyboard.init(true);
    keyboard
}

#[test]
fn every_byte_decodes_bit_exact() {
    for byte in 0..=255u8 {
        let mut keyboard = fresh();
        let mut decoded = None;
        let mut samples = Vec::<Sample, MAX_SAMPLES>::new();
        frame_samples(byte, &mut samples);
        let mut decoder = *keyboard.decoder();
        for &s in &samples {
            if let Some(b) = decoder.feed(s) {
                decoded = Some(b);
            }
        }
        assert_eq!(decoded, Some(byte));
        // The same frame through the full pipeline leaves the decoder idle.
        send(&mut keyboard, &[byte]);
        assert!(!keyboard.decoder().in_frame());
    }
}

#[test]
fn make_and_break_a() {
    let mut keyboard = fresh();

    let event = send(&mut keyboard, &[0x1C]);
    assert_eq!(event, Some(KeyEvent::Press(KeyMapping::Key(KEY_A))));
    assert_eq!(keyboard.state().modifiers(), 0x00);
    assert_eq!(keyboard.state().keys(), [0x04, 0, 0, 0, 0, 0]);
    assert!(keyboard.state().has_changed());

    keyboard.state_mut().clear_changed();
    let event = send(&mut keyboard, &[BREAK_PREFIX, 0x1C]);
    assert_eq!(event, Some(KeyEvent::Release(KeyMapping::Key(KEY_A))));
    assert_eq!(keyboard.state().keys(), [0; 6]);
    assert!(keyboard.state().has_changed());
}

#[test]
fn left_shift_sets_modifier_bit() {
    let mut keyboard = fresh();

    send(&mut keyboard, &[0x12]);
    assert_eq!(keyboard.state().modifiers(), 0x02);
    assert_eq!(keyboard.state().keys(), [0; 6]);
    assert!(keyboard.state().has_changed());

    send(&mut keyboard, &[BREAK_PREFIX, 0x12]);
    assert_eq!(keyboard.state().modifiers(), 0x00);
}

#[test]
fn extended_up_arrow() {
    let mut keyboard = fresh();

    send(&mut keyboard, &[EXTENDED_PREFIX, 0x75]);
    assert!(keyboard.state().keys().contains(&KEY_ARROW_UP));
    assert!(!keyboard.state().keys().contains(&KEY_KEYPAD_8));

    send(&mut keyboard, &[EXTENDED_PREFIX, BREAK_PREFIX, 0x75]);
    assert!(!keyboard.state().keys().contains(&KEY_ARROW_UP));
    assert_eq!(keyboard.state().keys(), [0; 6]);
}

#[test]
fn break_flag_does_not_leak_into_next_key() {
    let mut keyboard = fresh();
    send(&mut keyboard, &[BREAK_PREFIX, 0x1B]); // release S, never pressed
    assert!(!keyboard.state().has_changed());
    assert!(!keyboard.interpreter().break_pending());

    send(&mut keyboard, &[0x1B]);
    assert_eq!(keyboard.state().keys(), [KEY_S, 0, 0, 0, 0, 0]);
}

#[test]
fn typing_shifted_sequence() {
    let mut keyboard = fresh();
    let mut reports = 0;

    // Shift down, H down, H up, Shift up, I down, I up
    let script: [&[u8]; 6] = [
        &[0x12],
        &[0x33],
        &[BREAK_PREFIX, 0x33],
        &[BREAK_PREFIX, 0x12],
        &[0x43],
        &[BREAK_PREFIX, 0x43],
    ];
    let expected = [
        (0x02, [0u8; 6]),
        (0x02, [KEY_H, 0, 0, 0, 0, 0]),
        (0x02, [0; 6]),
        (0x00, [0; 6]),
        (0x00, [KEY_I, 0, 0, 0, 0, 0]),
        (0x00, [0; 6]),
    ];

    for (bytes, (modifiers, keys)) in script.iter().zip(expected.iter()) {
        send(&mut keyboard, bytes);
        let report = keyboard.state_mut().take_report().unwrap();
        assert_eq!(report.modifier, *modifiers);
        assert_eq!(report.keycodes, *keys);
        reports += 1;
    }
    assert_eq!(reports, 6);
    assert_eq!(keyboard.state_mut().take_report(), None);
}

#[test]
fn typematic_repeat_changes_state_once() {
    let mut keyboard = fresh();
    send(&mut keyboard, &[0x29]); // space
    keyboard.state_mut().clear_changed();
    for _ in 0..5 {
        send(&mut keyboard, &[0x29]);
    }
    assert!(!keyboard.state().has_changed());
    assert_eq!(keyboard.state().pressed_keys().as_slice(), &[KEY_SPACE]);
}

#[test]
fn rollover_through_pipeline() {
    let mut keyboard = fresh();
    // Q W E R T Y U
    for &code in &[0x15, 0x1D, 0x24, 0x2D, 0x2C, 0x35] {
        send(&mut keyboard, &[code]);
    }
    let full = keyboard.state().keys();
    assert_eq!(full, [KEY_Q, KEY_W, KEY_E, KEY_R, KEY_T, KEY_Y]);

    keyboard.state_mut().clear_changed();
    send(&mut keyboard, &[0x3C]);
    assert_eq!(keyboard.state().keys(), full);
    assert!(!keyboard.state().has_changed());

    // Releasing one frees a slot for the next press.
    send(&mut keyboard, &[BREAK_PREFIX, 0x24]);
    send(&mut keyboard, &[0x3C]);
    assert_eq!(keyboard.state().keys(), [KEY_Q, KEY_W, KEY_U, KEY_R, KEY_T, KEY_Y]);
}

#[test]
fn caps_lock_make_break() {
    let mut keyboard = fresh();
    send(&mut keyboard, &[0x58]);
    assert_eq!(keyboard.state().keys(), [KEY_CAPS_LOCK, 0, 0, 0, 0, 0]);
    assert_eq!(keyboard.state().modifiers(), 0);
    send(&mut keyboard, &[BREAK_PREFIX, 0x58]);
    assert_eq!(keyboard.state().keys(), [0; 6]);
}

#[test]
fn right_side_modifiers_via_extended() {
    let mut keyboard = fresh();
    send(&mut keyboard, &[EXTENDED_PREFIX, 0x14]); // RCtrl
    send(&mut keyboard, &[EXTENDED_PREFIX, 0x11]); // RAlt
    send(&mut keyboard, &[EXTENDED_PREFIX, 0x27]); // RGui
    send(&mut keyboard, &[0x59]); // RShift
    assert_eq!(keyboard.state().modifiers(), 0xF0);

    send(&mut keyboard, &[EXTENDED_PREFIX, 0x1F]); // LGui
    send(&mut keyboard, &[0x11]); // LAlt
    send(&mut keyboard, &[0x14]); // LCtrl
    send(&mut keyboard, &[0x12]); // LShift
    assert_eq!(keyboard.state().modifiers(), 0xFF);
    assert_eq!(keyboard.state().keys(), [0; 6]);
}

#[test]
fn unmapped_scancode_changes_nothing() {
    let mut keyboard = fresh();
    assert_eq!(send(&mut keyboard, &[0x00]), None);
    assert_eq!(send(&mut keyboard, &[0xAA]), None); // self-test passed
    assert_eq!(send(&mut keyboard, &[EXTENDED_PREFIX, 0x12]), None);
    assert_eq!(*keyboard.state(), crate::state::KeyboardState::new());
}

#[test]
fn init_clears_everything() {
    let mut keyboard = fresh();
    send(&mut keyboard, &[0x12]);
    send(&mut keyboard, &[0x1C]);
    keyboard.process_scancode(EXTENDED_PREFIX);

    keyboard.init(true);
    assert_eq!(*keyboard.state(), crate::state::KeyboardState::new());
    assert!(!keyboard.interpreter().extended_pending());
    assert_eq!(keyboard.decoder().bit_index(), 0);
}

#[test]
fn missed_edge_shifts_framing() {
    let mut keyboard = fresh();
    let mut lines = ScriptedLines::new(&[0x1C]);
    // Swallow the first falling edge (start bit) as if polled too slowly.
    lines.pos = 2;
    while !lines.is_done() {
        keyboard.poll(&mut lines);
    }
    // Ten of eleven edges seen: the frame is still open.
    assert_eq!(keyboard.decoder().bit_index(), 10);
    assert_eq!(keyboard.state().keys(), [0; 6]);
}
