//! Scan-code translation for the simulated keyboard.
//!
//! The wire protocol is single-byte make/break codes: the low 7 bits identify
//! the key, the high bit distinguishes release from press. Translation is
//! stateless per byte; the only state carried across bytes is the shift latch
//! and a diagnostic counter.

use vinput_events::{EventSink, InputEvent, Key};

use crate::controller::ProtocolDecoder;

/// High bit of a scan code marks a key release.
pub const RELEASE_BIT: u8 = 0x80;

/// Translates a 7-bit make code to its logical key.
///
/// Only 0x01..=0x44 is populated; everything else has no mapping and is
/// discarded by the decoder. Absence is the "unmapped" sentinel, so no real
/// key identity can collide with it.
pub fn key_for_scancode(code: u8) -> Option<Key> {
    let key = match code {
        0x01 => Key::Esc,
        0x02 => Key::Num1,
        0x03 => Key::Num2,
        0x04 => Key::Num3,
        0x05 => Key::Num4,
        0x06 => Key::Num5,
        0x07 => Key::Num6,
        0x08 => Key::Num7,
        0x09 => Key::Num8,
        0x0A => Key::Num9,
        0x0B => Key::Num0,
        0x0C => Key::Minus,
        0x0D => Key::Equal,
        0x0E => Key::Backspace,
        0x0F => Key::Tab,
        0x10 => Key::Q,
        0x11 => Key::W,
        0x12 => Key::E,
        0x13 => Key::R,
        0x14 => Key::T,
        0x15 => Key::Y,
        0x16 => Key::U,
        0x17 => Key::I,
        0x18 => Key::O,
        0x19 => Key::P,
        0x1A => Key::LeftBrace,
        0x1B => Key::RightBrace,
        0x1C => Key::Enter,
        0x1D => Key::LeftCtrl,
        0x1E => Key::A,
        0x1F => Key::S,
        0x20 => Key::D,
        0x21 => Key::F,
        0x22 => Key::G,
        0x23 => Key::H,
        0x24 => Key::J,
        0x25 => Key::K,
        0x26 => Key::L,
        0x27 => Key::Semicolon,
        0x28 => Key::Apostrophe,
        0x29 => Key::Grave,
        0x2A => Key::LeftShift,
        0x2B => Key::Backslash,
        0x2C => Key::Z,
        0x2D => Key::X,
        0x2E => Key::C,
        0x2F => Key::V,
        0x30 => Key::B,
        0x31 => Key::N,
        0x32 => Key::M,
        0x33 => Key::Comma,
        0x34 => Key::Dot,
        0x35 => Key::Slash,
        0x36 => Key::RightShift,
        0x37 => Key::KpAsterisk,
        0x38 => Key::LeftAlt,
        0x39 => Key::Space,
        0x3A => Key::CapsLock,
        0x3B => Key::F1,
        0x3C => Key::F2,
        0x3D => Key::F3,
        0x3E => Key::F4,
        0x3F => Key::F5,
        0x40 => Key::F6,
        0x41 => Key::F7,
        0x42 => Key::F8,
        0x43 => Key::F9,
        0x44 => Key::F10,
        _ => return None,
    };
    Some(key)
}

/// Keyboard protocol decoder.
#[derive(Debug, Default)]
pub struct KeyboardDecoder {
    shift_pressed: bool,
    unmapped: u64,
}

impl KeyboardDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latched state of either shift key. Diagnostic only; it does not alter
    /// how other keys decode.
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }
}

impl ProtocolDecoder for KeyboardDecoder {
    fn feed(&mut self, byte: u8, sink: &mut dyn EventSink) {
        let release = byte & RELEASE_BIT != 0;
        let code = byte & !RELEASE_BIT;

        let Some(key) = key_for_scancode(code) else {
            // Releases of unmapped codes are discarded the same as presses.
            tracing::debug!("no mapping for scan code {code:#04x}");
            self.unmapped += 1;
            return;
        };

        if key.is_shift() {
            self.shift_pressed = !release;
        }

        sink.handle_event(InputEvent::Key {
            key,
            pressed: !release,
        });
        sink.handle_event(InputEvent::Sync);
    }

    fn bad_input(&self) -> u64 {
        self.unmapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_exactly_the_populated_range() {
        for code in 0x01..=0x44u8 {
            assert!(key_for_scancode(code).is_some(), "code {code:#04x}");
        }
        assert_eq!(key_for_scancode(0x00), None);
        for code in 0x45..=0x7Fu8 {
            assert_eq!(key_for_scancode(code), None, "code {code:#04x}");
        }
    }

    #[test]
    fn spot_check_well_known_codes() {
        assert_eq!(key_for_scancode(0x01), Some(Key::Esc));
        assert_eq!(key_for_scancode(0x1E), Some(Key::A));
        assert_eq!(key_for_scancode(0x2A), Some(Key::LeftShift));
        assert_eq!(key_for_scancode(0x39), Some(Key::Space));
        assert_eq!(key_for_scancode(0x44), Some(Key::F10));
    }

    #[test]
    fn press_and_release_polarity() {
        let mut decoder = KeyboardDecoder::new();
        let mut events: Vec<InputEvent> = Vec::new();

        decoder.feed(0x1E, &mut events);
        decoder.feed(0x1E | RELEASE_BIT, &mut events);

        assert_eq!(
            events,
            vec![
                InputEvent::Key {
                    key: Key::A,
                    pressed: true
                },
                InputEvent::Sync,
                InputEvent::Key {
                    key: Key::A,
                    pressed: false
                },
                InputEvent::Sync,
            ]
        );
    }

    #[test]
    fn shift_latch_follows_shift_transitions_only() {
        let mut decoder = KeyboardDecoder::new();
        let mut events: Vec<InputEvent> = Vec::new();

        assert!(!decoder.shift_pressed());

        decoder.feed(0x2A, &mut events); // left shift make
        assert!(decoder.shift_pressed());

        decoder.feed(0x1E, &mut events); // unrelated key leaves the latch alone
        assert!(decoder.shift_pressed());

        decoder.feed(0x2A | RELEASE_BIT, &mut events);
        assert!(!decoder.shift_pressed());

        decoder.feed(0x36, &mut events); // right shift latches too
        assert!(decoder.shift_pressed());
        decoder.feed(0x36 | RELEASE_BIT, &mut events);
        assert!(!decoder.shift_pressed());
    }

    #[test]
    fn unmapped_codes_produce_no_events() {
        let mut decoder = KeyboardDecoder::new();
        let mut events: Vec<InputEvent> = Vec::new();

        decoder.feed(0x4F, &mut events);
        decoder.feed(0x4F | RELEASE_BIT, &mut events);

        assert!(events.is_empty());
        assert_eq!(decoder.bad_input(), 2);
    }
}
