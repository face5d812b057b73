//! Shared vocabulary for decoded input: logical keys, buttons, axes, the
//! normalized event type, and the sink boundary that consumes it.
//!
//! Decoders hand events to an [`EventSink`] by value, one at a time, in
//! synthesis order. Every complete physical sample (one key transition, one
//! mouse packet) is terminated by [`InputEvent::Sync`]; consumers may rely on
//! having seen all state for the sample once the sync marker arrives.

/// Logical key identity for every populated slot of the simulated keyboard's
/// scan-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Esc,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,
    Minus,
    Equal,
    Backspace,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LeftBrace,
    RightBrace,
    Enter,
    LeftCtrl,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Apostrophe,
    Grave,
    LeftShift,
    Backslash,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Dot,
    Slash,
    RightShift,
    KpAsterisk,
    LeftAlt,
    Space,
    CapsLock,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
}

impl Key {
    /// Whether this key participates in the keyboard's shift latch.
    pub fn is_shift(self) -> bool {
        matches!(self, Key::LeftShift | Key::RightShift)
    }

    /// Stable display name, e.g. for human-readable event output.
    pub fn as_str(self) -> &'static str {
        match self {
            Key::Esc => "ESC",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num6 => "6",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Num9 => "9",
            Key::Num0 => "0",
            Key::Minus => "MINUS",
            Key::Equal => "EQUAL",
            Key::Backspace => "BACKSPACE",
            Key::Tab => "TAB",
            Key::Q => "Q",
            Key::W => "W",
            Key::E => "E",
            Key::R => "R",
            Key::T => "T",
            Key::Y => "Y",
            Key::U => "U",
            Key::I => "I",
            Key::O => "O",
            Key::P => "P",
            Key::LeftBrace => "LEFT_BRACE",
            Key::RightBrace => "RIGHT_BRACE",
            Key::Enter => "ENTER",
            Key::LeftCtrl => "LEFT_CTRL",
            Key::A => "A",
            Key::S => "S",
            Key::D => "D",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::Semicolon => "SEMICOLON",
            Key::Apostrophe => "APOSTROPHE",
            Key::Grave => "GRAVE",
            Key::LeftShift => "LEFT_SHIFT",
            Key::Backslash => "BACKSLASH",
            Key::Z => "Z",
            Key::X => "X",
            Key::C => "C",
            Key::V => "V",
            Key::B => "B",
            Key::N => "N",
            Key::M => "M",
            Key::Comma => "COMMA",
            Key::Dot => "DOT",
            Key::Slash => "SLASH",
            Key::RightShift => "RIGHT_SHIFT",
            Key::KpAsterisk => "KEYPAD_ASTERISK",
            Key::LeftAlt => "LEFT_ALT",
            Key::Space => "SPACE",
            Key::CapsLock => "CAPS_LOCK",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
        }
    }
}

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Middle,
}

impl Button {
    pub fn as_str(self) -> &'static str {
        match self {
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
            Button::Middle => "MIDDLE",
        }
    }
}

/// Relative motion axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
        }
    }
}

/// One normalized input event, as handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key state transition. Repeated identical presses are reported as-is;
    /// auto-repeat handling is the sink's concern.
    Key { key: Key, pressed: bool },
    /// Pointer button state. Reported unconditionally on every mouse sample,
    /// matching the wire semantics (not edge-triggered).
    Button { button: Button, pressed: bool },
    /// Relative pointer motion along one axis.
    Motion { axis: Axis, delta: i32 },
    /// Terminates the event group for one physical sample.
    Sync,
}

/// Receiver side of the decoding pipeline.
///
/// Called from the consumer context only, one event at a time, in synthesis
/// order.
pub trait EventSink {
    fn handle_event(&mut self, event: InputEvent);
}

/// Collecting sink, mostly useful in tests and batch consumers.
impl EventSink for Vec<InputEvent> {
    fn handle_event(&mut self, event: InputEvent) {
        self.push(event);
    }
}
