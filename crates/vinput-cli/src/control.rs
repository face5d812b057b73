//! Line-oriented control protocol for byte injection.
//!
//! One command per line:
//! - `kbd <byte>` injects a single keyboard scan code.
//! - `mouse <b0> <b1> <b2>` injects one complete 3-byte mouse packet.
//! - `quit` / `exit` ends the session.
//!
//! Byte values accept `0x`-prefixed hex or decimal. A malformed line is
//! rejected as a whole and must have no side effect on any device.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("missing byte value")]
    MissingArgument,
    #[error("unexpected trailing input")]
    TrailingInput,
    #[error("invalid byte value {0:?}")]
    InvalidByte(String),
    #[error("byte value {0} out of range (must be 0-255)")]
    ByteOutOfRange(u64),
    #[error("expected 3 packet bytes, got {0}")]
    WrongPacketLength(usize),
}

/// A parsed control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Inject one keyboard scan code.
    Keyboard(u8),
    /// Inject one complete 3-byte mouse packet.
    Mouse([u8; 3]),
    /// End the session.
    Quit,
    /// Blank line or comment; nothing to do.
    Nop,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ControlError> {
        let mut tokens = line.split_whitespace();
        let Some(cmd) = tokens.next() else {
            return Ok(Self::Nop);
        };
        if cmd.starts_with('#') {
            return Ok(Self::Nop);
        }

        match cmd {
            "kbd" | "keyboard" => {
                let byte = parse_byte(tokens.next().ok_or(ControlError::MissingArgument)?)?;
                if tokens.next().is_some() {
                    return Err(ControlError::TrailingInput);
                }
                Ok(Self::Keyboard(byte))
            }
            "mouse" => {
                let raw: Vec<&str> = tokens.collect();
                if raw.len() != 3 {
                    return Err(ControlError::WrongPacketLength(raw.len()));
                }
                let mut bytes = [0u8; 3];
                for (slot, token) in bytes.iter_mut().zip(&raw) {
                    *slot = parse_byte(token)?;
                }
                Ok(Self::Mouse(bytes))
            }
            "quit" | "exit" => {
                if tokens.next().is_some() {
                    return Err(ControlError::TrailingInput);
                }
                Ok(Self::Quit)
            }
            other => Err(ControlError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_byte(token: &str) -> Result<u8, ControlError> {
    let value = if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        token.parse::<u64>()
    }
    .map_err(|_| ControlError::InvalidByte(token.to_string()))?;

    u8::try_from(value).map_err(|_| ControlError::ByteOutOfRange(value))
}
