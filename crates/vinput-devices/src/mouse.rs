//! 3-byte packet assembly and parsing for the simulated mouse.
//!
//! Wire format:
//! - byte 0: `[y_ovf | x_ovf | y_sign | x_sign | 1 | middle | right | left]`
//! - byte 1: X movement, 8-bit two's complement
//! - byte 2: Y movement, 8-bit two's complement; wire Y grows downward, the
//!   logical convention reported to sinks grows upward

use bitflags::bitflags;
use vinput_events::{Axis, Button, EventSink, InputEvent};

use crate::controller::ProtocolDecoder;

/// Bytes per packet.
pub const PACKET_SIZE: usize = 3;

bitflags! {
    /// Status-byte bits of a packet (byte 0).
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PacketFlags: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const ALWAYS_ONE = 1 << 3;
        const X_SIGN = 1 << 4;
        const Y_SIGN = 1 << 5;
        const X_OVERFLOW = 1 << 6;
        const Y_OVERFLOW = 1 << 7;
    }
}

/// One decoded motion/button sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MousePacket {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
    pub dx: i32,
    pub dy: i32,
    pub x_overflow: bool,
    pub y_overflow: bool,
}

impl MousePacket {
    /// Parses a complete 3-byte packet.
    ///
    /// Returns `None` when the ALWAYS_ONE marker is clear (desynchronized or
    /// corrupt stream). Motion bytes are already two's complement; the
    /// overflow bits are recorded as flags and the motion values are reported
    /// as-is, neither clamped nor suppressed.
    pub fn parse(bytes: [u8; PACKET_SIZE]) -> Option<Self> {
        let flags = PacketFlags::from_bits_retain(bytes[0]);
        if !flags.contains(PacketFlags::ALWAYS_ONE) {
            return None;
        }

        Some(Self {
            left: flags.contains(PacketFlags::LEFT),
            right: flags.contains(PacketFlags::RIGHT),
            middle: flags.contains(PacketFlags::MIDDLE),
            dx: i32::from(bytes[1] as i8),
            // Wire Y is inverted relative to the logical convention.
            dy: -i32::from(bytes[2] as i8),
            x_overflow: flags.contains(PacketFlags::X_OVERFLOW),
            y_overflow: flags.contains(PacketFlags::Y_OVERFLOW),
        })
    }

    /// Emits the packet as normalized events: the three button states in a
    /// fixed order, motion for any non-zero axis, then the sync marker.
    pub fn synthesize(&self, sink: &mut dyn EventSink) {
        sink.handle_event(InputEvent::Button {
            button: Button::Left,
            pressed: self.left,
        });
        sink.handle_event(InputEvent::Button {
            button: Button::Right,
            pressed: self.right,
        });
        sink.handle_event(InputEvent::Button {
            button: Button::Middle,
            pressed: self.middle,
        });
        if self.dx != 0 {
            sink.handle_event(InputEvent::Motion {
                axis: Axis::X,
                delta: self.dx,
            });
        }
        if self.dy != 0 {
            sink.handle_event(InputEvent::Motion {
                axis: Axis::Y,
                delta: self.dy,
            });
        }
        sink.handle_event(InputEvent::Sync);
    }
}

/// Accumulates wire bytes into 3-byte packets.
#[derive(Debug, Default)]
pub struct MouseDecoder {
    packet: [u8; PACKET_SIZE],
    packet_len: usize,
    discarded: u64,
}

impl MouseDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProtocolDecoder for MouseDecoder {
    fn feed(&mut self, byte: u8, sink: &mut dyn EventSink) {
        self.packet[self.packet_len] = byte;
        self.packet_len += 1;
        if self.packet_len < PACKET_SIZE {
            return;
        }

        // The accumulator resets after every attempt; an invalid packet is
        // discarded wholesale, with no byte-level realignment.
        self.packet_len = 0;

        match MousePacket::parse(self.packet) {
            Some(packet) => {
                if packet.x_overflow {
                    tracing::debug!("x overflow reported");
                }
                if packet.y_overflow {
                    tracing::debug!("y overflow reported");
                }
                packet.synthesize(sink);
            }
            None => {
                self.discarded += 1;
                tracing::debug!(
                    "discarding packet without ALWAYS_ONE marker: {:#04x} {:#04x} {:#04x}",
                    self.packet[0],
                    self.packet[1],
                    self.packet[2],
                );
            }
        }
    }

    fn bad_input(&self) -> u64 {
        self.discarded
    }
}
