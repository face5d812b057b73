//! Device models for two simulated PS/2-class input peripherals (keyboard and
//! mouse) and the producer/consumer pipeline they share.
//!
//! Each device owns one bounded byte ring. The producer side
//! ([`DeviceController::inject`] / [`DeviceWorker::inject`]) only enqueues raw
//! wire bytes and never decodes; the consumer side drains the ring to empty
//! and runs the device's protocol decoder, emitting normalized events to an
//! [`vinput_events::EventSink`]. Decoding state never leaves the consumer
//! context, so the ring is the only structure the two contexts share.

mod controller;
pub mod keyboard;
pub mod mouse;
mod worker;

pub use controller::{DeviceController, DeviceInjector, DeviceStats, ProtocolDecoder};
pub use keyboard::KeyboardDecoder;
pub use mouse::{MouseDecoder, MousePacket, PacketFlags};
pub use worker::DeviceWorker;

/// Default ring capacity for the keyboard (single-byte protocol units).
pub const KEYBOARD_BUFFER_SIZE: usize = 128;

/// Default ring capacity for the mouse (3-byte packet protocol).
pub const MOUSE_BUFFER_SIZE: usize = 256;

/// A keyboard controller with the default buffer capacity.
pub fn keyboard_controller() -> DeviceController<KeyboardDecoder> {
    DeviceController::new("keyboard", KEYBOARD_BUFFER_SIZE, KeyboardDecoder::new())
}

/// A mouse controller with the default buffer capacity.
pub fn mouse_controller() -> DeviceController<MouseDecoder> {
    DeviceController::new("mouse", MOUSE_BUFFER_SIZE, MouseDecoder::new())
}
