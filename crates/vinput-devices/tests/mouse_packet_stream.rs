use vinput_devices::mouse::PACKET_SIZE;
use vinput_devices::{mouse_controller, DeviceController, MouseDecoder, MousePacket, PacketFlags};
use vinput_events::{Axis, Button, InputEvent};

fn drain(controller: &mut DeviceController<MouseDecoder>) -> Vec<InputEvent> {
    let mut events = Vec::new();
    controller.drain_and_process(&mut events);
    events
}

#[test]
fn left_button_with_motion_decodes_in_documented_order() {
    let mut controller = mouse_controller();

    // Marker bit set, left pressed, dx = +16, raw dy = -16 (reports as +16).
    controller.inject(&[0x09, 0x10, 0xF0]);

    assert_eq!(
        drain(&mut controller),
        vec![
            InputEvent::Button {
                button: Button::Left,
                pressed: true
            },
            InputEvent::Button {
                button: Button::Right,
                pressed: false
            },
            InputEvent::Button {
                button: Button::Middle,
                pressed: false
            },
            InputEvent::Motion {
                axis: Axis::X,
                delta: 16
            },
            InputEvent::Motion {
                axis: Axis::Y,
                delta: 16
            },
            InputEvent::Sync,
        ]
    );
}

#[test]
fn invalid_packet_yields_no_events_and_resets_the_accumulator() {
    let mut controller = mouse_controller();

    controller.inject(&[0x00, 0x10, 0x10]);
    assert!(drain(&mut controller).is_empty());
    assert_eq!(controller.stats().bad_input, 1);

    // The accumulator restarted at index 0: a following valid packet decodes.
    controller.inject(&[0x0B, 0x02, 0x00]);
    let events = drain(&mut controller);
    assert_eq!(
        events,
        vec![
            InputEvent::Button {
                button: Button::Left,
                pressed: true
            },
            InputEvent::Button {
                button: Button::Right,
                pressed: true
            },
            InputEvent::Button {
                button: Button::Middle,
                pressed: false
            },
            InputEvent::Motion {
                axis: Axis::X,
                delta: 2
            },
            InputEvent::Sync,
        ]
    );
}

#[test]
fn packet_split_across_drains_still_assembles() {
    let mut controller = mouse_controller();

    controller.inject(&[0x08, 0x05]);
    assert!(drain(&mut controller).is_empty(), "incomplete packet");

    controller.inject(&[0x00]);
    let events = drain(&mut controller);
    assert_eq!(events.len(), 5); // three buttons + X motion + sync
    assert_eq!(
        events[3],
        InputEvent::Motion {
            axis: Axis::X,
            delta: 5
        }
    );
}

#[test]
fn decode_then_resynthesize_matches_the_wire_bits() {
    // Sweep a representative set of packets and check the round trip against
    // the bit layout directly.
    let samples: [[u8; PACKET_SIZE]; 6] = [
        [0x08, 0x00, 0x00],
        [0x09, 0x7F, 0x01],
        [0x0A, 0x80, 0xFF],
        [0x0C, 0x01, 0x80],
        [0x0F, 0xF0, 0x10],
        [(PacketFlags::ALWAYS_ONE | PacketFlags::X_OVERFLOW | PacketFlags::Y_OVERFLOW).bits(), 0xFF, 0xFF],
    ];

    for bytes in samples {
        let packet = MousePacket::parse(bytes).expect("marker bit set in every sample");
        let flags = PacketFlags::from_bits_retain(bytes[0]);

        assert_eq!(packet.left, flags.contains(PacketFlags::LEFT), "{bytes:02x?}");
        assert_eq!(packet.right, flags.contains(PacketFlags::RIGHT), "{bytes:02x?}");
        assert_eq!(packet.middle, flags.contains(PacketFlags::MIDDLE), "{bytes:02x?}");
        assert_eq!(packet.dx, i32::from(bytes[1] as i8), "{bytes:02x?}");
        assert_eq!(packet.dy, -i32::from(bytes[2] as i8), "{bytes:02x?}");
        assert_eq!(packet.x_overflow, flags.contains(PacketFlags::X_OVERFLOW));
        assert_eq!(packet.y_overflow, flags.contains(PacketFlags::Y_OVERFLOW));

        let mut events: Vec<InputEvent> = Vec::new();
        packet.synthesize(&mut events);

        // Button states come back out exactly as parsed, before any motion.
        assert_eq!(
            events[0],
            InputEvent::Button {
                button: Button::Left,
                pressed: packet.left
            }
        );
        assert_eq!(events.last(), Some(&InputEvent::Sync));
        let motions = events
            .iter()
            .filter(|e| matches!(e, InputEvent::Motion { .. }))
            .count();
        let expected = usize::from(packet.dx != 0) + usize::from(packet.dy != 0);
        assert_eq!(motions, expected, "{bytes:02x?}");
    }
}
