use chip_8_vm::emulator::memory::FONT;
use chip_8_vm::emulator::{EmulatorError, Machine};
use pretty_assertions::assert_eq;

fn machine_with(program: &[u8]) -> Machine {
    let mut machine = Machine::new();
    machine.load_rom(program);
    machine
}

#[test]
fn set_register_set_i_and_draw_glyph() {
    let mut machine = machine_with(&[0x6A, 0x05, 0xA0, 0x00, 0xD0, 0xA5]);

    machine.step().unwrap();
    assert_eq!(machine.cpu().register(0xA), Ok(5));
    assert_eq!(machine.cpu().program_counter(), 0x202);

    machine.step().unwrap();
    assert_eq!(machine.cpu().i(), 0);

    machine.step().unwrap();
    assert_eq!(machine.cpu().register(0xF), Ok(0));

    // The "0" glyph at (V0, VA) = (0, 5)
    let foreground = machine.graphics().foreground_color();
    for (row, byte) in FONT[..5].iter().enumerate() {
        for bit in 0..8 {
            let on = byte & (0x80 >> bit) != 0;
            assert_eq!(machine.graphics().is_pixel_on(bit, 5 + row), on);
            if on {
                assert_eq!(machine.graphics().pixel(bit, 5 + row), Some(foreground));
            }
        }
    }
}

#[test]
fn skip_if_equal() {
    let mut machine = machine_with(&[0x6A, 0x05, 0x3A, 0x05]);
    machine.step().unwrap();
    machine.step().unwrap();
    assert_eq!(machine.cpu().program_counter(), 0x206);

    let mut machine = machine_with(&[0x6A, 0x04, 0x3A, 0x05]);
    machine.step().unwrap();
    machine.step().unwrap();
    assert_eq!(machine.cpu().program_counter(), 0x204);
}

#[test]
fn register_dump_and_load_round_trip() {
    let mut machine = machine_with(&[
        0x60, 0x01, 0x61, 0x02, 0x62, 0x03, 0x63, 0x04, 0x64, 0x05, 0x65, 0x06,
        0xA3, 0x00, // I = 0x300
        0xF5, 0x55, // store V0..V5
        0x60, 0xFF, 0x63, 0xFF, 0x65, 0xFF,
        0xA3, 0x00,
        0xF5, 0x65, // load V0..V5
    ]);
    for _ in 0..8 {
        machine.step().unwrap();
    }
    let i_after_store = machine.cpu().i();
    assert_eq!(i_after_store, 0x306);

    for _ in 0..5 {
        machine.step().unwrap();
    }
    assert_eq!(&machine.cpu().registers()[..6], &[1, 2, 3, 4, 5, 6]);
    assert_eq!(machine.cpu().i(), i_after_store);
}

#[test]
fn call_stack_errors_leave_machine_usable() {
    let mut machine = machine_with(&[0x00, 0xEE]);
    assert_eq!(machine.step(), Err(EmulatorError::StackUnderflow { address: 0x200 }));
    assert_eq!(machine.cpu().program_counter(), 0x200);

    machine.reset_and_load(&[0x6B, 0x01]);
    machine.step().unwrap();
    assert_eq!(machine.cpu().register(0xB), Ok(1));
}

#[test]
fn key_wait_ignores_releases() {
    let mut machine = machine_with(&[0xF2, 0x0A]);
    machine.update_key_state(4, true).unwrap();
    machine.step().unwrap();
    machine.update_key_state(4, false).unwrap();
    machine.step().unwrap();
    assert_eq!(machine.cpu().register(2), Ok(0));

    machine.update_key_state(4, true).unwrap();
    machine.step().unwrap();
    assert_eq!(machine.cpu().register(2), Ok(4));
}

#[test]
fn bad_key_events_are_rejected() {
    let mut machine = Machine::new();
    assert_eq!(machine.update_key_state(0x10, true), Err(EmulatorError::KeyOutOfRange { key: 0x10 }));
}

#[test]
fn trace_is_bounded() {
    // Jump to self forever
    let mut machine = machine_with(&[0x12, 0x00]);
    for _ in 0..150 {
        machine.step().unwrap();
    }
    assert_eq!(machine.trace().len(), 100);
    assert_eq!(machine.trace().latest().map(|e| e.description.as_str()), Some("Jump to 0x0200"));
}
