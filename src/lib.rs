/*!

The execution core of a CHIP-8 virtual machine, as specified at https://en.wikipedia.org/wiki/CHIP-8.

The machine is a `Cpu` running against a bus of memory, a 64x32 framebuffer,
a pair of 64 Hz countdown timers and a 16-key keypad.
Everything around it (a window, a speaker, reading ROM files, mapping keyboards)
is left to the host, which talks to the `Machine`.

# Headless runner

To run a program without any frontend and dump the final screen, use
`cargo run --release --bin headless -- <program>`.
Set `RUST_LOG=trace` to see every executed instruction.

# Library

The main way of running a program is to load it as bytes and step the machine.

```rust
use chip_8_vm::emulator::Machine;

let mut machine = Machine::new();

// Load a program at address 0x200.
let set_va_to_5 = [0x6A, 0x05];
machine.load_rom(&set_va_to_5);
machine.step().unwrap();

assert_eq!(machine.cpu().register(0xA), Ok(5));
assert_eq!(machine.cpu().program_counter(), 0x202);
```

## Input and output

Key events go in through `update_key_state`, and the screen comes out as RGB bytes.

```rust
use chip_8_vm::emulator::{Machine, Quirks};

let mut machine = Machine::with_quirks(Quirks { shift: true, vblank_wait: false });

// Wait for a key into V0, then draw the glyph for that key
machine.load_rom(&[0xF0, 0x0A, 0xF0, 0x29, 0xD1, 0x15]);
machine.step().unwrap();
machine.update_key_state(0x7, true).unwrap();
for _ in 0..2 {
    machine.step().unwrap();
}

let screen = machine.framebuffer();
assert_eq!(screen.len(), 64 * 32 * 3);
assert!(machine.graphics().is_pixel_on(0, 0));
```

The CPU only sees the hardware through the `Bus` trait in `emulator::bus`,
so it can also be driven against a bus of your own.
*/

pub mod emulator;
pub mod util;
