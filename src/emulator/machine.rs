//! The whole virtual machine, as seen by a host.

use crate::emulator::bus::SystemBus;
use crate::emulator::cpu::{Cpu, Quirks};
use crate::emulator::error::Result;
use crate::emulator::graphics::{Graphics, Rgb};
use crate::emulator::trace::Trace;

/// A CPU together with the hardware it runs on.
///
/// The host drives it by calling `step` repeatedly, feeding key events
/// through `update_key_state`, and reading the screen and timers back out.
#[derive(Default)]
pub struct Machine {
    cpu: Cpu,
    bus: SystemBus,
}

impl Machine {

    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn with_quirks(quirks: Quirks) -> Machine {
        Machine {
            cpu: Cpu::with_quirks(quirks),
            bus: SystemBus::new(),
        }
    }

    /// Perform a single step, which will update timers,
    /// then run at most one instruction.
    pub fn step(&mut self) -> Result<()> {
        self.bus.clock.update();
        self.cpu.cycle(&mut self.bus)
    }

    /// Copy a program into memory at 0x200.
    pub fn load_rom(&mut self, program: &[u8]) {
        log::debug!("Loading {} byte program", program.len());
        self.bus.memory.load_rom(program);
    }

    pub fn update_key_state(&mut self, key: u8, pressed: bool) -> Result<()> {
        self.bus.input.update(key, pressed)
    }

    /// Start over with fresh memory, timers, keypad and CPU.
    /// The screen and the quirk settings are kept.
    pub fn reset(&mut self) {
        log::debug!("Resetting machine");
        let graphics = std::mem::take(&mut self.bus.graphics);
        self.bus = SystemBus { graphics, ..SystemBus::new() };
        self.cpu = Cpu::with_quirks(self.cpu.quirks);
    }

    pub fn reset_and_load(&mut self, program: &[u8]) {
        self.reset();
        self.load_rom(program);
    }

    /// The screen as row-major RGB bytes.
    pub fn framebuffer(&self) -> Vec<u8> {
        self.bus.graphics.as_rgb()
    }

    pub fn graphics(&self) -> &Graphics {
        &self.bus.graphics
    }

    pub fn set_foreground_color(&mut self, color: Rgb) {
        self.bus.graphics.set_foreground_color(color);
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.bus.graphics.set_background_color(color);
    }

    pub fn delay_timer(&self) -> u8 {
        self.bus.clock.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.bus.clock.sound_timer
    }

    pub fn quirks(&self) -> Quirks {
        self.cpu.quirks
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.cpu.quirks = quirks;
    }

    pub fn set_shift_quirk(&mut self, enabled: bool) {
        self.cpu.quirks.shift = enabled;
    }

    pub fn set_vblank_wait(&mut self, enabled: bool) {
        self.cpu.quirks.vblank_wait = enabled;
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn bus(&self) -> &SystemBus {
        &self.bus
    }

    /// Recently executed instructions, newest first.
    pub fn trace(&self) -> &Trace {
        self.cpu.trace()
    }
}
