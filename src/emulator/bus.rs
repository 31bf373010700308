//! The hardware the CPU talks to.

use crate::emulator::clock::Clock;
use crate::emulator::error::Result;
use crate::emulator::graphics::Graphics;
use crate::emulator::input::{Input, KeyResponse};
use crate::emulator::memory::Memory;

/// Everything the CPU may do to the rest of the machine during one cycle.
pub trait Bus {
    fn read_byte(&self, address: usize) -> Result<u8>;
    fn write_byte(&mut self, address: usize, value: u8) -> Result<()>;

    fn clear_screen(&mut self);
    /// XOR one sprite row onto the screen, returning whether a pixel was turned off.
    fn draw_byte(&mut self, x: usize, y: usize, data: u8) -> bool;

    fn delay_timer(&self) -> u8;
    fn set_delay_timer(&mut self, value: u8);
    fn set_sound_timer(&mut self, value: u8);
    fn tick_clock(&mut self);
    fn vblank(&self) -> bool;

    fn is_key_pressed(&self, key: u8) -> Result<bool>;
    fn request_key_press(&mut self, register: u8);
    fn is_waiting_for_key(&self) -> bool;
    fn take_key_response(&mut self) -> Option<KeyResponse>;
}

/// The machine's hardware: memory, screen, timers and keypad.
#[derive(Default)]
pub struct SystemBus {
    pub memory: Memory,
    pub graphics: Graphics,
    pub clock: Clock,
    pub input: Input,
}

impl SystemBus {
    pub fn new() -> SystemBus {
        SystemBus::default()
    }
}

impl Bus for SystemBus {
    fn read_byte(&self, address: usize) -> Result<u8> {
        self.memory.read(address)
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<()> {
        self.memory.write(address, value)
    }

    fn clear_screen(&mut self) {
        self.graphics.clear();
    }

    fn draw_byte(&mut self, x: usize, y: usize, data: u8) -> bool {
        self.graphics.draw_byte(x, y, data)
    }

    fn delay_timer(&self) -> u8 {
        self.clock.delay_timer
    }

    fn set_delay_timer(&mut self, value: u8) {
        self.clock.delay_timer = value;
    }

    fn set_sound_timer(&mut self, value: u8) {
        self.clock.sound_timer = value;
    }

    fn tick_clock(&mut self) {
        self.clock.update();
    }

    fn vblank(&self) -> bool {
        self.clock.vblank()
    }

    fn is_key_pressed(&self, key: u8) -> Result<bool> {
        self.input.is_key_pressed(key)
    }

    fn request_key_press(&mut self, register: u8) {
        self.input.request_key_press(register);
    }

    fn is_waiting_for_key(&self) -> bool {
        self.input.is_waiting()
    }

    fn take_key_response(&mut self) -> Option<KeyResponse> {
        self.input.take_response()
    }
}
