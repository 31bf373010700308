//! The 4 KiB address space, with the built-in font at the bottom
//! and programs loaded at 0x200.

use crate::emulator::error::{EmulatorError, Result};

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: usize = 0x200;
pub const PROGRAM_SIZE: usize = MEM_SIZE - PROGRAM_START;

/// Bytes per font glyph.
pub const GLYPH_SIZE: usize = 5;

pub static FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {

    /// Create a memory holding only the font.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Copy a program into memory at 0x200.
    /// The program region is zero-filled past the end of `program`,
    /// and anything that does not fit is dropped.
    pub fn load_rom(&mut self, program: &[u8]) {
        let len = program.len().min(PROGRAM_SIZE);
        if program.len() > PROGRAM_SIZE {
            log::warn!("Program is {} bytes, truncating to {}", program.len(), PROGRAM_SIZE);
        }
        let region = &mut self.bytes[PROGRAM_START..];
        region[..len].copy_from_slice(&program[..len]);
        for byte in &mut region[len..] {
            *byte = 0;
        }
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(EmulatorError::MemoryOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let byte = self
            .bytes
            .get_mut(address)
            .ok_or(EmulatorError::MemoryOutOfBounds { address })?;
        *byte = value;
        Ok(())
    }

    /// The whole address space.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_with_font_only() {
        let memory = Memory::new();
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn load_rom_zero_pads() {
        let mut memory = Memory::new();
        memory.load_rom(&[0xFF; 10]);
        memory.load_rom(&[0x12, 0x34]);
        assert_eq!(memory.read(0x200), Ok(0x12));
        assert_eq!(memory.read(0x201), Ok(0x34));
        assert_eq!(memory.read(0x202), Ok(0));
        assert_eq!(memory.read(0x209), Ok(0));
    }

    #[test]
    fn load_rom_truncates() {
        let mut memory = Memory::new();
        let program = vec![0xAB; PROGRAM_SIZE + 100];
        memory.load_rom(&program);
        assert_eq!(memory.read(MEM_SIZE - 1), Ok(0xAB));
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
    }

    #[test]
    fn load_rom_leaves_reserved_region() {
        let mut memory = Memory::new();
        memory.write(0x100, 0x42).unwrap();
        memory.load_rom(&[1, 2, 3]);
        assert_eq!(memory.read(0x100), Ok(0x42));
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut memory = Memory::new();
        assert_eq!(memory.read(MEM_SIZE), Err(EmulatorError::MemoryOutOfBounds { address: MEM_SIZE }));
        assert_eq!(memory.write(0x2000, 1), Err(EmulatorError::MemoryOutOfBounds { address: 0x2000 }));
    }
}
