//! The CHIP-8 processor as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::bus::Bus;
use crate::emulator::error::{EmulatorError, Result};
use crate::emulator::graphics::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::emulator::input::KeyResponse;
use crate::emulator::instruction::*;
use crate::emulator::memory::{GLYPH_SIZE, MEM_SIZE, PROGRAM_START};
use crate::emulator::trace::{Trace, TraceEntry};

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
const FLAG: usize = 0xF;

/// Behaviour that differs between CHIP-8 implementations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6 and 8XYE copy VY into VX before shifting.
    pub shift: bool,
    /// DXYN waits for the next 64 Hz tick before drawing.
    pub vblank_wait: bool,
}

/// How the program counter moves after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgramCounterUpdate {
    Next,
    SkipNext,
    Jump(u16),
    /// Run the same instruction again on the next cycle.
    Stall,
}

use self::ProgramCounterUpdate::*;

pub struct Cpu {
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack_pointer: usize,
    stack: [u16; STACK_SIZE],
    awaiting_vblank: bool,
    trace: Trace,
    pub quirks: Quirks,
}

impl Cpu {

    pub fn new() -> Cpu {
        Cpu::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Cpu {
        Cpu {
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START as u16,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            awaiting_vblank: false,
            trace: Trace::new(),
            quirks,
        }
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn register(&self, index: usize) -> Result<u8> {
        self.registers
            .get(index)
            .copied()
            .ok_or(EmulatorError::RegisterOutOfBounds { index })
    }

    pub fn set_register(&mut self, index: usize, value: u8) -> Result<()> {
        let register = self
            .registers
            .get_mut(index)
            .ok_or(EmulatorError::RegisterOutOfBounds { index })?;
        *register = value;
        Ok(())
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn set_program_counter(&mut self, value: u16) {
        self.program_counter = value;
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    /// The pending return addresses, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer]
    }

    /// Recently executed instructions, newest first.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Run at most one instruction.
    ///
    /// Nothing happens while the keypad is waiting for a key press,
    /// or once the program counter has left memory.
    /// An instruction that fails has no effect and is not traced.
    pub fn cycle<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        if bus.is_waiting_for_key() {
            return Ok(());
        }

        if let Some(KeyResponse { key, register }) = bus.take_key_response() {
            self.set_register(register as usize, key)?;
        }

        if self.program_counter as usize >= MEM_SIZE {
            return Ok(());
        }

        // Each opcode is two bytes, high byte first
        let address = self.program_counter;
        let high = bus.read_byte(address as usize)?;
        let low = bus.read_byte(address as usize + 1)?;
        let opcode = u16::from_be_bytes([high, low]);
        let instruction = Instruction::from_two_u8(high, low);

        let (update, description) = self.execute(instruction, bus).map_err(|error| {
            log::error!("{:#06X}: {:04X} failed: {}", address, opcode, error);
            error
        })?;

        match update {
            Stall => return Ok(()),
            Next => self.program_counter += 2,
            SkipNext => self.program_counter += 4,
            Jump(target) => self.program_counter = target,
        }

        log::trace!("{:#06X}: {:04X} {}", address, opcode, description);
        self.trace.push(TraceEntry { address, opcode, description });

        Ok(())
    }

    /// Whether a vblank has happened since this draw started waiting.
    /// The tick made before this cycle only counts once the wait has begun.
    fn vblank_since_wait<B: Bus>(&mut self, bus: &mut B) -> bool {
        let ticked = (self.awaiting_vblank && bus.vblank()) || {
            bus.tick_clock();
            bus.vblank()
        };
        self.awaiting_vblank = !ticked;
        ticked
    }

    /// Fail unless `len` bytes starting at I are addressable.
    fn check_i_range(&self, len: usize) -> Result<()> {
        let end = self.i as usize + len;
        if len > 0 && end > MEM_SIZE {
            return Err(EmulatorError::MemoryOutOfBounds { address: end - 1 });
        }
        Ok(())
    }

    /// Execute a single instruction
    fn execute<B: Bus>(&mut self, instruction: Instruction, bus: &mut B) -> Result<(ProgramCounterUpdate, String)> {
        let v = self.registers;
        let result = match instruction {

            Instruction::ClearScreen => {
                bus.clear_screen();
                (Next, "Clear the screen".to_string())
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(EmulatorError::StackUnderflow { address: self.program_counter });
                }
                self.stack_pointer -= 1;
                let target = self.stack[self.stack_pointer];
                (Jump(target), format!("Return to {:#06X}", target))
            }

            Instruction::Goto(Addr(addr)) => (Jump(addr), format!("Jump to {:#06X}", addr)),

            // Store the return address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer == STACK_SIZE {
                    return Err(EmulatorError::StackOverflow { address: self.program_counter });
                }
                self.stack[self.stack_pointer] = self.program_counter + 2;
                self.stack_pointer += 1;
                (Jump(addr), format!("Call subroutine at {:#06X}", addr))
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => (
                skip_if(v[x as usize] == n),
                format!("Skip next if V{:X} ({}) == {}", x, v[x as usize], n),
            ),

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => (
                skip_if(v[x as usize] != n),
                format!("Skip next if V{:X} ({}) != {}", x, v[x as usize], n),
            ),

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => (
                skip_if(v[x as usize] == v[y as usize]),
                format!("Skip next if V{:X} ({}) == V{:X} ({})", x, v[x as usize], y, v[y as usize]),
            ),

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => (
                skip_if(v[x as usize] != v[y as usize]),
                format!("Skip next if V{:X} ({}) != V{:X} ({})", x, v[x as usize], y, v[y as usize]),
            ),

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
                (Next, format!("Set V{:X} to {}", x, n))
            }

            // No carry flag for this one
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = v[x as usize].wrapping_add(n);
                (Next, format!("Add {} to V{:X}", n, x))
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = v[y as usize];
                (Next, format!("Set V{:X} to V{:X} ({})", x, y, v[y as usize]))
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] = v[x as usize] | v[y as usize];
                self.registers[FLAG] = 0;
                (
                    Next,
                    format!(
                        "Set V{:X} to V{:X} OR V{:X} ({:02X} OR {:02X})",
                        x, x, y, v[x as usize], v[y as usize]
                    ),
                )
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] = v[x as usize] & v[y as usize];
                self.registers[FLAG] = 0;
                (
                    Next,
                    format!(
                        "Set V{:X} to V{:X} AND V{:X} ({:02X} AND {:02X})",
                        x, x, y, v[x as usize], v[y as usize]
                    ),
                )
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] = v[x as usize] ^ v[y as usize];
                self.registers[FLAG] = 0;
                (
                    Next,
                    format!(
                        "Set V{:X} to V{:X} XOR V{:X} ({:02X} XOR {:02X})",
                        x, x, y, v[x as usize], v[y as usize]
                    ),
                )
            }

            // VF is set to 1 on carry
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = v[x as usize].overflowing_add(v[y as usize]);
                self.registers[x as usize] = sum;
                self.registers[FLAG] = carry as u8;
                (Next, format!("Set V{:X} to {} + {}, VF = {}", x, v[x as usize], v[y as usize], carry as u8))
            }

            // VF is set to 0 on borrow, 1 otherwise
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (difference, borrow) = v[x as usize].overflowing_sub(v[y as usize]);
                self.registers[x as usize] = difference;
                self.registers[FLAG] = !borrow as u8;
                (Next, format!("Set V{:X} to {} - {}, VF = {}", x, v[x as usize], v[y as usize], !borrow as u8))
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (difference, borrow) = v[y as usize].overflowing_sub(v[x as usize]);
                self.registers[x as usize] = difference;
                self.registers[FLAG] = !borrow as u8;
                (Next, format!("Set V{:X} to {} - {}, VF = {}", x, v[y as usize], v[x as usize], !borrow as u8))
            }

            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let source = if self.quirks.shift { v[y as usize] } else { v[x as usize] };
                let shifted_out = source & 1;
                self.registers[x as usize] = source >> 1;
                self.registers[FLAG] = shifted_out;
                (Next, format!("Shift V{:X} right, VF = {}", x, shifted_out))
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let source = if self.quirks.shift { v[y as usize] } else { v[x as usize] };
                let shifted_out = source >> 7;
                self.registers[x as usize] = source << 1;
                self.registers[FLAG] = shifted_out;
                (Next, format!("Shift V{:X} left, VF = {}", x, shifted_out))
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
                (Next, format!("Set I to {:#06X}", addr))
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                let target = addr + v[0] as u16;
                (Jump(target), format!("Jump to {:#06X} + {:#04X}", addr, v[0]))
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let random = rand::random::<u8>();
                self.registers[x as usize] = random & n;
                (Next, format!("Set V{:X} to {} [rand] AND {:#04X}", x, random, n))
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                if self.quirks.vblank_wait && !self.vblank_since_wait(bus) {
                    return Ok((Stall, "Wait for vblank".to_string()));
                }

                // The start point wraps around, the sprite itself is clipped
                let x_coord = v[x as usize] as usize % SCREEN_WIDTH;
                let y_coord = v[y as usize] as usize % SCREEN_HEIGHT;
                let rows = sprite_height as usize;
                self.check_i_range(rows)?;

                let mut any_collisions = false;
                for row in 0..rows {
                    let data = bus.read_byte(self.i as usize + row)?;
                    any_collisions |= bus.draw_byte(x_coord, y_coord + row, data);
                }

                // Set VF collision flag
                self.registers[FLAG] = any_collisions as u8;
                (Next, format!("Draw {} byte sprite from {:#06X} at ({}, {})", rows, self.i, x_coord, y_coord))
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                let pressed = bus.is_key_pressed(v[x as usize])?;
                (skip_if(pressed), format!("Skip next if key {:X} is pressed ({})", v[x as usize], pressed))
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                let pressed = bus.is_key_pressed(v[x as usize])?;
                (skip_if(!pressed), format!("Skip next if key {:X} is not pressed ({})", v[x as usize], !pressed))
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                let delay = bus.delay_timer();
                self.registers[x as usize] = delay;
                (Next, format!("Set V{:X} to delay timer ({})", x, delay))
            }

            // Blocks further cycles until the keypad resolves the request
            Instruction::SetRegToGetKey(Reg(x)) => {
                bus.request_key_press(x);
                (Next, format!("Store next key press in V{:X}", x))
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                bus.set_delay_timer(v[x as usize]);
                (Next, format!("Set delay timer to V{:X} ({})", x, v[x as usize]))
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                bus.set_sound_timer(v[x as usize]);
                (Next, format!("Set sound timer to V{:X} ({})", x, v[x as usize]))
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(v[x as usize] as u16);
                (Next, format!("Add V{:X} ({}) to I", x, v[x as usize]))
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = GLYPH_SIZE as u16 * v[x as usize] as u16;
                (Next, format!("Set I to sprite of digit {:X}", v[x as usize]))
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                self.check_i_range(3)?;
                let value = v[x as usize];
                let i = self.i as usize;
                bus.write_byte(i, value / 100)?;
                bus.write_byte(i + 1, value / 10 % 10)?;
                bus.write_byte(i + 2, value % 10)?;
                (Next, format!("Store BCD of {} at I", value))
            }

            // Dump register values up to Vx, moving I past them
            Instruction::RegDump(Reg(x)) => {
                let count = x as usize + 1;
                self.check_i_range(count)?;
                for reg_no in 0..count {
                    bus.write_byte(self.i as usize, v[reg_no])?;
                    self.i += 1;
                }
                (Next, format!("Store V0 to V{:X} at I", x))
            }

            // Load register values up to Vx, moving I past them
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                self.check_i_range(count)?;
                for reg_no in 0..count {
                    self.registers[reg_no] = bus.read_byte(self.i as usize)?;
                    self.i += 1;
                }
                (Next, format!("Load V0 to V{:X} from I", x))
            }

            Instruction::Unknown(opcode) => {
                log::warn!("Unknown opcode {:#06x} at {:#06x}", opcode, self.program_counter);
                (Next, "Invalid instruction".to_string())
            }
        };

        Ok(result)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_if(condition: bool) -> ProgramCounterUpdate {
    if condition {
        SkipNext
    } else {
        Next
    }
}
