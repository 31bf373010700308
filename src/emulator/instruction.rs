use crate::util::nibbles::Nibbles;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    Unknown(u16),
}

impl Instruction {

    pub fn from_u16(value: u16) -> Instruction {
        Instruction::decode(Nibbles::from_u16(value))
    }

    pub fn from_two_u8(high: u8, low: u8) -> Instruction {
        Instruction::decode(Nibbles::new(high, low))
    }

    /// Decode on the high nibble, then on the low nibble or byte where a group shares one.
    /// Fields that do not select an instruction are ignored.
    fn decode(opcode: Nibbles) -> Instruction {
        let nnn = Addr(opcode.nnn());
        let nn = Const(opcode.nn());
        let (x, y) = (Reg(opcode.x()), Reg(opcode.y()));
        match (opcode.as_four_u8().0, opcode.n()) {
            (0, 0) => Instruction::ClearScreen,
            (0, 0xE) => Instruction::Return,
            (1, _) => Instruction::Goto(nnn),
            (2, _) => Instruction::Call(nnn),
            (3, _) => Instruction::IfRegEqConst(x, nn),
            (4, _) => Instruction::IfRegNeqConst(x, nn),
            (5, _) => Instruction::IfRegEqReg(x, y),
            (6, _) => Instruction::SetRegToConst(x, nn),
            (7, _) => Instruction::IncRegByConst(x, nn),
            (8, 0) => Instruction::SetRegToReg(x, y),
            (8, 1) => Instruction::BitwiseOr(x, y),
            (8, 2) => Instruction::BitwiseAnd(x, y),
            (8, 3) => Instruction::BitwiseXor(x, y),
            (8, 4) => Instruction::IncRegByReg(x, y),
            (8, 5) => Instruction::DecRegByReg(x, y),
            (8, 6) => Instruction::BitshiftRight(x, y),
            (8, 7) => Instruction::SetVxVyMinusVx(x, y),
            (8, 0xE) => Instruction::BitshiftLeft(x, y),
            (9, _) => Instruction::IfRegNeqReg(x, y),
            (0xA, _) => Instruction::SetI(nnn),
            (0xB, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, _) => Instruction::SetVxRand(x, nn),
            (0xD, n) => Instruction::Draw(x, y, Const(n)),
            (0xE, 0xE) => Instruction::IfKeyEqVx(x),
            (0xE, 1) => Instruction::IfKeyNeqVx(x),
            (0xF, _) => match opcode.nn() {
                0x07 => Instruction::SetRegToDelayTimer(x),
                0x0A => Instruction::SetRegToGetKey(x),
                0x15 => Instruction::SetDelayTimerToReg(x),
                0x18 => Instruction::SetSoundTimerToReg(x),
                0x1E => Instruction::AddRegToI(x),
                0x29 => Instruction::SetIToSpriteAddrVx(x),
                0x33 => Instruction::SetIToBcdOfReg(x),
                0x55 => Instruction::RegDump(x),
                0x65 => Instruction::RegLoad(x),
                _ => Instruction::Unknown(opcode.as_u16()),
            },
            _ => Instruction::Unknown(opcode.as_u16()),
        }
    }
}
