/// A structure for easily splitting an opcode
/// into the fields used when decoding it,
/// such as nibbles, the low byte or the low 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nibbles(u8, u8);

impl Nibbles {

    pub fn from_u16(value: u16) -> Nibbles {
        Nibbles((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(high: u8, low: u8) -> Nibbles {
        Nibbles(high, low)
    }

    /// Left-shift the high byte 8 bits,
    /// then take bitwise or with the low byte.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// All four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    /// The `X` register nibble.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// The `Y` register nibble.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// The `N` constant.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    /// The `NN` constant.
    pub fn nn(&self) -> u8 {
        self.1
    }

    /// The `NNN` address.
    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}
