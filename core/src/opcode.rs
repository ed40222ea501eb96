/// # Opcode fields
///
/// Every instruction is a 16-bit word, read as 4 nibbles `[f x y n]`:
/// - `[f___]` the family selector; applies to all opcodes
/// - `[_x__]` refers either to the register Vx or a range of registers V0..=Vx
/// - `[__y_]` refers to the register Vy
/// - `[___n]` a 4-bit count or a sub-operation within a family
/// - `[__kk]` an immediate byte, or a sub-operation within a family
/// - `[_nnn]` a 12-bit address
pub trait Opcode {
    /// All 4 nibbles, most significant first
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
