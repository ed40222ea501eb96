use crate::opcode::Opcode;

/// A decoded Chip-8 instruction and its operands
///
/// Register operands are register indices (0x0..=0xF), not register values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the display
    Clear,
    /// 00EE: pc = stack.pop()
    Return,
    /// 1NNN: pc = addr
    Jump { addr: u16 },
    /// 2NNN: stack.push(pc); pc = addr
    Call { addr: u16 },
    /// 3XKK: skip if Vx == kk
    SkipEqImm { x: u8, kk: u8 },
    /// 4XKK: skip if Vx != kk
    SkipNeImm { x: u8, kk: u8 },
    /// 5XY0: skip if Vx == Vy
    SkipEqReg { x: u8, y: u8 },
    /// 6XKK: Vx = kk
    LoadImm { x: u8, kk: u8 },
    /// 7XKK: Vx += kk, without a carry
    AddImm { x: u8, kk: u8 },
    /// 8XY0: Vx = Vy
    Move { x: u8, y: u8 },
    /// 8XY1: Vx |= Vy
    Or { x: u8, y: u8 },
    /// 8XY2: Vx &= Vy
    And { x: u8, y: u8 },
    /// 8XY3: Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// 8XY4: Vx += Vy; VF = carry
    Add { x: u8, y: u8 },
    /// 8XY5: Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// 8XY6: Vx >>= 1; VF = shifted out bit
    ShiftRight { x: u8, y: u8 },
    /// 8XY7: Vx = Vy - Vx; VF = !borrow
    SubN { x: u8, y: u8 },
    /// 8XYE: Vx <<= 1; VF = shifted out bit
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0: skip if Vx != Vy
    SkipNeReg { x: u8, y: u8 },
    /// ANNN: I = addr
    LoadIndex { addr: u16 },
    /// BNNN: pc = addr + V0
    JumpOffset { addr: u16 },
    /// CXKK: Vx = random & kk
    Random { x: u8, kk: u8 },
    /// DXYN: draw n rows of the sprite at I at (Vx, Vy)
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E: skip if key Vx is pressed
    SkipPressed { x: u8 },
    /// EXA1: skip if key Vx is not pressed
    SkipNotPressed { x: u8 },
    /// FX07: Vx = DT
    LoadDelay { x: u8 },
    /// FX0A: wait for a key press and store it in Vx
    WaitKey { x: u8 },
    /// FX15: DT = Vx
    SetDelay { x: u8 },
    /// FX18: ST = Vx
    SetSound { x: u8 },
    /// FX1E: I += Vx
    AddIndex { x: u8 },
    /// FX29: I = address of the glyph for Vx
    LoadGlyph { x: u8 },
    /// FX33: mem[I..I+3] = bcd(Vx)
    Bcd { x: u8 },
    /// FX55: mem[I..=I+x] = V0..=Vx
    Store { x: u8 },
    /// FX65: V0..=Vx = mem[I..=I+x]
    Read { x: u8 },
    /// Anything else, including 0NNN machine code routines
    Unknown(u16),
}

impl Instruction {
    /// Decodes a raw instruction word. Never fails; unrecognised words become `Unknown`.
    pub fn decode(op: u16) -> Self {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqImm { x, kk },
            (0x4, ..) => SkipNeImm { x, kk },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadImm { x, kk },
            (0x7, ..) => AddImm { x, kk },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Add { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex { addr },
            (0xB, ..) => JumpOffset { addr },
            (0xC, ..) => Random { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipPressed { x },
            (0xE, _, 0xA, 0x1) => SkipNotPressed { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Store { x },
            (0xF, _, 0x6, 0x5) => Read { x },
            _ => Unknown(op),
        }
    }
}

impl From<u16> for Instruction {
    fn from(op: u16) -> Self {
        Instruction::decode(op)
    }
}

#[cfg(test)]
mod tests {
    use super::Instruction::*;
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn test_decodes_every_instruction() {
        let instructions = [
            (0x00E0, Clear),
            (0x00EE, Return),
            (0x1ABC, Jump { addr: 0xABC }),
            (0x2ABC, Call { addr: 0xABC }),
            (0x3ABC, SkipEqImm { x: 0xA, kk: 0xBC }),
            (0x4ABC, SkipNeImm { x: 0xA, kk: 0xBC }),
            (0x5AB0, SkipEqReg { x: 0xA, y: 0xB }),
            (0x6ABC, LoadImm { x: 0xA, kk: 0xBC }),
            (0x7ABC, AddImm { x: 0xA, kk: 0xBC }),
            (0x8AB0, Move { x: 0xA, y: 0xB }),
            (0x8AB1, Or { x: 0xA, y: 0xB }),
            (0x8AB2, And { x: 0xA, y: 0xB }),
            (0x8AB3, Xor { x: 0xA, y: 0xB }),
            (0x8AB4, Add { x: 0xA, y: 0xB }),
            (0x8AB5, Sub { x: 0xA, y: 0xB }),
            (0x8AB6, ShiftRight { x: 0xA, y: 0xB }),
            (0x8AB7, SubN { x: 0xA, y: 0xB }),
            (0x8ABE, ShiftLeft { x: 0xA, y: 0xB }),
            (0x9AB0, SkipNeReg { x: 0xA, y: 0xB }),
            (0xAABC, LoadIndex { addr: 0xABC }),
            (0xBABC, JumpOffset { addr: 0xABC }),
            (0xCABC, Random { x: 0xA, kk: 0xBC }),
            (0xDABC, Draw { x: 0xA, y: 0xB, n: 0xC }),
            (0xEA9E, SkipPressed { x: 0xA }),
            (0xEAA1, SkipNotPressed { x: 0xA }),
            (0xFA07, LoadDelay { x: 0xA }),
            (0xFA0A, WaitKey { x: 0xA }),
            (0xFA15, SetDelay { x: 0xA }),
            (0xFA18, SetSound { x: 0xA }),
            (0xFA1E, AddIndex { x: 0xA }),
            (0xFA29, LoadGlyph { x: 0xA }),
            (0xFA33, Bcd { x: 0xA }),
            (0xFA55, Store { x: 0xA }),
            (0xFA65, Read { x: 0xA }),
        ];

        for &(raw, expected) in &instructions {
            assert_eq!(Instruction::decode(raw), expected, "decoding {:#06X}", raw);
        }
    }

    #[test]
    fn test_unrecognised_words_are_unknown() {
        let unknown = [
            0x0000, 0x0123, 0x00E1, 0x5121, 0x8128, 0x812F, 0x9121, 0xE100, 0xF100, 0xFFFF,
        ];
        for &raw in &unknown {
            assert_eq!(Instruction::decode(raw), Unknown(raw));
        }
    }

    #[test]
    fn test_decode_is_total_and_pure() {
        for raw in 0..=u16::MAX {
            assert_eq!(Instruction::decode(raw), Instruction::decode(raw));
        }
    }

    #[test]
    fn test_from_u16() {
        let instruction: Instruction = 0xD015.into();
        assert_eq!(instruction, Draw { x: 0x0, y: 0x1, n: 0x5 });
    }
}
