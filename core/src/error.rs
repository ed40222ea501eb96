use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading or running a Chip-8 program
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {source}")]
    RomUnreadable {
        #[from]
        source: io::Error,
    },

    #[error("stack overflow: a subroutine call was made at the maximum depth of {depth}")]
    StackOverflow { depth: usize },

    #[error("stack underflow: attempted to return from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of range at address {address:#06X}")]
    AddressOutOfRange { address: usize },

    #[error("program counter {pc:#06X} is not aligned to an instruction")]
    MisalignedProgramCounter { pc: u16 },

    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
