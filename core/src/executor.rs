use log::trace;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::memory::MemoryImage;
use crate::operations::*;
use crate::state::{MachineState, RunState};

/// What a single `step` did, beyond mutating the machine
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    /// An instruction was executed
    None,
    /// Nothing was executed; the machine is paused or waiting for a key
    PlayedNothing,
    /// An instruction started the sound timer
    RequestTone,
    /// Nothing was executed; the machine is halted
    Halted,
}

/// # Executor
/// Fetches, decodes and executes one instruction at a time.
///
/// Owns the random source used by `CXKK` so that runs can be reproduced from a seed.
pub struct Executor {
    rng: StdRng,
}

impl Executor {
    pub fn new() -> Self {
        Executor {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Executor {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Read the instruction word at pc, then move pc past it
    pub fn fetch(state: &mut MachineState, mem: &MemoryImage) -> Result<u16> {
        if state.pc % 2 != 0 {
            return Err(Chip8Error::MisalignedProgramCounter { pc: state.pc });
        }
        let op = mem.read_word(state.pc as usize)?;
        state.pc += 2;
        Ok(op)
    }

    /// Runs exactly one fetch-decode-execute cycle
    /// - does nothing unless the machine is running and not waiting for a key
    /// - never changes the run state; failures are returned for the caller to act on
    pub fn step(&mut self, state: &mut MachineState, mem: &mut MemoryImage) -> Result<SideEffect> {
        match state.run_state() {
            RunState::Halted => return Ok(SideEffect::Halted),
            RunState::Paused => return Ok(SideEffect::PlayedNothing),
            RunState::Running => {}
        }
        if state.awaiting_key.is_some() {
            return Ok(SideEffect::PlayedNothing);
        }

        let op = Self::fetch(state, mem)?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            state.v,
            state.i,
            state.pc - 2
        );
        self.execute(Instruction::decode(op), state, mem)
    }

    /// Applies a decoded instruction to the machine
    pub fn execute(
        &mut self,
        instruction: Instruction,
        state: &mut MachineState,
        mem: &mut MemoryImage,
    ) -> Result<SideEffect> {
        use Instruction::*;

        match instruction {
            Clear => clr(state),
            Return => rts(state)?,
            Jump { addr } => jump(state, addr),
            Call { addr } => call(state, addr)?,
            SkipEqImm { x, kk } => ske(state, x, kk),
            SkipNeImm { x, kk } => skne(state, x, kk),
            SkipEqReg { x, y } => skre(state, x, y),
            LoadImm { x, kk } => load(state, x, kk),
            AddImm { x, kk } => add(state, x, kk),
            Move { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            Add { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            ShiftRight { x, .. } => shr(state, x),
            SubN { x, y } => subn(state, x, y),
            ShiftLeft { x, .. } => shl(state, x),
            SkipNeReg { x, y } => skrne(state, x, y),
            LoadIndex { addr } => loadi(state, addr),
            JumpOffset { addr } => jumpi(state, addr),
            Random { x, kk } => rnd(state, &mut self.rng, x, kk),
            Draw { x, y, n } => draw(state, mem, x, y, n)?,
            SkipPressed { x } => skpr(state, x),
            SkipNotPressed { x } => skup(state, x),
            LoadDelay { x } => moved(state, x),
            WaitKey { x } => keyd(state, x),
            SetDelay { x } => loads(state, x),
            SetSound { x } => {
                ld(state, x);
                if state.sound_timer.is_active() {
                    return Ok(SideEffect::RequestTone);
                }
            }
            AddIndex { x } => addi(state, x),
            LoadGlyph { x } => ldspr(state, x),
            Bcd { x } => bcd(state, mem, x)?,
            Store { x } => stor(state, mem, x)?,
            Read { x } => read(state, mem, x)?,
            Unknown(op) => return Err(Chip8Error::UnknownOpcode(op)),
        }
        Ok(SideEffect::None)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
