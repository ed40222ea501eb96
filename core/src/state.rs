use log::debug;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, PROGRAM_START, STACK_DEPTH};
use crate::error::{Chip8Error, Result};
use crate::timer::Timer;

/// # Chip-8 FrameBuffer
/// The on/off state of every pixel, indexed as `frame[y][x]`.
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Whether the machine is executing instructions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    /// Terminal; a halted machine never runs again
    Halted,
}

/// # Machine State
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - up to 12 return addresses, `sp` is the current depth
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz
/// - a tone plays while the sound timer is above 0
///
/// ## Display
/// - 64x32 monochrome frame buffer
///
/// ## Input
/// - pressed status of keys 0..F
/// - emulation halts until a key's value is written to `awaiting_key` if it is Some register
#[derive(Clone)]
pub struct MachineState {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: [bool; KEY_COUNT],
    pub awaiting_key: Option<u8>,
    run_state: RunState,
}

impl MachineState {
    pub fn new() -> Self {
        MachineState {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [false; KEY_COUNT],
            awaiting_key: None,
            run_state: RunState::Running,
        }
    }

    /// Push a return address, failing without modifying the stack if it is full
    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.sp == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow { depth: self.sp });
        }
        self.stack[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn pause(&mut self) {
        self.transition(RunState::Paused);
    }

    pub fn resume(&mut self) {
        self.transition(RunState::Running);
    }

    pub fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Halted => {}
        }
    }

    pub fn halt(&mut self) {
        self.transition(RunState::Halted);
    }

    fn transition(&mut self, to: RunState) {
        if self.run_state == RunState::Halted || self.run_state == to {
            return;
        }
        debug!("run state {:?} -> {:?}", self.run_state, to);
        self.run_state = to;
    }

    /// Set the pressed status of a key, completing a pending wait for a key
    ///
    /// # Arguments
    /// * `key` the 4-bit value of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.keypad.get_mut(key as usize) {
            *pressed = true;
            if let Some(register) = self.awaiting_key.take() {
                self.v[register as usize] = key;
            }
        }
    }

    /// Unset the pressed status of a key
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.keypad.get_mut(key as usize) {
            *pressed = false;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keypad.get(key as usize).copied().unwrap_or(false)
    }

    /// Decrement both timers once, returning whether a tone should keep playing
    pub fn decay_timers(&mut self) -> bool {
        self.delay_timer.decrement();
        self.sound_timer.decrement();
        self.sound_timer.is_active()
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}
