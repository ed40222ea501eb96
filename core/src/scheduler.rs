use log::{error, warn};

use crate::error::{Chip8Error, Result};
use crate::executor::{Executor, SideEffect};
use crate::memory::MemoryImage;
use crate::state::{MachineState, RunState};

/// What to do when an instruction fails
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Halt the machine, keeping the last frame
    #[default]
    Halt,
    /// Log the fault and carry on with the next instruction
    Ignore,
}

/// # Frame Scheduler
/// Drives one display frame worth of emulation:
/// - up to `instructions_per_frame` instructions, stopping early if the machine stops running
/// - one decrement of both timers, as frames are presented at 60Hz
pub struct FrameScheduler {
    executor: Executor,
    policy: FaultPolicy,
}

impl FrameScheduler {
    pub fn new(executor: Executor, policy: FaultPolicy) -> Self {
        FrameScheduler { executor, policy }
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Runs a single frame, returning whether a tone should currently be playing
    ///
    /// A fault that halts the machine is returned after the machine is halted and the timers
    /// have decayed for the frame.
    pub fn run_frame(
        &mut self,
        state: &mut MachineState,
        mem: &mut MemoryImage,
        instructions_per_frame: u32,
    ) -> Result<bool> {
        if state.run_state() == RunState::Paused {
            return Ok(false);
        }

        let mut halting_fault = None;
        for _ in 0..instructions_per_frame {
            if !state.is_running() {
                break;
            }
            let pc = state.pc;
            match self.executor.step(state, mem) {
                Ok(SideEffect::PlayedNothing) | Ok(SideEffect::Halted) => break,
                Ok(SideEffect::None) | Ok(SideEffect::RequestTone) => {}
                // a failed fetch leaves pc where it was
                Err(fault) => {
                    if let Err(fault) = self.handle(fault, state, state.pc == pc) {
                        halting_fault = Some(fault);
                        break;
                    }
                }
            }
        }

        let tone = state.decay_timers();
        match halting_fault {
            Some(fault) => Err(fault),
            None => Ok(tone),
        }
    }

    fn handle(&self, fault: Chip8Error, state: &mut MachineState, fetching: bool) -> Result<()> {
        if self.policy == FaultPolicy::Ignore && !fetching {
            warn!("ignoring fault at pc {:#06X}: {}", state.pc.wrapping_sub(2), fault);
            return Ok(());
        }
        error!("halting at pc {:#06X}: {}", state.pc, fault);
        state.halt();
        Err(fault)
    }
}
