pub use chip8::Chip8;
pub use error::{Chip8Error, Result};
pub use executor::{Executor, SideEffect};
pub use input::InputEvent;
pub use instruction::Instruction;
pub use memory::MemoryImage;
pub use scheduler::{FaultPolicy, FrameScheduler};
pub use sink::{DisplaySink, ToneSink};
pub use state::{FrameBuffer, MachineState, RunState};
pub use timer::{Timer, TimerState};

mod chip8;
pub mod constants;
mod error;
mod executor;
mod input;
mod instruction;
mod memory;
mod opcode;
mod operations;
mod scheduler;
mod sink;
pub mod state;
mod timer;
