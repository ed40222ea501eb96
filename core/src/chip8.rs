use std::io::Read;

use crate::error::Result;
use crate::executor::Executor;
use crate::input::InputEvent;
use crate::memory::MemoryImage;
use crate::scheduler::{FaultPolicy, FrameScheduler};
use crate::sink::{DisplaySink, ToneSink};
use crate::state::{FrameBuffer, MachineState, RunState};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state` of the CPU, display and keypad
///  - the `memory` image holding the font and the loaded program
///  - a `scheduler` that advances both a frame at a time
///
/// Supplies interfaces for:
/// - loading roms
/// - feeding input events
/// - running frames at a fixed instruction rate
/// - handing its frame buffer and tone to some display and speaker
pub struct Chip8 {
    state: MachineState,
    memory: MemoryImage,
    scheduler: FrameScheduler,
}

impl Chip8 {
    /// Creates a machine drawing random numbers from the OS
    pub fn new(policy: FaultPolicy) -> Self {
        Self::with_executor(Executor::new(), policy)
    }

    /// Creates a machine whose random numbers are reproducible from `seed`
    pub fn with_seed(seed: u64, policy: FaultPolicy) -> Self {
        Self::with_executor(Executor::with_seed(seed), policy)
    }

    fn with_executor(executor: Executor, policy: FaultPolicy) -> Self {
        Chip8 {
            state: MachineState::new(),
            memory: MemoryImage::new(),
            scheduler: FrameScheduler::new(executor, policy),
        }
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.memory.load(rom)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        self.memory.load_from(reader)
    }

    pub fn handle(&mut self, event: InputEvent) {
        event.apply(&mut self.state);
    }

    /// Runs one 60Hz frame of `instructions_per_frame` instructions, returning whether a tone
    /// should be playing
    pub fn run_frame(&mut self, instructions_per_frame: u32) -> Result<bool> {
        self.scheduler
            .run_frame(&mut self.state, &mut self.memory, instructions_per_frame)
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Presents the frame if it changed since the last time it was taken
    pub fn present<S: DisplaySink>(&mut self, sink: &mut S) -> std::result::Result<bool, S::Error> {
        match self.take_frame() {
            Some(frame) => sink.present(&frame).map(|()| true),
            None => Ok(false),
        }
    }

    /// Sounds the buzzer while the sound timer runs and the machine is running
    pub fn sound<T: ToneSink>(&self, sink: &mut T) {
        sink.set_tone(self.state.is_running() && self.state.sound_timer.is_active());
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn memory(&self) -> &MemoryImage {
        &self.memory
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(FaultPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Chip8Error;

    #[derive(Default)]
    struct Screen {
        frames: Vec<FrameBuffer>,
    }

    impl DisplaySink for Screen {
        type Error = ();

        fn present(&mut self, frame: &FrameBuffer) -> std::result::Result<(), ()> {
            self.frames.push(*frame);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Buzzer {
        on: bool,
    }

    impl ToneSink for Buzzer {
        fn set_tone(&mut self, on: bool) {
            self.on = on;
        }
    }

    fn chip8_with(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(0, FaultPolicy::Halt);
        chip8.load_rom(rom).unwrap();
        chip8
    }

    #[test]
    fn test_loads_rom_from_reader() {
        let mut chip8 = Chip8::default();
        let mut reader: &[u8] = &[0x00, 0xE0];
        chip8.load_rom_from(&mut reader).unwrap();
        assert_eq!(chip8.memory().read_word(0x200).unwrap(), 0x00E0);
    }

    #[test]
    fn test_rejects_oversized_rom() {
        let mut chip8 = Chip8::default();
        let rom = vec![0; 4096 - 0x200 + 1];
        assert!(matches!(
            chip8.load_rom(&rom),
            Err(Chip8Error::RomTooLarge { size: 3585, max_size: 3584 })
        ));
    }

    #[test]
    fn test_take_frame_clears_draw_flag() {
        // I = glyph 0; draw it at (0, 0); loop
        let mut chip8 = chip8_with(&[0xA0, 0x00, 0xD0, 0x05, 0x12, 0x04]);
        assert_eq!(chip8.take_frame(), None);
        chip8.run_frame(2).unwrap();
        let frame = chip8.take_frame().unwrap();
        assert_eq!(frame[0][..4], [true; 4]);
        assert_eq!(chip8.take_frame(), None);
        assert_eq!(chip8.frame(), &frame);
    }

    #[test]
    fn test_presents_only_changed_frames() {
        let mut chip8 = chip8_with(&[0x00, 0xE0, 0x12, 0x02]);
        let mut screen = Screen::default();
        assert!(!chip8.present(&mut screen).unwrap());
        chip8.run_frame(1).unwrap();
        assert!(chip8.present(&mut screen).unwrap());
        chip8.run_frame(1).unwrap();
        assert!(!chip8.present(&mut screen).unwrap());
        assert_eq!(screen.frames.len(), 1);
    }

    #[test]
    fn test_sounds_while_running() {
        // V0 = 3; ST = V0; loop
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x18, 0x12, 0x04]);
        let mut buzzer = Buzzer::default();
        chip8.run_frame(2).unwrap();
        chip8.sound(&mut buzzer);
        assert!(buzzer.on);
        chip8.handle(InputEvent::TogglePause);
        chip8.sound(&mut buzzer);
        assert!(!buzzer.on);
        chip8.handle(InputEvent::TogglePause);
        chip8.run_frame(1).unwrap();
        chip8.run_frame(1).unwrap();
        chip8.sound(&mut buzzer);
        assert!(!buzzer.on);
    }

    #[test]
    fn test_waits_for_key_event() {
        // wait for key into V5; loop
        let mut chip8 = chip8_with(&[0xF5, 0x0A, 0x12, 0x02]);
        chip8.run_frame(4).unwrap();
        assert_eq!(chip8.state().awaiting_key, Some(0x5));
        chip8.handle(InputEvent::KeyDown(0xB));
        chip8.run_frame(4).unwrap();
        assert_eq!(chip8.state().awaiting_key, None);
        assert_eq!(chip8.state().v[0x5], 0xB);
    }

    #[test]
    fn test_quit_halts() {
        let mut chip8 = chip8_with(&[0x12, 0x00]);
        chip8.handle(InputEvent::Quit);
        assert_eq!(chip8.run_state(), RunState::Halted);
        chip8.run_frame(1).unwrap();
        assert_eq!(chip8.state().pc, 0x200);
    }
}
