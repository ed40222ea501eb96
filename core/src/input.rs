use log::debug;

use crate::state::MachineState;

/// Input from whatever frontend is driving the machine
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A keypad key (0x0..=0xF) went down
    KeyDown(u8),
    /// A keypad key (0x0..=0xF) came up
    KeyUp(u8),
    TogglePause,
    Quit,
}

impl InputEvent {
    /// Applies the event to the machine; keys outside the keypad are ignored
    pub fn apply(self, state: &mut MachineState) {
        match self {
            InputEvent::KeyDown(key) => state.key_press(key),
            InputEvent::KeyUp(key) => state.key_release(key),
            InputEvent::TogglePause => state.toggle_pause(),
            InputEvent::Quit => {
                debug!("quit requested");
                state.halt()
            }
        }
    }
}
