//! Outputs of the machine, implemented by frontends.

use crate::state::FrameBuffer;

/// Something that can show a frame
pub trait DisplaySink {
    type Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

/// Something that can play or silence the buzzer
pub trait ToneSink {
    fn set_tone(&mut self, on: bool);
}
