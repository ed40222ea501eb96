use log::debug;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use chip8_core::ToneSink;

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.15;

/// A square wave oscillator fed to SDL2 on its audio thread
pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl SquareWave {
    fn new(sample_rate: i32) -> Self {
        SquareWave {
            phase_inc: TONE_HZ / sample_rate as f32,
            phase: 0.0,
            volume: VOLUME,
        }
    }
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Buzzer
/// The Chip-8 has a single tone, played for as long as the sound timer is above 0.
pub struct Buzzer {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Buzzer {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| {
            debug!("opened audio device at {}Hz", spec.freq);
            SquareWave::new(spec.freq)
        })?;

        Ok(Buzzer {
            device,
            playing: false,
        })
    }
}

impl ToneSink for Buzzer {
    fn set_tone(&mut self, on: bool) {
        if on == self.playing {
            return;
        }
        if on {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = on;
    }
}
