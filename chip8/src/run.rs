use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{Context, Error, Result};
use log::{info, warn};

use chip8_core::constants::FRAME_DURATION;
use chip8_core::{Chip8, InputEvent, ToneSink};
use chip8_display::Display;

use crate::audio::Buzzer;
use crate::config::Config;
use crate::keymap::input_event;

pub fn run(config: &Config) -> Result<()> {
    let policy = config.fault_policy();
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed, policy),
        None => Chip8::new(policy),
    };

    // Load ROM
    let file = File::open(&config.rom)
        .with_context(|| format!("unable to open ROM {}", config.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom_from(&mut reader)
        .with_context(|| format!("unable to load ROM {}", config.rom.display()))?;
    info!("loaded ROM {}", config.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, config.display())
        .map_err(Error::msg)
        .context("unable to open display")?;
    let mut buzzer = match Buzzer::new(&sdl) {
        Ok(buzzer) => Some(buzzer),
        Err(e) => {
            warn!("unable to open audio device, continuing without sound: {}", e);
            None
        }
    };
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Set initial timing
    let frame_time = Duration::from_nanos(FRAME_DURATION);
    let mut last_frame = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            if let Some(input) = input_event(&event) {
                chip8.handle(input);
                if input == InputEvent::Quit {
                    break 'event;
                }
            }
        }

        // Update state; a fault has already been logged and halted the machine
        if chip8.run_frame(config.ipf).is_err() {
            info!("machine halted, press Escape to quit");
        }

        // If the draw flag is set, unset it and render the current frame
        chip8.present(&mut display).map_err(Error::msg)?;
        if let Some(buzzer) = buzzer.as_mut() {
            chip8.sound(buzzer);
        }

        // Handle timing
        let elapsed_frame_time = last_frame.elapsed();
        if frame_time > elapsed_frame_time {
            std::thread::sleep(frame_time - elapsed_frame_time);
        }
        last_frame = Instant::now();
    }

    if let Some(buzzer) = buzzer.as_mut() {
        buzzer.set_tone(false);
    }
    Ok(())
}
