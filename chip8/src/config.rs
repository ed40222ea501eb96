use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sdl2::pixels::Color;

use chip8_core::FaultPolicy;
use chip8_display::DisplayConfig;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFault {
    /// Stop the machine and keep its last frame on screen
    Halt,
    /// Skip the faulting instruction
    Ignore,
}

impl From<OnFault> for FaultPolicy {
    fn from(on_fault: OnFault) -> Self {
        match on_fault {
            OnFault::Halt => FaultPolicy::Halt,
            OnFault::Ignore => FaultPolicy::Ignore,
        }
    }
}

/// Parses an `RRGGBBAA` hex colour, with or without a leading `#`
pub fn parse_color(s: &str) -> Result<u32, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 8 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("expected 8 hex digits (RRGGBBAA), got {:?}", s));
    }
    u32::from_str_radix(hex, 16).map_err(|e| format!("invalid colour {:?}: {}", s, e))
}

fn to_color(rgba: u32) -> Color {
    let [r, g, b, a] = rgba.to_be_bytes();
    Color::RGBA(r, g, b, a)
}

#[derive(Parser, Debug)]
#[command(name = "chip8", version, about = "A Chip-8 emulator", long_about = None)]
pub struct Config {
    /// Path to the ROM to run
    #[arg(value_name = "ROM")]
    pub rom: PathBuf,

    /// Size of each Chip-8 pixel in window pixels (1 to 64)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: u32,

    /// Colour of lit pixels as RRGGBBAA hex
    #[arg(long = "fg", default_value = "FFFFFFFF", value_parser = parse_color)]
    pub fg_color: u32,

    /// Colour of unlit pixels as RRGGBBAA hex
    #[arg(long = "bg", default_value = "000000FF", value_parser = parse_color)]
    pub bg_color: u32,

    /// Instructions executed per 60Hz frame
    #[arg(long, default_value_t = 1)]
    pub ipf: u32,

    /// What to do when an instruction fails
    #[arg(long, value_enum, default_value_t = OnFault::Halt)]
    pub on_fault: OnFault,

    /// Seed for the random number opcode
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            scale: self.scale,
            fg_color: to_color(self.fg_color),
            bg_color: to_color(self.bg_color),
        }
    }

    pub fn fault_policy(&self) -> FaultPolicy {
        self.on_fault.into()
    }
}
