/// Width of the Chip-8 display in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the Chip-8 display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Size of the addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded to, and start executing from, this address
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 12;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Each font glyph is 5 bytes tall
pub const SPRITE_HEIGHT: u16 = 5;

/// Time between two frames when running at 60Hz, in nanoseconds
pub const FRAME_DURATION: u64 = 16_666_667;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, loaded at address 0x000.
///
/// Each glyph is 4 pixels wide and 5 pixels tall; the low nibble of every byte is unused.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
