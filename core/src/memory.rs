use std::io::Read;

use log::debug;

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory Image
/// The 4096 byte address space of the Chip-8.
///
/// - `0x000..0x050` holds the hexadecimal sprite sheet
/// - `0x050..0x200` is reserved for the interpreter
/// - `0x200..0x1000` holds the program
///
/// Only the upper bound of the address space is enforced here; whether an address is legal
/// for a given instruction is decided by the executor.
pub struct MemoryImage {
    bytes: [u8; MEMORY_SIZE],
}

impl MemoryImage {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        MemoryImage { bytes }
    }

    /// Copy a ROM into memory starting at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:#06X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Read a whole ROM from some source and load it
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut rom)?;
        self.load(&rom)
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange { address: addr })
    }

    pub fn write_byte(&mut self, addr: usize, value: u8) -> Result<()> {
        let byte = self
            .bytes
            .get_mut(addr)
            .ok_or(Chip8Error::AddressOutOfRange { address: addr })?;
        *byte = value;
        Ok(())
    }

    /// Reads the big-endian instruction word at `addr`
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let high = u16::from(self.read_byte(addr)?);
        let low = u16::from(self.read_byte(addr + 1)?);
        Ok(high << 8 | low)
    }

    /// Borrow `len` bytes starting at `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.bytes
            .get(addr..addr + len)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: (addr + len).saturating_sub(1).max(addr),
            })
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_is_loaded_at_zero() {
        let mem = MemoryImage::new();
        assert_eq!(mem.slice(0x000, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(mem.read_byte(0x4F).unwrap(), 0x80);
        assert_eq!(mem.read_byte(0x50).unwrap(), 0x00);
    }

    #[test]
    fn test_load_copies_rom_to_program_start() {
        let mut mem = MemoryImage::new();
        mem.load(&[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(mem.slice(0x200, 3).unwrap(), &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_load_accepts_largest_rom() {
        let mut mem = MemoryImage::new();
        let rom = vec![0x12; MAX_ROM_SIZE];
        assert!(mem.load(&rom).is_ok());
        assert_eq!(mem.read_byte(MEMORY_SIZE - 1).unwrap(), 0x12);
    }

    #[test]
    fn test_load_rejects_oversized_rom() {
        let mut mem = MemoryImage::new();
        let rom = vec![0x12; MAX_ROM_SIZE + 1];
        match mem.load(&rom) {
            Err(Chip8Error::RomTooLarge { size, max_size }) => {
                assert_eq!(size, 4096 - 0x200 + 1);
                assert_eq!(max_size, 4096 - 0x200);
            }
            other => panic!("expected RomTooLarge, got {:?}", other),
        }
        // nothing was copied
        assert_eq!(mem.read_byte(0x200).unwrap(), 0x00);
    }

    #[test]
    fn test_load_from_reader() {
        let mut mem = MemoryImage::new();
        let mut rom: &[u8] = &[0x00, 0xE0];
        mem.load_from(&mut rom).unwrap();
        assert_eq!(mem.read_word(0x200).unwrap(), 0x00E0);
    }

    #[test]
    fn test_byte_access_is_bounded() {
        let mut mem = MemoryImage::new();
        assert!(mem.write_byte(0xFFF, 0x1).is_ok());
        assert_eq!(mem.read_byte(0xFFF).unwrap(), 0x1);
        assert!(matches!(
            mem.read_byte(0x1000),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
        assert!(matches!(
            mem.write_byte(0x1000, 0x1),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut mem = MemoryImage::new();
        mem.load(&[0xAA, 0xBB]).unwrap();
        assert_eq!(mem.read_word(0x200).unwrap(), 0xAABB);
        assert!(mem.read_word(0xFFF).is_err());
    }

    #[test]
    fn test_slice_past_the_end_fails() {
        let mem = MemoryImage::new();
        assert!(mem.slice(0xFFC, 4).is_ok());
        assert!(matches!(
            mem.slice(0xFFC, 5),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
    }
}
