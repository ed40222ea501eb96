//! The effect of every instruction on the machine.
//!
//! The program counter has already been moved past the instruction when any of these run,
//! so jumps overwrite it and skips advance it by one more instruction.

use rand::RngCore;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRAM_START, SPRITE_HEIGHT};
use crate::error::{Chip8Error, Result};
use crate::memory::MemoryImage;
use crate::state::MachineState;

const FLAG: usize = 0xF;

fn skip_if(state: &mut MachineState, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// Opcodes may only write to the program region
fn writable(addr: usize) -> Result<usize> {
    if addr < PROGRAM_START as usize {
        Err(Chip8Error::AddressOutOfRange { address: addr })
    } else {
        Ok(addr)
    }
}

/// clear
pub fn clr(state: &mut MachineState) {
    state.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut MachineState) -> Result<()> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut MachineState, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut MachineState, addr: u16) -> Result<()> {
    state.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut MachineState, x: u8, kk: u8) {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut MachineState, x: u8, kk: u8) {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut MachineState, x: u8, y: u8) {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition);
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut MachineState, x: u8, y: u8) {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut MachineState, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut MachineState, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut MachineState, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut MachineState, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut MachineState, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut MachineState, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
}

// The ALU operations below write VF before Vx, so when x is F the result wins over the flag.

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut MachineState, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[FLAG] = u8::from(over);
    state.v[x as usize] = res;
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut MachineState, x: u8, y: u8) {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[FLAG] = u8::from(!under);
    state.v[x as usize] = res;
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut MachineState, x: u8) {
    let value = state.v[x as usize];
    state.v[FLAG] = value & 0x1;
    state.v[x as usize] = value >> 1;
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut MachineState, x: u8, y: u8) {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[FLAG] = u8::from(!under);
    state.v[x as usize] = res;
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut MachineState, x: u8) {
    let value = state.v[x as usize];
    state.v[FLAG] = value >> 7;
    state.v[x as usize] = value << 1;
}

/// I = addr
pub fn loadi(state: &mut MachineState, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut MachineState, addr: u16) {
    state.pc = addr + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rnd(state: &mut MachineState, rng: &mut dyn RngCore, x: u8, kk: u8) {
    let rand_byte = (rng.next_u32() & 0xFF) as u8;
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut MachineState, mem: &MemoryImage, x: u8, y: u8, n: u8) -> Result<()> {
    let sprite = mem.slice(state.i as usize, n as usize)?;
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;
    let mut collision = false;

    for (row, byte) in sprite.iter().enumerate() {
        let py = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if byte & (0x80 >> bit) == 0 {
                continue;
            }
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[py][px];
            collision |= *pixel;
            *pixel ^= true;
        }
    }

    state.v[FLAG] = u8::from(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut MachineState, x: u8) {
    let condition = state.is_pressed(state.v[x as usize]);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut MachineState, x: u8) {
    let condition = !state.is_pressed(state.v[x as usize]);
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut MachineState, x: u8) {
    state.v[x as usize] = state.delay_timer.load();
}

/// await keypress for Vx
pub fn keyd(state: &mut MachineState, x: u8) {
    state.awaiting_key = Some(x);
}

/// DT = Vx
pub fn loads(state: &mut MachineState, x: u8) {
    state.delay_timer.store(state.v[x as usize]);
}

/// ST = Vx
pub fn ld(state: &mut MachineState, x: u8) {
    state.sound_timer.store(state.v[x as usize]);
}

/// I += Vx
pub fn addi(state: &mut MachineState, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut MachineState, x: u8) {
    state.i = u16::from(state.v[x as usize]) * SPRITE_HEIGHT;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(state: &MachineState, mem: &mut MemoryImage, x: u8) -> Result<()> {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let start = writable(state.i as usize)?;
    // fail before writing anything if the last digit doesn't fit
    mem.read_byte(start + 2)?;
    for (offset, digit) in digits.iter().enumerate() {
        mem.write_byte(start + offset, *digit)?;
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &MachineState, mem: &mut MemoryImage, x: u8) -> Result<()> {
    let start = writable(state.i as usize)?;
    mem.read_byte(start + x as usize)?;
    for (offset, value) in state.v[..=x as usize].iter().enumerate() {
        mem.write_byte(start + offset, *value)?;
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut MachineState, mem: &MemoryImage, x: u8) -> Result<()> {
    let values = mem.slice(state.i as usize, x as usize + 1)?;
    state.v[..=x as usize].copy_from_slice(values);
    Ok(())
}
