use log::debug;
use sdl2::pixels::{Color, PixelFormatEnum};

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{DisplaySink, FrameBuffer};

/// How the 64x32 frame is drawn to the window
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Size of each Chip-8 pixel in window pixels
    pub scale: u32,
    /// Colour of lit pixels
    pub fg_color: Color,
    /// Colour of unlit pixels
    pub bg_color: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            scale: 20,
            fg_color: Color::RGBA(0xFF, 0xFF, 0xFF, 0xFF),
            bg_color: Color::RGBA(0x00, 0x00, 0x00, 0xFF),
        }
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 monochrome pixels.
/// The on/off state of these pixels is held in a 2d array of 64x32 bools.
/// The display only gets a call to `present` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    config: DisplayConfig,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `config` the pixel scale and colours
    pub fn new(sdl: &sdl2::Sdl, config: DisplayConfig) -> Result<Self, String> {
        let (width, height) = Self::window_size(config.scale)?;
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window("Chip-8", width, height)
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        debug!("opened {}x{} window", width, height);

        canvas.set_draw_color(config.bg_color);
        canvas.clear();
        canvas.present();

        Ok(Display { canvas, config })
    }

    /// Window dimensions for a pixel scale, failing if they don't fit in a `u32`
    fn window_size(scale: u32) -> Result<(u32, u32), String> {
        let scaled = |pixels: usize| {
            (pixels as u32)
                .checked_mul(scale)
                .ok_or_else(|| format!("display scale {} is too large", scale))
        };
        Ok((scaled(DISPLAY_WIDTH)?, scaled(DISPLAY_HEIGHT)?))
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGBA pixels.
    ///
    /// This creates a two colour rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Replacing each pixel with the 4 bytes of the foreground or background colour
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `fg` the colour of lit pixels
    /// * `bg` the colour of unlit pixels
    fn frame_to_sdl_texture(frame: &FrameBuffer, fg: Color, bg: Color) -> Vec<u8> {
        let (on, off) = (Self::rgba(fg), Self::rgba(bg));
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&lit| if lit { on } else { off })
            .collect()
    }

    fn rgba(color: Color) -> [u8; 4] {
        [color.r, color.g, color.b, color.a]
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGBA32 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA32,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels =
            Display::frame_to_sdl_texture(frame, self.config.fg_color, self.config.bg_color);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            let row_len = DISPLAY_WIDTH * 4;
            for (y, row) in pixels.chunks(row_len).enumerate() {
                buffer[y * pitch..y * pitch + row_len].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl DisplaySink for Display {
    type Error = String;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        self.render(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: FrameBuffer = [[false; 64]; 32];
        frame[0][0..2].copy_from_slice(&[false, true]);
        frame[1][0..2].copy_from_slice(&[true, false]);
        let black = Color::RGBA(0, 0, 0, 255);
        let white = Color::RGBA(255, 255, 255, 255);
        let texture = Display::frame_to_sdl_texture(&frame, white, black);

        let mut expected: Vec<u8> = [0, 0, 0, 255].repeat(64 * 32);
        expected[4..8].copy_from_slice(&[255, 255, 255, 255]);
        expected[256..260].copy_from_slice(&[255, 255, 255, 255]);

        assert_eq!(texture.len(), 8192);
        assert_eq!(texture, expected);
    }

    #[test]
    fn test_window_size() {
        assert_eq!(Display::window_size(20), Ok((1280, 640)));
        assert!(Display::window_size(100_000_000).is_err());
    }

    #[test]
    fn test_frame_to_sdl_texture_uses_configured_colours() {
        let mut frame: FrameBuffer = [[false; 64]; 32];
        frame[31][63] = true;
        let amber = Color::RGBA(0xFF, 0xB0, 0x00, 0xFF);
        let navy = Color::RGBA(0x00, 0x00, 0x40, 0x80);
        let texture = Display::frame_to_sdl_texture(&frame, amber, navy);

        assert_eq!(texture[..4], [0x00, 0x00, 0x40, 0x80]);
        assert_eq!(texture[8188..], [0xFF, 0xB0, 0x00, 0xFF]);
    }
}
