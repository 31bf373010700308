//! The 64x32 monochrome framebuffer.
//!
//! Every pixel stores a colour, and that colour is always either the current
//! foreground (on) or the current background (off). Changing a colour remaps
//! every pixel holding the old one, so the on/off state survives palette
//! changes without a separate bitmask.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const PIXEL_COUNT: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// A single 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }
}

pub struct Graphics {
    vram: Vec<Rgb>,
    foreground: Rgb,
    background: Rgb,
}

impl Graphics {

    /// A cleared screen, white on black.
    pub fn new() -> Graphics {
        Graphics {
            vram: vec![Rgb::BLACK; PIXEL_COUNT],
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
        }
    }

    /// XOR the bits of `data` onto row `y`, starting at column `x`, most significant bit first.
    /// Pixels past the right edge are clipped, and a row past the bottom draws nothing.
    /// Returns true if any pixel was turned off.
    pub fn draw_byte(&mut self, x: usize, y: usize, data: u8) -> bool {
        if y >= SCREEN_HEIGHT || x >= SCREEN_WIDTH {
            return false;
        }

        let mut collision = false;
        let visible = (SCREEN_WIDTH - x).min(8);
        for bit in 0..visible {
            if data & (0x80 >> bit) == 0 {
                continue;
            }
            let pixel = &mut self.vram[y * SCREEN_WIDTH + x + bit];
            if *pixel == self.foreground {
                // Set pixel is unset
                collision = true;
                *pixel = self.background;
            } else {
                *pixel = self.foreground;
            }
        }

        collision
    }

    pub fn set_foreground_color(&mut self, color: Rgb) {
        let old = std::mem::replace(&mut self.foreground, color);
        self.remap(old, color);
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        let old = std::mem::replace(&mut self.background, color);
        self.remap(old, color);
    }

    fn remap(&mut self, old: Rgb, new: Rgb) {
        for pixel in self.vram.iter_mut().filter(|p| **p == old) {
            *pixel = new;
        }
    }

    pub fn foreground_color(&self) -> Rgb {
        self.foreground
    }

    pub fn background_color(&self) -> Rgb {
        self.background
    }

    /// Set every pixel to the background colour.
    pub fn clear(&mut self) {
        let background = self.background;
        for pixel in self.vram.iter_mut() {
            *pixel = background;
        }
    }

    /// Whether the pixel at (x, y) is on. Coordinates outside the screen are off.
    pub fn is_pixel_on(&self, x: usize, y: usize) -> bool {
        x < SCREEN_WIDTH && y < SCREEN_HEIGHT && self.vram[y * SCREEN_WIDTH + x] == self.foreground
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
            Some(self.vram[y * SCREEN_WIDTH + x])
        } else {
            None
        }
    }

    /// The screen as row-major RGB bytes, three per pixel.
    pub fn as_rgb(&self) -> Vec<u8> {
        self.vram
            .iter()
            .flat_map(|p| [p.red, p.green, p.blue])
            .collect()
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Graphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                write!(f, "{}", if self.is_pixel_on(x, y) { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
