//! Output raster and color conversion.

use crate::{BandResult, Color};

/// Convert a color to 8-bit RGBA. Channels are clamped to [0, 1]; alpha is
/// always opaque.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f32| (255.0 * c.clamp(0.0, 1.0)).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// RGBA8 image with row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y), y counted from the bottom.
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the bottom.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.index(x, y);
        self.pixels[idx] = rgba;
    }

    /// Copy a rendered band into place at its row offset.
    pub fn write_band(&mut self, result: &BandResult) {
        let start = self.index(0, result.band.y_offset);
        let Some(target) = self.pixels.get_mut(start..) else {
            return;
        };
        let n = target.len().min(result.pixels.len());
        target[..n].copy_from_slice(&result.pixels[..n]);
    }

    /// Raw RGBA bytes, bottom row first.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to an `image` buffer, flipping to top-row-first order.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.get(x, self.height - 1 - y))
        })
    }
}
