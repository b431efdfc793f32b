//! 8-bit RGB pixels and the buffer the frame driver fills.

use bytemuck::{Pod, Zeroable};
use prism_math::vector::clamp;
use prism_math::Color;

/// Largest channel value.
pub const MAX_CHANNEL: u8 = 255;

/// One output pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert a linear color (nominally 0-1 per channel) to bytes.
    ///
    /// Each channel is scaled by 255 and clamped.
    pub fn from_color(color: Color) -> Self {
        let scaled = color * f64::from(MAX_CHANNEL);
        Self {
            r: clamp(scaled.x),
            g: clamp(scaled.y),
            b: clamp(scaled.z),
        }
    }
}

/// Row-major image with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; width as usize * height as usize],
        }
    }

    /// Get the pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at column `x`, row `y`.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let offset = self.offset(x, y);
        self.pixels[offset] = pixel;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether the pixel count matches the dimensions.
    pub fn is_complete(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize
    }

    /// Raw `r, g, b` bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_from_color() {
        assert_eq!(Pixel::from_color(Color::ZERO), Pixel::BLACK);
        assert_eq!(Pixel::from_color(Color::ONE), Pixel::new(255, 255, 255));
        assert_eq!(Pixel::from_color(Color::new(0.5, 2.0, -1.0)), Pixel::new(127, 255, 0));
    }

    #[test]
    fn test_buffer_layout() {
        let mut buffer = PixelBuffer::new(3, 2);
        assert_eq!(buffer.pixels.len(), 6);
        assert!(buffer.is_complete());

        buffer.set(2, 1, Pixel::new(1, 2, 3));
        assert_eq!(buffer.get(2, 1), Pixel::new(1, 2, 3));
        assert_eq!(buffer.pixels[5], Pixel::new(1, 2, 3));
    }

    #[test]
    fn test_as_bytes() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(0, 0, Pixel::new(10, 20, 30));
        buffer.set(1, 0, Pixel::new(40, 50, 60));
        assert_eq!(buffer.as_bytes(), &[10, 20, 30, 40, 50, 60]);
    }
}
