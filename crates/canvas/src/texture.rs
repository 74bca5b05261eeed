//! Rasterized RGBA8 buffer anchored in tile space

use crate::constants::TRANSPARENT_PIXEL;
use crate::types::{Bounds, Color};

/// An RGBA8 pixel buffer placed at a tile-space origin.
/// One pixel per tile, rows stored top to bottom.
///
/// Textures are frozen once built: re-rasterizing a batch replaces its
/// texture instead of patching it.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    bounds: Bounds,
    pixels: Vec<[u8; 4]>,
}

impl Texture {
    /// Wrap already-decoded RGBA8 bytes. The caller guarantees
    /// `bytes.len() == width * height * 4`.
    pub(crate) fn from_rgba8(bounds: Bounds, bytes: &[u8]) -> Self {
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(bytes);
        debug_assert_eq!(pixels.len(), bounds.area());
        Self {
            bounds,
            pixels: pixels.to_vec(),
        }
    }

    /// Build a texture by evaluating `shade` for every covered tile
    pub(crate) fn rasterize<F>(bounds: Bounds, mut shade: F) -> Self
    where
        F: FnMut(i32, i32) -> Option<Color>,
    {
        let pixels = bounds
            .points()
            .map(|p| shade(p.x, p.y).map_or(TRANSPARENT_PIXEL, Color::to_rgba8))
            .collect();
        Self { bounds, pixels }
    }

    /// Build from a row-major pixel vector
    pub(crate) fn from_pixels(bounds: Bounds, pixels: Vec<[u8; 4]>) -> Self {
        debug_assert_eq!(pixels.len(), bounds.area());
        Self { bounds, pixels }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Raw pixel at a world coordinate
    #[inline]
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.bounds.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Decoded color at a world coordinate, `None` where uncovered
    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.pixel_at(x, y).and_then(Color::from_rgba8)
    }

    /// Direct access to the pixels in row-major order
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixel data as a flat byte slice for upload or encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
