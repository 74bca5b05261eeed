//! Flattening the applied history into one pixel buffer

use tracing::debug;

use crate::batch::{Batch, BatchKind};
use crate::constants::TRANSPARENT_PIXEL;
use crate::error::EditorError;
use crate::types::{Bounds, Color};

use super::Editor;

/// One-shot RGBA8 image of the canvas, ready for an external encoder
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedBuffer {
    /// Tile-space origin of the first pixel
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl FlattenedBuffer {
    fn blank(bounds: Bounds) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            pixels: vec![TRANSPARENT_PIXEL; bounds.area()],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Decoded color at a tile-space coordinate
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.bounds()
            .index_of(x, y)
            .and_then(|i| Color::from_rgba8(self.pixels[i]))
    }

    /// Pixel data as a flat byte slice
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Hand the pixels to the `image` crate for encoding.
    /// `None` for an empty canvas.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        if self.is_empty() {
            return None;
        }
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
    }

    fn put(&mut self, x: i32, y: i32, pixel: [u8; 4]) {
        if let Some(i) = self.bounds().index_of(x, y) {
            self.pixels[i] = pixel;
        }
    }

    fn draw_batch(&mut self, batch: &Batch) {
        match batch.kind() {
            BatchKind::Background(color) => self.pixels.fill(color.to_rgba8()),
            BatchKind::Materialized(texture) | BatchKind::Imported(texture) => {
                for (point, pixel) in texture.bounds().points().zip(texture.pixels()) {
                    if Color::from_rgba8(*pixel).is_some() {
                        self.put(point.x, point.y, *pixel);
                    }
                }
            }
            BatchKind::Sparse => {
                for tile in batch.tiles() {
                    if let Some(color) = tile.active_color().filter(|c| !c.is_transparent()) {
                        self.put(tile.x, tile.y, color.to_rgba8());
                    }
                }
            }
        }
    }
}

impl Editor {
    /// Render every applied batch into one buffer covering the global bounds.
    ///
    /// Backgrounds are laid down first, then buffers and tiles in creation
    /// order, each replacing what lies beneath. Fails when the bounds cover
    /// more than the configured `max_raster_area` cells.
    pub fn export_flattened(&self) -> Result<FlattenedBuffer, EditorError> {
        let bounds = self.bounds.bounds().unwrap_or(Bounds::new(0, 0, 0, 0));
        let limit = self.config.max_raster_area;
        if bounds.area() > limit {
            return Err(EditorError::AreaTooLarge {
                width: bounds.width,
                height: bounds.height,
                limit,
            });
        }

        let mut buffer = FlattenedBuffer::blank(bounds);
        if buffer.is_empty() {
            return Ok(buffer);
        }

        let active = self.stack.active();
        if let Some(background) = active.iter().rev().find(|b| b.background_color().is_some()) {
            buffer.draw_batch(background);
        }
        for batch in active.iter().filter(|b| b.background_color().is_none()) {
            buffer.draw_batch(batch);
        }

        debug!(
            "Exported {}x{} at ({}, {}) from {} batches",
            buffer.width,
            buffer.height,
            buffer.x,
            buffer.y,
            active.len()
        );
        Ok(buffer)
    }
}
