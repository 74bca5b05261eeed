//! Shape insertion and raw buffer import

use tracing::debug;

use crate::batch::Batch;
use crate::constants::{BYTES_PER_PIXEL, TRANSPARENT_PIXEL};
use crate::error::EditorError;
use crate::shapes::{circle_points, rect_points};
use crate::texture::Texture;
use crate::types::{Bounds, Color};
use crate::validation::validate_buffer;

use super::Editor;

impl Editor {
    /// Paint every tile of `[x, x+w) x [y, y+h)` as one batch
    pub fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<Option<u64>, EditorError> {
        let color = self.check_color(color)?;
        let points = rect_points(x as i64, y as i64, width, height, true);
        Ok(self.insert_shape(points, color))
    }

    /// Paint the outer ring of `[x, x+w) x [y, y+h)` as one batch
    pub fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<Option<u64>, EditorError> {
        let color = self.check_color(color)?;
        let points = rect_points(x as i64, y as i64, width, height, false);
        Ok(self.insert_shape(points, color))
    }

    /// Paint a circle outline centered on `(cx, cy)` as one batch
    pub fn draw_arc(
        &mut self,
        cx: i32,
        cy: i32,
        radius: u32,
        color: Color,
    ) -> Result<Option<u64>, EditorError> {
        let color = self.check_color(color)?;
        let points = circle_points(cx as i64, cy as i64, radius);
        Ok(self.insert_shape(points, color))
    }

    fn insert_shape(&mut self, points: Vec<(i64, i64)>, color: Color) -> Option<u64> {
        self.cancel_stroke();
        self.commit();
        let mut batch = Batch::sparse(self.ids.next_id());
        let added = self.add_shape_tiles(&mut batch, points, color);
        debug!("Shape batch {}: {} tiles", batch.id(), added);
        self.finalize(batch)
    }

    /// Wrap a decoded RGBA8 buffer placed at `(x, y)` as one batch.
    ///
    /// The buffer bypasses tile construction and is never re-rasterized.
    /// Pixels landing past the coordinate limit are cleared.
    pub fn import_buffer(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Option<u64>, EditorError> {
        validate_buffer(width, height, rgba)?;
        let (x, y) = self.check_point(x as i64, y as i64)?;

        let bounds = Bounds::new(x, y, width, height);
        let mut bytes = rgba.to_vec();
        let in_range = |v: i64| i32::try_from(v).is_ok_and(|v| self.config.coordinate_in_range(v));
        let mut cleared = 0usize;
        for i in 0..bounds.area() {
            let px = x as i64 + (i % width as usize) as i64;
            let py = y as i64 + (i / width as usize) as i64;
            if !in_range(px) || !in_range(py) {
                let start = i * BYTES_PER_PIXEL;
                bytes[start..start + BYTES_PER_PIXEL].copy_from_slice(&TRANSPARENT_PIXEL);
                cleared += 1;
            }
        }
        if cleared > 0 {
            debug!("import_buffer: cleared {} out-of-range pixels", cleared);
        }

        self.cancel_stroke();
        self.commit();
        let batch = Batch::imported(self.ids.next_id(), Texture::from_rgba8(bounds, &bytes));
        Ok(self.finalize(batch))
    }
}
