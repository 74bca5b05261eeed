//! Bucket and background fills

use tracing::{debug, warn};

use crate::batch::Batch;
use crate::error::EditorError;
use crate::fill::flood_fill;
use crate::types::{Color, TilePoint};

use super::Editor;

impl Editor {
    /// Flood fill the region connected to `(x, y)` with `color`.
    ///
    /// The trace is limited to the global bounds grown by the configured
    /// fill margin. Returns `Ok(None)` without touching the history when:
    /// - `color` is transparent, including alphas that round to zero;
    ///   a fill cannot erase
    /// - the seed lies outside the working rectangle
    /// - the fill would not change anything
    /// - the working rectangle covers more than `max_raster_area` cells
    pub fn fill_bucket(&mut self, x: i32, y: i32, color: Color) -> Result<Option<u64>, EditorError> {
        let color = self.check_color(color)?;
        let (x, y) = self.check_point(x as i64, y as i64)?;

        self.cancel_stroke();
        self.commit();

        if color.is_transparent() {
            debug!("fill_bucket: transparent fill color, nothing to paint");
            return Ok(None);
        }
        let Some(global) = self.bounds.bounds() else {
            debug!("fill_bucket: nothing painted yet, fill is unbounded");
            return Ok(None);
        };

        let base = self.stack.stack_color_at(x, y);
        // Compare against what the fill would read back as
        if base.is_some() && base == Color::from_rgba8(color.to_rgba8()) {
            debug!("fill_bucket: region already {:?}", color);
            return Ok(None);
        }

        let area = global.expand(self.config.fill_margin);
        if area.area() > self.config.max_raster_area {
            warn!(
                "fill_bucket: working area {}x{} exceeds {} cells, nothing filled",
                area.width, area.height, self.config.max_raster_area
            );
            return Ok(None);
        }
        let result = flood_fill(&self.stack, area, TilePoint::new(x, y), base, color);
        if result.is_empty() {
            return Ok(None);
        }

        let batch = Batch::rasterized(self.ids.next_id(), result.into_texture());
        Ok(self.finalize(batch))
    }

    /// Fill the whole plane beneath every other batch.
    ///
    /// Repeating the fill with the color already on top of the stack is
    /// merged into the existing batch.
    pub fn fill_background(&mut self, color: Color) -> Result<Option<u64>, EditorError> {
        let color = self.check_color(color)?;
        self.cancel_stroke();
        self.commit();
        let batch = Batch::background(self.ids.next_id(), color);
        Ok(self.finalize(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bounds;

    const WALL: Color = Color::rgb(0, 0, 0);
    const DARK: Color = Color::new(10, 10, 10, 1.0);
    const LIGHT: Color = Color::new(20, 20, 20, 1.0);

    #[test]
    fn test_scenario_b() {
        let mut editor = Editor::new();
        editor.fill_rect(0, 0, 4, 4, DARK).unwrap();
        editor.fill_bucket(1, 1, LIGHT).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(editor.stack_color_at(x, y), Some(LIGHT));
            }
        }
        assert_eq!(editor.global_bounds(), Some(Bounds::new(0, 0, 4, 4)));
        assert_eq!(editor.history_len(), 2);
    }

    #[test]
    fn test_idempotent_fill() {
        let mut editor = Editor::new();
        editor.fill_rect(0, 0, 4, 4, DARK).unwrap();
        let bounds = editor.global_bounds();

        assert_eq!(editor.fill_bucket(2, 2, DARK), Ok(None));
        assert_eq!(editor.history_len(), 1);
        assert_eq!(editor.global_bounds(), bounds);
    }

    #[test]
    fn test_fill_containment() {
        let mut editor = Editor::new();
        editor.fill_rect(0, 0, 7, 6, WALL).unwrap();
        editor.fill_rect(2, 1, 3, 4, DARK).unwrap();

        let id = editor.fill_bucket(3, 2, LIGHT).unwrap().unwrap();
        let batch = editor.list_active_batches().last().unwrap();
        assert_eq!(batch.id(), id);
        let texture = batch.texture().unwrap();
        assert_eq!(texture.bounds(), Bounds::new(2, 1, 3, 4));

        for y in 0..6 {
            for x in 0..7 {
                let inside = (2..5).contains(&x) && (1..5).contains(&y);
                let expected = if inside { LIGHT } else { WALL };
                assert_eq!(editor.stack_color_at(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fill_transparent_gap_stays_inside_margin() {
        let mut editor = Editor::new();
        editor.stroke_rect(0, 0, 3, 3, WALL).unwrap();

        // The hole in the middle is empty space enclosed by the ring
        editor.fill_bucket(1, 1, LIGHT).unwrap();
        assert_eq!(editor.stack_color_at(1, 1), Some(LIGHT));
        assert_eq!(editor.stack_color_at(-1, -1), None);

        // Outside the ring the fill spreads over the one-tile margin only
        editor.fill_bucket(-1, 0, DARK).unwrap();
        assert_eq!(editor.stack_color_at(-1, -1), Some(DARK));
        assert_eq!(editor.stack_color_at(3, 3), Some(DARK));
        assert_eq!(editor.stack_color_at(1, 1), Some(LIGHT));
        assert_eq!(editor.global_bounds(), Some(Bounds::new(-1, -1, 5, 5)));
    }

    #[test]
    fn test_degenerate_fills_touch_nothing() {
        let mut editor = Editor::new();
        // Nothing painted: no working rectangle
        assert_eq!(editor.fill_bucket(0, 0, LIGHT), Ok(None));

        editor.fill_rect(0, 0, 2, 2, DARK).unwrap();
        // Far outside the working rectangle
        assert_eq!(editor.fill_bucket(50, 50, LIGHT), Ok(None));
        // Transparent fill color, or one whose alpha rounds to zero
        assert_eq!(editor.fill_bucket(0, 0, Color::new(1, 1, 1, 0.0)), Ok(None));
        assert_eq!(editor.fill_bucket(0, 0, Color::new(1, 1, 1, 0.04)), Ok(None));
        assert_eq!(editor.history_len(), 1);
        assert_eq!(editor.sindex(), 0);
    }

    #[test]
    fn test_fill_does_not_prune_on_noop() {
        let mut editor = Editor::new();
        editor.fill_rect(0, 0, 2, 2, DARK).unwrap();
        editor.fill_rect(5, 5, 1, 1, WALL).unwrap();
        editor.undo();

        assert_eq!(editor.fill_bucket(40, 40, LIGHT), Ok(None));
        assert!(editor.redo());
        assert_eq!(editor.history_len(), 2);
    }

    #[test]
    fn test_fill_over_far_apart_batches_is_skipped() {
        let mut editor = Editor::new();
        editor.fill_rect(0, 0, 1, 1, DARK).unwrap();
        editor.fill_rect(200_000, 200_000, 1, 1, DARK).unwrap();

        assert_eq!(editor.fill_bucket(1, 1, LIGHT), Ok(None));
        assert_eq!(editor.history_len(), 2);
        assert_eq!(editor.stack_color_at(1, 1), None);
    }

    #[test]
    fn test_fill_within_raster_cap() {
        let mut editor = Editor::with_config(tessera_config::EditorConfig {
            max_raster_area: 25,
            ..Default::default()
        });
        editor.fill_rect(0, 0, 3, 3, DARK).unwrap();

        // 3x3 plus the margin is exactly 25 cells
        assert!(editor.fill_bucket(1, 1, LIGHT).unwrap().is_some());
        editor.fill_rect(3, 0, 1, 1, WALL).unwrap();
        assert_eq!(editor.fill_bucket(1, 1, DARK), Ok(None));
    }

    #[test]
    fn test_fill_color_alpha_is_rounded() {
        let mut editor = Editor::new();
        editor.fill_rect(0, 0, 2, 2, DARK).unwrap();
        editor.fill_bucket(0, 0, Color::new(20, 20, 20, 0.33)).unwrap();
        assert_eq!(editor.stack_color_at(1, 1), Some(Color::new(20, 20, 20, 0.3)));
    }

    #[test]
    fn test_background_merge() {
        let mut editor = Editor::new();
        let first = editor.fill_background(DARK).unwrap();
        let second = editor.fill_background(DARK).unwrap();
        assert!(first.is_some());
        assert_eq!(second, None);
        assert_eq!(editor.history_len(), 1);

        editor.fill_background(LIGHT).unwrap();
        assert_eq!(editor.history_len(), 2);
        assert_eq!(editor.stack_color_at(1000, -1000), Some(LIGHT));
        assert_eq!(editor.global_bounds(), None);
    }

    #[test]
    fn test_fill_samples_background() {
        let mut editor = Editor::new();
        editor.fill_background(DARK).unwrap();
        editor.stroke_rect(0, 0, 3, 3, WALL).unwrap();

        editor.fill_bucket(1, 1, LIGHT).unwrap();
        assert_eq!(editor.stack_color_at(1, 1), Some(LIGHT));
        assert_eq!(editor.stack_color_at(-1, -1), Some(DARK));
    }
}
