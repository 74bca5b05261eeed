//! Tile painting and stroke gestures

use tracing::{debug, warn};

use crate::error::EditorError;
use crate::shapes::line_points;
use crate::tile::Tile;
use crate::types::{Color, TilePoint};

use super::{Editor, StrokeState};

impl Editor {
    /// Paint one tile into the gesture in progress, opening one if needed.
    ///
    /// Returns whether the tile changed; painting the color a tile already
    /// shows is a no-op. Call [`Editor::commit`] to close the gesture.
    pub fn draw_tile_at(&mut self, x: i32, y: i32, color: Color) -> Result<bool, EditorError> {
        if self.stroke.is_some() {
            return Err(EditorError::StrokeInProgress);
        }
        let color = self.check_color(color)?;
        let (x, y) = self.check_point(x as i64, y as i64)?;

        let (batch, ids) = self.pending_mut();
        let changed = match batch.tile_mut(x, y) {
            Some(tile) => tile.paint(color),
            None => batch.add_tile(Tile::new(x, y, ids.next_id(), color)).is_ok(),
        };
        Ok(changed)
    }

    /// Remove the latest color painted at a tile during the gesture in
    /// progress. The first color a tile received is never removed.
    pub fn erase_tile_at(&mut self, x: i32, y: i32) -> Result<bool, EditorError> {
        let (x, y) = self.check_point(x as i64, y as i64)?;
        let erased = self
            .pending
            .as_mut()
            .and_then(|batch| batch.tile_mut(x, y))
            .is_some_and(Tile::erase);
        Ok(erased)
    }

    /// Close the gesture in progress.
    ///
    /// Returns the committed batch id, or `None` when there was nothing to
    /// commit. An unfinished stroke is left open.
    pub fn commit(&mut self) -> Option<u64> {
        if self.stroke.is_some() {
            debug!("commit: stroke in progress, use end_stroke");
            return None;
        }
        let batch = self.pending.take()?;
        self.finalize(batch)
    }

    /// Start a stroke gesture painting with `color`.
    ///
    /// Any open tile-painting gesture is committed first.
    pub fn begin_stroke(&mut self, color: Color) -> Result<(), EditorError> {
        if self.stroke.is_some() {
            return Err(EditorError::StrokeInProgress);
        }
        let color = self.check_color(color)?;
        self.commit();
        self.pending_mut();
        self.stroke = Some(StrokeState { color, last: None });
        Ok(())
    }

    /// Extend the stroke to `(x, y)`, reserving every tile on the line from
    /// the previous sample. Returns how many tiles were newly reserved.
    pub fn stroke_to(&mut self, x: i32, y: i32) -> Result<usize, EditorError> {
        let Some(mut stroke) = self.stroke else {
            return Err(EditorError::NoActiveStroke);
        };
        let (x, y) = self.check_point(x as i64, y as i64)?;

        let points = match stroke.last {
            Some(last) => line_points(last.x as i64, last.y as i64, x as i64, y as i64),
            None => vec![(x as i64, y as i64)],
        };
        stroke.last = Some(TilePoint::new(x, y));
        self.stroke = Some(stroke);

        // Both ends are in range, so every point between them is too
        let (batch, ids) = self.pending_mut();
        let mut reserved = 0;
        for (px, py) in points {
            let (px, py) = (px as i32, py as i32);
            if batch.tile(px, py).is_some() {
                continue;
            }
            if batch.add_tile(Tile::reserved(px, py, ids.next_id())).is_ok() {
                reserved += 1;
            }
        }
        Ok(reserved)
    }

    /// Color every reserved tile and commit the stroke.
    pub fn end_stroke(&mut self) -> Result<Option<u64>, EditorError> {
        let Some(stroke) = self.stroke.take() else {
            return Err(EditorError::NoActiveStroke);
        };
        let Some(mut batch) = self.pending.take() else {
            warn!("end_stroke: stroke had no batch");
            return Ok(None);
        };
        let resolved = batch.resolve_reserved(stroke.color);
        debug!("end_stroke: resolved {} tiles in batch {}", resolved, batch.id());
        Ok(self.finalize(batch))
    }

    /// Drop the stroke in progress without touching the history
    pub fn cancel_stroke(&mut self) {
        if self.stroke.take().is_some() {
            if let Some(batch) = self.pending.take() {
                debug!("Cancelled stroke batch {} ({} tiles)", batch.id(), batch.tile_count());
            }
        }
    }

    /// Whether a stroke gesture is open
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);

    #[test]
    fn test_draw_tile_rejects_invalid_input() {
        let mut editor = Editor::new();
        assert!(matches!(
            editor.draw_tile_at(0, 0, Color::new(1, 1, 1, 2.0)),
            Err(EditorError::InvalidColor { .. })
        ));
        assert!(matches!(
            editor.draw_tile_at(i32::MAX, 0, RED),
            Err(EditorError::CoordinateOverflow { .. })
        ));
        // Nothing was opened by the rejected calls
        assert!(editor.pending_batch().is_none());
        assert!(editor.draw_tile_at(0, 0, RED).unwrap());
    }

    #[test]
    fn test_repaint_and_erase_within_gesture() {
        let mut editor = Editor::new();
        assert!(editor.draw_tile_at(1, 1, RED).unwrap());
        assert!(!editor.draw_tile_at(1, 1, RED).unwrap());
        assert!(editor.draw_tile_at(1, 1, GREEN).unwrap());
        assert_eq!(editor.color_at(1, 1), Some(GREEN));
        // Not committed yet
        assert_eq!(editor.stack_color_at(1, 1), None);

        assert!(editor.erase_tile_at(1, 1).unwrap());
        assert_eq!(editor.color_at(1, 1), Some(RED));
        assert!(!editor.erase_tile_at(1, 1).unwrap());
        assert!(!editor.erase_tile_at(5, 5).unwrap());

        editor.commit();
        assert_eq!(editor.stack_color_at(1, 1), Some(RED));
        assert_eq!(editor.history_len(), 1);
    }

    #[test]
    fn test_repaint_does_not_consume_ids() {
        let mut editor = Editor::new();
        editor.draw_tile_at(0, 0, RED).unwrap();
        editor.draw_tile_at(0, 0, GREEN).unwrap();
        editor.draw_tile_at(0, 0, GREEN).unwrap();
        editor.draw_tile_at(1, 0, RED).unwrap();

        let batch = editor.pending_batch().unwrap();
        let first = batch.tile(0, 0).unwrap().id;
        assert_eq!(first, batch.id() + 1);
        assert_eq!(batch.tile(1, 0).unwrap().id, first + 1);
    }

    #[test]
    fn test_stroke_ids_skip_only_new_tiles() {
        let mut editor = Editor::new();
        editor.begin_stroke(RED).unwrap();
        editor.stroke_to(0, 0).unwrap();
        editor.stroke_to(2, 0).unwrap();
        editor.stroke_to(0, 0).unwrap();
        editor.stroke_to(0, 1).unwrap();

        let batch = editor.pending_batch().unwrap();
        let ids: Vec<_> = batch.tiles().iter().map(|t| t.id).collect();
        let expected: Vec<_> = (1..=4).map(|i| batch.id() + i).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_stroke_reserves_then_resolves() {
        let mut editor = Editor::new();
        editor.begin_stroke(RED).unwrap();
        assert_eq!(editor.stroke_to(0, 0).unwrap(), 1);
        assert_eq!(editor.stroke_to(4, 0).unwrap(), 4);
        assert_eq!(editor.stroke_to(0, 0).unwrap(), 0);

        // Reserved tiles are not colored yet
        assert_eq!(editor.color_at(2, 0), None);
        assert!(editor.pending_batch().unwrap().has_reserved_tiles());
        assert_eq!(editor.draw_tile_at(9, 9, RED), Err(EditorError::StrokeInProgress));

        let id = editor.end_stroke().unwrap();
        assert!(id.is_some());
        for x in 0..=4 {
            assert_eq!(editor.stack_color_at(x, 0), Some(RED));
        }
        assert!(!editor.is_stroking());
    }

    #[test]
    fn test_stroke_protocol_errors() {
        let mut editor = Editor::new();
        assert_eq!(editor.stroke_to(0, 0), Err(EditorError::NoActiveStroke));
        assert_eq!(editor.end_stroke(), Err(EditorError::NoActiveStroke));

        editor.begin_stroke(RED).unwrap();
        assert_eq!(editor.begin_stroke(GREEN), Err(EditorError::StrokeInProgress));
    }

    #[test]
    fn test_cancel_stroke_leaves_history_untouched() {
        let mut editor = Editor::new();
        editor.begin_stroke(RED).unwrap();
        editor.stroke_to(3, 3).unwrap();
        editor.cancel_stroke();

        assert!(!editor.is_stroking());
        assert!(editor.pending_batch().is_none());
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_empty_stroke_is_discarded() {
        let mut editor = Editor::new();
        editor.begin_stroke(RED).unwrap();
        assert_eq!(editor.end_stroke(), Ok(None));
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_begin_stroke_commits_open_gesture() {
        let mut editor = Editor::new();
        editor.draw_tile_at(0, 0, GREEN).unwrap();
        editor.begin_stroke(RED).unwrap();
        assert_eq!(editor.history_len(), 1);
        assert_eq!(editor.stack_color_at(0, 0), Some(GREEN));
    }
}
