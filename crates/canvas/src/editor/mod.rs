//! Editor facade
//!
//! This module ties the pieces together:
//! - A provisional batch collects the edits of the gesture in progress
//! - Finalizing it discards, merges, materializes, or commits it
//! - The operation stack holds committed batches and the undo cursor
//! - The bounds tracker keeps the global bounds of the applied history
//!
//! Every mutation takes `&mut self`, so edits apply strictly in call order.

mod export;
mod fill;
mod history;
mod host;
mod paint;
mod shapes;

use tessera_config::EditorConfig;
use tracing::{debug, warn};

use crate::batch::{Batch, BatchKind};
use crate::bounds::BoundsTracker;
use crate::error::EditorError;
use crate::stack::OperationStack;
use crate::tile::Tile;
use crate::types::{Bounds, Color, TilePoint};
use crate::validation::{validate_color, validate_coordinate};

pub use export::FlattenedBuffer;
pub use host::{EditorEvent, ViewHost};

/// Issues tile and batch ids for one editor instance
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn next_id(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Stroke gesture state
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrokeState {
    pub(crate) color: Color,
    pub(crate) last: Option<TilePoint>,
}

type Listener = Box<dyn Fn(EditorEvent)>;

/// Owns the edit history and exposes painting operations
pub struct Editor {
    pub(crate) config: EditorConfig,
    pub(crate) stack: OperationStack,
    /// Batch of the gesture in progress, not yet on the stack
    pub(crate) pending: Option<Batch>,
    pub(crate) stroke: Option<StrokeState>,
    pub(crate) bounds: BoundsTracker,
    pub(crate) ids: IdAllocator,
    host: Option<Box<dyn ViewHost>>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("sindex", &self.stack.sindex())
            .field("batches", &self.stack.len())
            .field("pending", &self.pending.as_ref().map(Batch::id))
            .field("stroking", &self.stroke.is_some())
            .field("bounds", &self.bounds.bounds())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor with custom thresholds and limits
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            stack: OperationStack::new(),
            pending: None,
            stroke: None,
            bounds: BoundsTracker::new(),
            ids: IdAllocator::default(),
            host: None,
            listeners: Vec::new(),
        }
    }

    /// Attach the view collaborator
    pub fn set_host(&mut self, host: Box<dyn ViewHost>) {
        self.host = Some(host);
    }

    /// Register a listener for history events
    pub fn add_event_listener<F>(&mut self, listener: F)
    where
        F: Fn(EditorEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Undo/redo cursor, -1 when nothing is applied
    pub fn sindex(&self) -> isize {
        self.stack.sindex()
    }

    /// Number of batches on the stack, undone ones included
    pub fn history_len(&self) -> usize {
        self.stack.len()
    }

    /// Global bounds of the applied history
    pub fn global_bounds(&self) -> Option<Bounds> {
        self.bounds.bounds()
    }

    /// Applied batches in creation order, for compositing
    pub fn list_active_batches(&self) -> &[Batch] {
        self.stack.active()
    }

    /// Batch of the gesture in progress
    pub fn pending_batch(&self) -> Option<&Batch> {
        self.pending.as_ref()
    }

    /// Color at a coordinate over everything ever painted, including the
    /// gesture in progress and undone batches
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.pending
            .as_ref()
            .and_then(|b| b.color_at(x, y))
            .or_else(|| self.stack.color_at(x, y))
    }

    /// Color at a coordinate as currently rendered
    pub fn stack_color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.stack.stack_color_at(x, y)
    }

    /// Tile under a pointer position, when a host is attached
    pub fn tile_at_pointer(&self, px: f32, py: f32) -> Option<TilePoint> {
        self.host.as_ref().map(|host| host.to_tile_space(px, py))
    }

    /// Validate a single color argument
    pub(crate) fn check_color(&self, color: Color) -> Result<Color, EditorError> {
        validate_color(color).inspect_err(|e| warn!("Rejected input: {}", e))
    }

    /// Validate a single coordinate argument
    pub(crate) fn check_point(&self, x: i64, y: i64) -> Result<(i32, i32), EditorError> {
        validate_coordinate(x, y, self.config.max_coordinate)
            .inspect_err(|e| warn!("Rejected input: {}", e))
    }

    /// Open a fresh sparse batch unless one is already collecting edits.
    /// The id allocator comes along for tiles added to it.
    pub(crate) fn pending_mut(&mut self) -> (&mut Batch, &mut IdAllocator) {
        let ids = &mut self.ids;
        let batch = self.pending.get_or_insert_with(|| Batch::sparse(ids.next_id()));
        (batch, ids)
    }

    /// Add tiles at every in-range point of a shape, skipping coordinates
    /// already present. Returns the number of tiles added.
    pub(crate) fn add_shape_tiles<I>(&mut self, batch: &mut Batch, points: I, color: Color) -> usize
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut added = 0;
        let mut dropped = 0;
        for (x, y) in points {
            let Ok((x, y)) = validate_coordinate(x, y, self.config.max_coordinate) else {
                dropped += 1;
                continue;
            };
            if batch.tile(x, y).is_some() {
                continue;
            }
            let tile = Tile::new(x, y, self.ids.next_id(), color);
            if batch.add_tile(tile).is_ok() {
                added += 1;
            }
        }
        if dropped > 0 {
            debug!("Dropped {} out-of-range shape points", dropped);
        }
        added
    }

    /// Close a gesture: discard, merge, materialize, or commit the batch.
    ///
    /// Returns the id of the committed batch.
    pub(crate) fn finalize(&mut self, mut batch: Batch) -> Option<u64> {
        let id = batch.id();

        if batch.is_empty() {
            debug!("Discarding empty batch {}", id);
            self.emit(EditorEvent::BatchDiscarded { batch_id: id });
            return None;
        }

        if let BatchKind::Background(color) = batch.kind() {
            let same_as_top = self
                .stack
                .top()
                .and_then(Batch::background_color)
                .is_some_and(|top| top == *color);
            if same_as_top {
                debug!("Merging background batch {} into the one below", id);
                self.emit(EditorEvent::BatchDiscarded { batch_id: id });
                return None;
            }
        }

        if batch.exceeds_threshold(&self.config.materialize) {
            batch.materialize();
        }

        let pruned = self.stack.commit(batch);
        if pruned > 0 {
            self.bounds.recompute(self.stack.active());
        } else if let Some(top) = self.stack.top() {
            self.bounds.include(top);
        }

        self.emit(EditorEvent::BatchCommitted {
            batch_id: id,
            pruned,
        });
        self.request_redraw();
        Some(id)
    }

    pub(crate) fn emit(&self, event: EditorEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub(crate) fn request_redraw(&self) {
        if let Some(host) = &self.host {
            host.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);

    struct CountingHost {
        redraws: Rc<Cell<usize>>,
    }

    impl ViewHost for CountingHost {
        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }

        fn to_tile_space(&self, px: f32, py: f32) -> TilePoint {
            TilePoint::new((px / 16.0).floor() as i32, (py / 16.0).floor() as i32)
        }
    }

    #[test]
    fn test_new_editor_is_empty() {
        let editor = Editor::new();
        assert_eq!(editor.sindex(), -1);
        assert_eq!(editor.history_len(), 0);
        assert_eq!(editor.global_bounds(), None);
        assert!(editor.list_active_batches().is_empty());
        assert_eq!(editor.tile_at_pointer(1.0, 1.0), None);
    }

    #[test]
    fn test_scenario_a() {
        let mut editor = Editor::new();
        editor.draw_tile_at(0, 0, Color::new(255, 0, 0, 1.0)).unwrap();
        editor.commit();
        assert_eq!(editor.stack_color_at(0, 0), Some(RED));

        editor.draw_tile_at(0, 0, Color::new(0, 255, 0, 1.0)).unwrap();
        editor.commit();
        assert_eq!(editor.stack_color_at(0, 0), Some(GREEN));

        editor.undo();
        assert_eq!(editor.stack_color_at(0, 0), Some(RED));
        editor.undo();
        assert_eq!(editor.stack_color_at(0, 0), None);

        editor.redo();
        editor.redo();
        assert_eq!(editor.stack_color_at(0, 0), Some(GREEN));
    }

    #[test]
    fn test_empty_commit_is_discarded() {
        let mut editor = Editor::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        editor.add_event_listener(move |e| sink.borrow_mut().push(e));

        editor.pending_mut();
        assert_eq!(editor.commit(), None);
        assert_eq!(editor.history_len(), 0);
        assert!(matches!(
            events.borrow().as_slice(),
            [EditorEvent::BatchDiscarded { .. }]
        ));
    }

    #[test]
    fn test_host_receives_redraws_and_maps_pointers() {
        let redraws = Rc::new(Cell::new(0));
        let mut editor = Editor::new();
        editor.set_host(Box::new(CountingHost {
            redraws: redraws.clone(),
        }));

        let tile = editor.tile_at_pointer(40.0, -3.0).unwrap();
        assert_eq!(tile, TilePoint::new(2, -1));

        editor.draw_tile_at(tile.x, tile.y, RED).unwrap();
        assert_eq!(redraws.get(), 0);
        editor.commit();
        assert_eq!(redraws.get(), 1);
        editor.undo();
        editor.redo();
        assert_eq!(redraws.get(), 3);
    }

    #[test]
    fn test_materialization_at_commit() {
        let mut editor = Editor::with_config(EditorConfig::with_thresholds(4, 100));
        editor.fill_rect(0, 0, 3, 3, RED).unwrap();

        let batch = &editor.list_active_batches()[0];
        assert!(matches!(batch.kind(), BatchKind::Materialized(_)));
        assert_eq!(batch.tile_count(), 9);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(editor.stack_color_at(x, y), Some(RED));
            }
        }
    }

    #[test]
    fn test_far_apart_gesture_commits_sparse() {
        let mut editor = Editor::new();
        editor.draw_tile_at(0, 0, RED).unwrap();
        editor.draw_tile_at(200_000, 200_000, GREEN).unwrap();
        assert!(editor.commit().is_some());

        let batch = &editor.list_active_batches()[0];
        assert!(matches!(batch.kind(), BatchKind::Sparse));
        assert_eq!(editor.stack_color_at(200_000, 200_000), Some(GREEN));
        assert_eq!(
            editor.global_bounds(),
            Some(Bounds::new(0, 0, 200_001, 200_001))
        );
    }

    #[test]
    fn test_ids_are_per_editor() {
        let mut a = Editor::new();
        let mut b = Editor::new();
        let first_a = a.fill_rect(0, 0, 1, 1, RED).unwrap();
        let first_b = b.fill_rect(0, 0, 1, 1, RED).unwrap();
        assert_eq!(first_a, first_b);
    }
}
