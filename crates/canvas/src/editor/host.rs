//! Seams to the rendering/view collaborator

use crate::types::TilePoint;

/// Services the view layer provides to the editor.
///
/// The editor works purely in tile-space integers; camera transforms and
/// drawing stay on the host side.
pub trait ViewHost {
    /// Called after every committed mutation, undo, or redo.
    /// The host re-reads batch state via [`super::Editor::list_active_batches`].
    fn request_redraw(&self);

    /// Map a pointer position in pixels to the tile under it
    fn to_tile_space(&self, px: f32, py: f32) -> TilePoint;
}

/// History notifications delivered to event listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// A batch was pushed onto the operation stack
    BatchCommitted { batch_id: u64, pruned: usize },
    /// A finalized batch had nothing to contribute and was dropped
    BatchDiscarded { batch_id: u64 },
    /// The batch at the cursor was stepped back over
    Undone { batch_id: u64 },
    /// An undone batch was re-applied
    Redone { batch_id: u64 },
}
