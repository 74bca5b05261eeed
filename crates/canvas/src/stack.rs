//! Linear undo/redo stack of committed batches

use tracing::debug;

use crate::batch::Batch;
use crate::fill::ColorSampler;
use crate::types::Color;

/// Ordered batches plus the undo/redo cursor.
///
/// The first `applied` entries are live; the rest were undone and come back
/// on redo until a new commit prunes them. `sindex` in the usual sense is
/// `applied - 1`.
#[derive(Debug, Default)]
pub struct OperationStack {
    entries: Vec<Batch>,
    applied: usize,
}

impl OperationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total batches held, including undone ones
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, -1 when nothing is applied
    #[inline]
    pub fn sindex(&self) -> isize {
        self.applied as isize - 1
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }

    /// Applied batches in creation order
    #[inline]
    pub fn active(&self) -> &[Batch] {
        &self.entries[..self.applied]
    }

    /// Every held batch, undone ones included
    #[inline]
    pub fn all(&self) -> &[Batch] {
        &self.entries
    }

    /// Batch at the cursor
    pub fn top(&self) -> Option<&Batch> {
        self.active().last()
    }

    /// Append a batch, discarding any undone entries first.
    ///
    /// Returns how many undone batches were pruned.
    pub fn commit(&mut self, batch: Batch) -> usize {
        let pruned = self.entries.len() - self.applied;
        if pruned > 0 {
            self.entries.truncate(self.applied);
            debug!("Pruned {} undone batches before commit", pruned);
        }
        debug!(
            "Commit batch {} ({}, {} tiles)",
            batch.id(),
            batch.kind().label(),
            batch.tile_count()
        );
        self.entries.push(batch);
        self.applied = self.entries.len();
        pruned
    }

    /// Step back over the batch at the cursor, returning its id
    pub fn undo(&mut self) -> Option<u64> {
        if self.applied == 0 {
            debug!("Undo: nothing applied");
            return None;
        }
        let batch = &mut self.entries[self.applied - 1];
        batch.replay_backward();
        let id = batch.id();
        self.applied -= 1;
        debug!("Undo batch {} (sindex now {})", id, self.sindex());
        Some(id)
    }

    /// Re-apply the next undone batch, returning its id
    pub fn redo(&mut self) -> Option<u64> {
        if self.applied == self.entries.len() {
            debug!("Redo: nothing to redo");
            return None;
        }
        self.applied += 1;
        let batch = &mut self.entries[self.applied - 1];
        batch.replay_forward();
        let id = batch.id();
        debug!("Redo batch {} (sindex now {})", id, self.sindex());
        Some(id)
    }

    /// Color at a coordinate over every held batch, ignoring the cursor
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        resolve(&self.entries, x, y)
    }

    /// Color at a coordinate over the applied batches only
    pub fn stack_color_at(&self, x: i32, y: i32) -> Option<Color> {
        resolve(self.active(), x, y)
    }
}

/// Walk `batches` newest first. Background fills sit beneath every other
/// batch, so they only answer when nothing else covers the coordinate.
pub(crate) fn resolve(batches: &[Batch], x: i32, y: i32) -> Option<Color> {
    batches
        .iter()
        .rev()
        .filter(|b| b.background_color().is_none())
        .find_map(|b| b.color_at(x, y))
        .or_else(|| batches.iter().rev().find_map(Batch::background_color))
}

impl ColorSampler for OperationStack {
    fn sample(&self, x: i32, y: i32) -> Option<Color> {
        self.stack_color_at(x, y)
    }
}
