//! Global bounds over the applied part of the history

use crate::batch::Batch;
use crate::types::Bounds;

/// Union of the finite bounds of every applied batch.
///
/// Background batches cover the whole plane and are skipped; the tracked
/// rectangle is what flood fill and export work within.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsTracker {
    bounds: Option<Bounds>,
}

impl BoundsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current global bounds, `None` when nothing finite is applied
    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Rebuild from scratch over `batches` (the applied prefix of the stack)
    pub fn recompute(&mut self, batches: &[Batch]) -> Option<Bounds> {
        self.bounds = batches
            .iter()
            .filter_map(Batch::bounds)
            .reduce(|acc, b| acc.union(&b));
        self.bounds
    }

    /// Grow by one newly applied batch
    pub fn include(&mut self, batch: &Batch) -> Option<Bounds> {
        if let Some(b) = batch.bounds() {
            self.bounds = Some(match self.bounds {
                Some(acc) => acc.union(&b),
                None => b,
            });
        }
        self.bounds
    }
}
