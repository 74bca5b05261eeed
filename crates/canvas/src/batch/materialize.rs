//! Rasterizing sparse batches into a single buffer

use tessera_config::MaterializeConfig;
use tracing::debug;

use crate::texture::Texture;
use crate::types::{Color, TilePoint};

use super::{Batch, BatchKind};

impl Batch {
    /// Whether a sparse batch is large enough to be worth rasterizing.
    ///
    /// Batches whose bounds are mostly empty never qualify, so a buffer
    /// stays proportional to the tiles it replaces.
    pub fn exceeds_threshold(&self, config: &MaterializeConfig) -> bool {
        if !matches!(self.kind, BatchKind::Sparse) {
            return false;
        }
        let Some(bounds) = self.tile_bounds else {
            return false;
        };
        let count = self.tiles.len();
        if !config.exceeded_by(count, bounds.width, bounds.height) {
            return false;
        }
        if !config.dense_enough(count, bounds.area()) {
            debug!(
                "Batch {} too sparse to rasterize ({} tiles over {}x{})",
                self.id, count, bounds.width, bounds.height
            );
            return false;
        }
        true
    }

    /// Rasterize the active tile colors into a buffer covering the bounds.
    ///
    /// Only sparse, non-empty batches change; returns whether it happened.
    /// Tiles are kept so undo/redo replay still reaches them.
    pub fn materialize(&mut self) -> bool {
        if !matches!(self.kind, BatchKind::Sparse) {
            return false;
        }
        let Some(bounds) = self.tile_bounds else {
            return false;
        };

        let texture = Texture::rasterize(bounds, |x, y| {
            self.index
                .get(&TilePoint::new(x, y))
                .and_then(|&i| self.tiles[i].active_color())
                .filter(|color| !color.is_transparent())
        });

        debug!(
            "Materialized batch {} ({} tiles, {}x{})",
            self.id,
            self.tiles.len(),
            bounds.width,
            bounds.height
        );
        self.kind = BatchKind::Materialized(texture);
        true
    }

    /// Whether any tile is still reserved by an unfinished gesture
    pub fn has_reserved_tiles(&self) -> bool {
        self.tiles.iter().any(|tile| tile.active().is_unset())
    }

    /// Color every reserved tile, returning how many were resolved
    pub(crate) fn resolve_reserved(&mut self, color: Color) -> usize {
        let mut resolved = 0;
        for tile in &mut self.tiles {
            if tile.resolve(color) {
                resolved += 1;
            }
        }
        resolved
    }
}
