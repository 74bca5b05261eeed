//! Batches: one atomic edit occupying one slot of the undo/redo stack
//!
//! A batch is either a sparse set of tiles, a rasterized buffer, or an
//! unbounded background fill. Queries dispatch on [`BatchKind`].

mod materialize;

use std::collections::HashMap;

use crate::texture::Texture;
use crate::tile::Tile;
use crate::types::{Bounds, Color, Extent, TilePoint};

/// Storage backing a batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchKind {
    /// Per-tile colors, queried through the tile set
    Sparse,
    /// Sparse tiles rasterized into one buffer at commit time
    Materialized(Texture),
    /// Fill covering the whole plane
    Background(Color),
    /// Externally decoded buffer wrapped without building tiles
    Imported(Texture),
}

impl BatchKind {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            BatchKind::Sparse => "sparse",
            BatchKind::Materialized(_) => "materialized",
            BatchKind::Background(_) => "background",
            BatchKind::Imported(_) => "imported",
        }
    }
}

/// One atomic group of edits
#[derive(Debug, Clone)]
pub struct Batch {
    id: u64,
    kind: BatchKind,
    tiles: Vec<Tile>,
    /// Coordinate -> index into `tiles`
    index: HashMap<TilePoint, usize>,
    /// Running bounds of the tile set
    tile_bounds: Option<Bounds>,
}

impl Batch {
    /// Empty sparse batch, ready to receive tiles
    pub fn sparse(id: u64) -> Self {
        Self::with_kind(id, BatchKind::Sparse)
    }

    /// Background fill batch
    pub fn background(id: u64, color: Color) -> Self {
        Self::with_kind(id, BatchKind::Background(color))
    }

    /// Batch wrapping an imported buffer
    pub fn imported(id: u64, texture: Texture) -> Self {
        Self::with_kind(id, BatchKind::Imported(texture))
    }

    /// Batch holding an already rasterized buffer (flood fill output)
    pub fn rasterized(id: u64, texture: Texture) -> Self {
        Self::with_kind(id, BatchKind::Materialized(texture))
    }

    fn with_kind(id: u64, kind: BatchKind) -> Self {
        Self {
            id,
            kind,
            tiles: Vec::new(),
            index: HashMap::new(),
            tile_bounds: None,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &BatchKind {
        &self.kind
    }

    /// Background color, if this is a background batch
    pub fn background_color(&self) -> Option<Color> {
        match self.kind {
            BatchKind::Background(color) => Some(color),
            _ => None,
        }
    }

    /// Rasterized buffer for materialized and imported batches
    pub fn texture(&self) -> Option<&Texture> {
        match &self.kind {
            BatchKind::Materialized(texture) | BatchKind::Imported(texture) => Some(texture),
            BatchKind::Sparse | BatchKind::Background(_) => None,
        }
    }

    /// Tiles in insertion order
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Whether finalizing this batch would commit nothing
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            BatchKind::Sparse => self.tiles.is_empty(),
            BatchKind::Materialized(texture) | BatchKind::Imported(texture) => {
                texture.bounds().is_empty()
            }
            BatchKind::Background(_) => false,
        }
    }

    /// Tile at a coordinate
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index
            .get(&TilePoint::new(x, y))
            .map(|&i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        match self.index.get(&TilePoint::new(x, y)) {
            Some(&i) => Some(&mut self.tiles[i]),
            None => None,
        }
    }

    /// Insert a tile and grow the bounds.
    ///
    /// A tile whose coordinate is already present is handed back.
    pub fn add_tile(&mut self, tile: Tile) -> Result<(), Tile> {
        let key = tile.position();
        if self.index.contains_key(&key) {
            return Err(tile);
        }
        let point = Bounds::point(tile.x, tile.y);
        self.tile_bounds = Some(match self.tile_bounds {
            Some(bounds) => bounds.union(&point),
            None => point,
        });
        self.index.insert(key, self.tiles.len());
        self.tiles.push(tile);
        Ok(())
    }

    /// Spatial extent of the batch
    pub fn extent(&self) -> Extent {
        match &self.kind {
            BatchKind::Sparse => self.tile_bounds.map_or(Extent::Empty, Extent::Finite),
            BatchKind::Materialized(texture) | BatchKind::Imported(texture) => {
                if texture.bounds().is_empty() {
                    Extent::Empty
                } else {
                    Extent::Finite(texture.bounds())
                }
            }
            BatchKind::Background(_) => Extent::Unbounded,
        }
    }

    /// Finite bounds, `None` for empty or unbounded batches
    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.extent().finite()
    }

    /// Color this batch contributes at a coordinate.
    ///
    /// `None` lets a coordinate walk fall through to earlier batches.
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        match &self.kind {
            BatchKind::Sparse => {
                if !self.tile_bounds.is_some_and(|b| b.contains(x, y)) {
                    return None;
                }
                self.tile(x, y)
                    .and_then(Tile::active_color)
                    .filter(|color| !color.is_transparent())
            }
            BatchKind::Materialized(texture) | BatchKind::Imported(texture) => {
                texture.color_at(x, y)
            }
            BatchKind::Background(color) => Some(*color),
        }
    }

    /// Step every tile back one history entry (undo)
    pub(crate) fn replay_backward(&mut self) {
        for tile in &mut self.tiles {
            tile.retreat();
        }
    }

    /// Step every tile forward one history entry (redo)
    pub(crate) fn replay_forward(&mut self) {
        for tile in &mut self.tiles {
            tile.advance();
        }
    }
}
