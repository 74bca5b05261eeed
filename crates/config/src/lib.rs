//! Shared configuration for Tessera
//!
//! This crate provides the single source of truth for the tunables of the
//! tile editor core: when sparse batches get rasterized, how far a bucket
//! fill may spill past the painted area, and the coordinate limit.

use serde::{Deserialize, Serialize};

/// Tile count above which a sparse batch is rasterized at commit time
pub const DEFAULT_TILE_THRESHOLD: usize = 1024;

/// Bounds edge length (in tiles) above which a sparse batch is rasterized
pub const DEFAULT_EXTENT_THRESHOLD: u32 = 128;

/// Largest bounds area per tile a sparse batch may span and still be
/// rasterized; sparser batches stay sparse
pub const DEFAULT_MAX_AREA_PER_TILE: usize = 4;

/// Largest pixel count the editor allocates for a fill grid or an export
pub const DEFAULT_MAX_RASTER_AREA: usize = 1 << 24;

/// Tiles added around the painted area when tracing a bucket fill
pub const DEFAULT_FILL_MARGIN: u32 = 1;

/// Largest absolute tile coordinate (31-bit signed range)
pub const DEFAULT_MAX_COORDINATE: i32 = (1 << 30) - 1;

/// Thresholds that decide when a sparse batch becomes a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeConfig {
    /// Rasterize once a batch holds more tiles than this
    pub tile_threshold: usize,
    /// Rasterize once either bounds axis is longer than this
    pub extent_threshold: u32,
    /// Never rasterize when the bounds cover more than this many cells per tile
    pub max_area_per_tile: usize,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self {
            tile_threshold: DEFAULT_TILE_THRESHOLD,
            extent_threshold: DEFAULT_EXTENT_THRESHOLD,
            max_area_per_tile: DEFAULT_MAX_AREA_PER_TILE,
        }
    }
}

impl MaterializeConfig {
    /// Check a batch's size against the thresholds
    pub fn exceeded_by(&self, tile_count: usize, width: u32, height: u32) -> bool {
        tile_count > self.tile_threshold || width.max(height) > self.extent_threshold
    }

    /// Whether a buffer covering `area` cells stays proportional to the
    /// `tile_count` tiles it replaces
    pub fn dense_enough(&self, tile_count: usize, area: usize) -> bool {
        area <= tile_count.saturating_mul(self.max_area_per_tile)
    }
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Materialization heuristics
    pub materialize: MaterializeConfig,
    /// Margin added to the global bounds to form the flood fill rectangle
    pub fill_margin: u32,
    /// Coordinates with a larger magnitude are rejected
    pub max_coordinate: i32,
    /// Cap on the cells of a fill grid or an exported buffer
    pub max_raster_area: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            materialize: MaterializeConfig::default(),
            fill_margin: DEFAULT_FILL_MARGIN,
            max_coordinate: DEFAULT_MAX_COORDINATE,
            max_raster_area: DEFAULT_MAX_RASTER_AREA,
        }
    }
}

impl EditorConfig {
    /// Create a config with custom materialization thresholds
    pub fn with_thresholds(tile_threshold: usize, extent_threshold: u32) -> Self {
        Self {
            materialize: MaterializeConfig {
                tile_threshold,
                extent_threshold,
                ..MaterializeConfig::default()
            },
            ..Self::default()
        }
    }

    /// Check whether a coordinate is inside the addressable range
    pub fn coordinate_in_range(&self, value: i32) -> bool {
        value.unsigned_abs() <= self.max_coordinate.unsigned_abs()
    }
}
