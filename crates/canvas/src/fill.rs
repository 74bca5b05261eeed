//! Connected-region flood fill over a binary grid
//!
//! The fill works on a snapshot of the working rectangle:
//! 1. Every cell is sampled once and marked fillable or blocked
//! 2. An explicit-stack 4-connected trace promotes reachable cells to filled
//! 3. The filled cells are cropped to their bounding box and painted
//!
//! Building the grid is O(area of the rectangle); the trace is O(filled
//! cells), so callers should keep the rectangle tight.

use tracing::debug;

use crate::constants::TRANSPARENT_PIXEL;
use crate::texture::Texture;
use crate::types::{Bounds, Color, TilePoint};

/// Read access to resolved colors in tile space
pub trait ColorSampler {
    fn sample(&self, x: i32, y: i32) -> Option<Color>;
}

impl<F> ColorSampler for F
where
    F: Fn(i32, i32) -> Option<Color>,
{
    fn sample(&self, x: i32, y: i32) -> Option<Color> {
        self(x, y)
    }
}

/// Grid cell states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Cell {
    Blocked = 0,
    Fillable = 1,
    Filled = 2,
}

/// Cropped output of a flood fill
#[derive(Debug, Clone, PartialEq)]
pub struct FillResult {
    /// World-space origin of the buffer
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, transparent outside the filled region
    pub pixels: Vec<[u8; 4]>,
}

impl FillResult {
    fn empty(seed: TilePoint) -> Self {
        Self {
            x: seed.x,
            y: seed.y,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Zero-area result: the caller must not commit anything
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Number of painted cells
    pub fn filled_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != TRANSPARENT_PIXEL).count()
    }

    /// Freeze the buffer into a texture
    pub fn into_texture(self) -> Texture {
        let bounds = self.bounds();
        Texture::from_pixels(bounds, self.pixels)
    }
}

/// Whether a sampled cell belongs to the region seeded on `base`.
///
/// A transparent base matches empty cells; a visible base matches on RGB,
/// alpha ignored.
fn matches_base(base: Option<Color>, sample: Option<Color>) -> bool {
    let sample = sample.filter(|c| !c.is_transparent());
    match base.filter(|c| !c.is_transparent()) {
        None => sample.is_none(),
        Some(base) => sample.is_some_and(|c| c.same_rgb(base)),
    }
}

/// Fill the region connected to `seed` whose cells match `base`.
///
/// Only cells inside `area` are considered. A seed outside `area` or on a
/// non-matching cell produces an empty result.
pub fn flood_fill<S>(
    sampler: &S,
    area: Bounds,
    seed: TilePoint,
    base: Option<Color>,
    fill: Color,
) -> FillResult
where
    S: ColorSampler + ?Sized,
{
    let Some(seed_index) = area.index_of(seed.x, seed.y) else {
        debug!("flood_fill: seed ({}, {}) outside {:?}", seed.x, seed.y, area);
        return FillResult::empty(seed);
    };

    let width = area.width as usize;
    let height = area.height as usize;

    let mut grid: Vec<Cell> = area
        .points()
        .map(|p| {
            if matches_base(base, sampler.sample(p.x, p.y)) {
                Cell::Fillable
            } else {
                Cell::Blocked
            }
        })
        .collect();

    if grid[seed_index] != Cell::Fillable {
        debug!("flood_fill: seed ({}, {}) not fillable", seed.x, seed.y);
        return FillResult::empty(seed);
    }

    // Cells are marked filled when queued so nothing is pushed twice
    let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
    let (mut max_x, mut max_y) = (0usize, 0usize);
    let mut filled = 0usize;
    let mut stack = vec![seed_index];
    grid[seed_index] = Cell::Filled;

    while let Some(index) = stack.pop() {
        let cx = index % width;
        let cy = index / width;
        filled += 1;
        min_x = min_x.min(cx);
        min_y = min_y.min(cy);
        max_x = max_x.max(cx);
        max_y = max_y.max(cy);

        let mut visit = |i: usize| {
            if grid[i] == Cell::Fillable {
                grid[i] = Cell::Filled;
                stack.push(i);
            }
        };
        if cx > 0 {
            visit(index - 1);
        }
        if cx + 1 < width {
            visit(index + 1);
        }
        if cy > 0 {
            visit(index - width);
        }
        if cy + 1 < height {
            visit(index + width);
        }
    }

    let out_w = max_x - min_x + 1;
    let out_h = max_y - min_y + 1;
    let paint = fill.to_rgba8();
    let mut pixels = vec![TRANSPARENT_PIXEL; out_w * out_h];
    for row in 0..out_h {
        let src = (min_y + row) * width + min_x;
        let dst = row * out_w;
        for col in 0..out_w {
            if grid[src + col] == Cell::Filled {
                pixels[dst + col] = paint;
            }
        }
    }

    let result = FillResult {
        x: (area.x as i64 + min_x as i64) as i32,
        y: (area.y as i64 + min_y as i64) as i32,
        width: out_w as u32,
        height: out_h as u32,
        pixels,
    };
    debug!(
        "flood_fill: {} cells in {}x{} at ({}, {}) from {}x{} grid",
        filled, result.width, result.height, result.x, result.y, width, height
    );
    result
}
