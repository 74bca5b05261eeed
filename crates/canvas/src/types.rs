use serde::{Deserialize, Serialize};

use crate::constants::ALPHA_STEPS;

/// RGBA color with 8-bit channels and a unit-range alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in 0..=1
    pub a: f32,
}

impl Color {
    /// Fully transparent black
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0.0);

    /// Construct a color without validating alpha.
    /// Use [`crate::validation::validate_color`] at API boundaries.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Decode an RGBA8 pixel. The alpha byte is mapped to 0..=1 and rounded
    /// to one decimal; `None` for pixels with no coverage.
    pub fn from_rgba8(pixel: [u8; 4]) -> Option<Self> {
        let [r, g, b, a] = pixel;
        let alpha = ((a as f32 / 255.0) * ALPHA_STEPS).round() / ALPHA_STEPS;
        if alpha <= 0.0 {
            return None;
        }
        Some(Self::new(r, g, b, alpha))
    }

    /// Round alpha to the precision a pixel buffer reads back, so the same
    /// color comes out of tiles and of rasterized buffers
    pub fn quantized(self) -> Self {
        Self {
            a: (self.a * ALPHA_STEPS).round() / ALPHA_STEPS,
            ..self
        }
    }

    /// Encode as an RGBA8 pixel
    pub fn to_rgba8(self) -> [u8; 4] {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }

    /// Whether the color has no visible coverage
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// Compare color channels only, ignoring alpha
    #[inline]
    pub fn same_rgb(self, other: Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

/// Entry of a tile's color history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TileColor {
    /// Reserved by an in-progress gesture, not yet colored
    Unset,
    Set(Color),
}

impl TileColor {
    /// The color if one has been assigned
    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            TileColor::Unset => None,
            TileColor::Set(color) => Some(color),
        }
    }

    #[inline]
    pub fn is_unset(self) -> bool {
        matches!(self, TileColor::Unset)
    }
}

/// A position in tile space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in tile space; `width`/`height` are inclusive
/// counts of tiles, so a single tile has a 1x1 bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of a single tile
    pub const fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Bounds spanning two inclusive corners
    pub fn from_corners(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: (max_x as i64 - min_x as i64 + 1) as u32,
            height: (max_y as i64 - min_y as i64 + 1) as u32,
        }
    }

    /// Last column covered (inclusive)
    #[inline]
    pub fn max_x(&self) -> i32 {
        (self.x as i64 + self.width as i64 - 1) as i32
    }

    /// Last row covered (inclusive)
    #[inline]
    pub fn max_y(&self) -> i32 {
        (self.y as i64 + self.height as i64 - 1) as i32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of tiles covered
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let dx = x as i64 - self.x as i64;
        let dy = y as i64 - self.y as i64;
        dx >= 0 && dy >= 0 && dx < self.width as i64 && dy < self.height as i64
    }

    /// Row-major index of a contained tile
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let dx = (x as i64 - self.x as i64) as usize;
        let dy = (y as i64 - self.y as i64) as usize;
        Some(dy * self.width as usize + dx)
    }

    /// Smallest bounds covering both rectangles
    pub fn union(&self, other: &Bounds) -> Bounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Bounds::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Grow by `margin` tiles on every side, saturating at the i32 range
    pub fn expand(&self, margin: u32) -> Bounds {
        let m = margin as i64;
        let min_x = (self.x as i64 - m).max(i32::MIN as i64) as i32;
        let min_y = (self.y as i64 - m).max(i32::MIN as i64) as i32;
        let max_x = (self.max_x() as i64 + m).min(i32::MAX as i64) as i32;
        let max_y = (self.max_y() as i64 + m).min(i32::MAX as i64) as i32;
        Bounds::from_corners(min_x, min_y, max_x, max_y)
    }

    /// Iterate covered coordinates in row-major order
    pub fn points(&self) -> impl Iterator<Item = TilePoint> + '_ {
        (0..self.height as i64).flat_map(move |dy| {
            (0..self.width as i64).map(move |dx| {
                TilePoint::new((self.x as i64 + dx) as i32, (self.y as i64 + dy) as i32)
            })
        })
    }
}

/// Spatial extent of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extent {
    /// No tiles yet
    Empty,
    Finite(Bounds),
    /// Covers the whole plane (background fills)
    Unbounded,
}

impl Extent {
    /// Finite bounds, if any
    #[inline]
    pub fn finite(self) -> Option<Bounds> {
        match self {
            Extent::Finite(bounds) => Some(bounds),
            Extent::Empty | Extent::Unbounded => None,
        }
    }

    #[inline]
    pub fn contains(self, x: i32, y: i32) -> bool {
        match self {
            Extent::Empty => false,
            Extent::Finite(bounds) => bounds.contains(x, y),
            Extent::Unbounded => true,
        }
    }
}
