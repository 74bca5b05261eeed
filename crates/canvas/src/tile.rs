//! Single addressable tile with its color history

use crate::types::{Color, TileColor, TilePoint};

/// Smallest addressable canvas unit.
///
/// The history is stored oldest-first; `cursor` points at the entry that is
/// currently rendered. Entries past the cursor were stepped over by undo and
/// come back on redo.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub id: u64,
    history: Vec<TileColor>,
    cursor: usize,
}

impl Tile {
    /// Create a tile already carrying a color.
    /// Colors are stored with alpha rounded as in [`Color::quantized`].
    pub fn new(x: i32, y: i32, id: u64, color: Color) -> Self {
        Self {
            x,
            y,
            id,
            history: vec![TileColor::Set(color.quantized())],
            cursor: 0,
        }
    }

    /// Create a tile reserved by a gesture that has not chosen its color yet
    pub fn reserved(x: i32, y: i32, id: u64) -> Self {
        Self {
            x,
            y,
            id,
            history: vec![TileColor::Unset],
            cursor: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> TilePoint {
        TilePoint::new(self.x, self.y)
    }

    /// Entry at the cursor
    #[inline]
    pub fn active(&self) -> TileColor {
        self.history[self.cursor]
    }

    /// Color at the cursor, `None` while reserved
    #[inline]
    pub fn active_color(&self) -> Option<Color> {
        self.active().color()
    }

    /// Number of history entries
    #[inline]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor sits on the newest entry
    #[inline]
    pub fn is_at_head(&self) -> bool {
        self.cursor + 1 == self.history.len()
    }

    /// Make `color` the active entry.
    ///
    /// Rejected when the tile is reserved or already shows `color`.
    /// Entries after the cursor are dropped first.
    pub fn paint(&mut self, color: Color) -> bool {
        let color = color.quantized();
        match self.active() {
            TileColor::Unset => return false,
            TileColor::Set(active) if active == color => return false,
            TileColor::Set(_) => {}
        }
        self.history.truncate(self.cursor + 1);
        self.history.push(TileColor::Set(color));
        self.cursor = self.history.len() - 1;
        true
    }

    /// Color a reserved tile in place
    pub fn resolve(&mut self, color: Color) -> bool {
        if !self.active().is_unset() {
            return false;
        }
        self.history[self.cursor] = TileColor::Set(color.quantized());
        true
    }

    /// Drop the active color and fall back to the previous one.
    /// The base entry is never removed.
    pub fn erase(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.history.truncate(self.cursor);
        self.cursor -= 1;
        true
    }

    /// Step the cursor toward the newest entry (redo replay)
    pub fn advance(&mut self) -> bool {
        if self.is_at_head() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step the cursor toward the base entry (undo replay)
    pub fn retreat(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}
