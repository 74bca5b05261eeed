//! Tessera canvas - sparse tile editing with batched undo/redo
//!
//! This crate provides the editing core of the tile canvas:
//! - [`types`] - Colors, tile coordinates, and bounds
//! - [`tile`] - A tile with its per-position color history
//! - [`batch`] - Tiles and buffers grouped as one undoable edit
//! - [`stack`] - Operation stack with the undo/redo cursor
//! - [`bounds`] - Global bounds of the applied history
//! - [`fill`] - Bounded 4-connected flood fill over any color source
//! - [`shapes`] - Tile coordinates of rectangles, circles, and lines
//! - [`editor`] - The facade tying gestures, history, and export together

pub mod batch;
pub mod bounds;
pub mod constants;
pub mod editor;
pub mod error;
pub mod fill;
pub mod shapes;
pub mod stack;
pub mod texture;
pub mod tile;
pub mod types;
pub mod validation;

pub use batch::{Batch, BatchKind};
pub use bounds::BoundsTracker;
pub use constants::*;
pub use editor::{Editor, EditorEvent, FlattenedBuffer, ViewHost};
pub use error::EditorError;
pub use fill::{ColorSampler, FillResult, flood_fill};
pub use stack::OperationStack;
pub use texture::Texture;
pub use tile::Tile;
pub use types::*;
pub use validation::*;

pub use tessera_config::{EditorConfig, MaterializeConfig};
