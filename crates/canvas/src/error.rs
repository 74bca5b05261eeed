//! Error types for editor operations.

/// Errors returned by the editor's public operations.
///
/// All of these are raised before any state is touched, so the editor stays
/// usable after a rejected call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("Invalid color alpha: {alpha} (expected 0..=1)")]
    InvalidColor { alpha: f32 },

    #[error("Coordinate overflow: ({x}, {y}) exceeds +/-{limit}")]
    CoordinateOverflow { x: i64, y: i64, limit: i32 },

    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Area too large: {width}x{height} exceeds {limit} cells")]
    AreaTooLarge { width: u32, height: u32, limit: usize },

    #[error("No stroke in progress")]
    NoActiveStroke,

    #[error("A stroke is already in progress")]
    StrokeInProgress,
}
