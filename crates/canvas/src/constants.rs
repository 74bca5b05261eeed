/// Alpha read back from a pixel buffer is rounded to this many steps per unit.
pub const ALPHA_STEPS: f32 = 10.0;

/// Fully transparent RGBA8 pixel.
pub const TRANSPARENT_PIXEL: [u8; 4] = [0, 0, 0, 0];

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;
