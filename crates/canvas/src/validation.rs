use crate::constants::BYTES_PER_PIXEL;
use crate::error::EditorError;
use crate::types::Color;

/// Check that alpha is a finite value in 0..=1 and round it to the
/// precision stored in pixel buffers
pub fn validate_color(color: Color) -> Result<Color, EditorError> {
    if !color.a.is_finite() || !(0.0..=1.0).contains(&color.a) {
        return Err(EditorError::InvalidColor { alpha: color.a });
    }
    Ok(color.quantized())
}

/// Check that both coordinates fit within `limit` in magnitude
pub fn validate_coordinate(x: i64, y: i64, limit: i32) -> Result<(i32, i32), EditorError> {
    let limit_abs = limit.unsigned_abs() as u64;
    if x.unsigned_abs() > limit_abs || y.unsigned_abs() > limit_abs {
        return Err(EditorError::CoordinateOverflow { x, y, limit });
    }
    // Within the limit, so the narrowing is lossless
    Ok((x as i32, y as i32))
}

/// Check that a raw RGBA8 buffer matches its declared dimensions
pub fn validate_buffer(width: u32, height: u32, bytes: &[u8]) -> Result<(), EditorError> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if bytes.len() != expected {
        return Err(EditorError::InvalidBuffer {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color() {
        assert!(validate_color(Color::new(1, 2, 3, 0.0)).is_ok());
        assert!(validate_color(Color::new(1, 2, 3, 1.0)).is_ok());
        assert_eq!(
            validate_color(Color::new(1, 2, 3, 1.5)),
            Err(EditorError::InvalidColor { alpha: 1.5 })
        );
        assert!(validate_color(Color::new(1, 2, 3, -0.1)).is_err());
        assert!(validate_color(Color::new(1, 2, 3, f32::NAN)).is_err());
    }

    #[test]
    fn test_validate_color_rounds_alpha() {
        assert_eq!(
            validate_color(Color::new(1, 2, 3, 0.33)),
            Ok(Color::new(1, 2, 3, 0.3))
        );
        let faint = validate_color(Color::new(1, 2, 3, 0.04)).unwrap();
        assert!(faint.is_transparent());
        // Whatever survives validation reads back unchanged from a pixel
        for alpha in [0.07, 0.33, 0.5, 0.95, 1.0] {
            let color = validate_color(Color::new(9, 8, 7, alpha)).unwrap();
            assert_eq!(Color::from_rgba8(color.to_rgba8()), Some(color));
        }
    }

    #[test]
    fn test_validate_coordinate() {
        let limit = (1 << 30) - 1;
        assert_eq!(validate_coordinate(-5, 7, limit), Ok((-5, 7)));
        assert!(validate_coordinate(limit as i64, -(limit as i64), limit).is_ok());
        assert!(matches!(
            validate_coordinate(limit as i64 + 1, 0, limit),
            Err(EditorError::CoordinateOverflow { .. })
        ));
        assert!(validate_coordinate(0, i64::MIN, limit).is_err());
    }

    #[test]
    fn test_validate_buffer() {
        assert!(validate_buffer(2, 3, &[0; 24]).is_ok());
        assert_eq!(
            validate_buffer(2, 2, &[0; 15]),
            Err(EditorError::InvalidBuffer {
                expected: 16,
                actual: 15
            })
        );
    }
}
