//! Integer rasterization of shapes into tile coordinates
//!
//! Points are produced in i64 so shapes reaching past the coordinate limit
//! can be generated and then filtered point by point.

/// Every cell of `[x, x+w) x [y, y+h)` when `filled`, otherwise the outer ring
pub fn rect_points(x: i64, y: i64, width: u32, height: u32, filled: bool) -> Vec<(i64, i64)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (w, h) = (width as i64, height as i64);
    let mut points = Vec::new();
    for dy in 0..h {
        let edge_row = dy == 0 || dy == h - 1;
        if filled || edge_row {
            points.extend((0..w).map(|dx| (x + dx, y + dy)));
        } else {
            points.push((x, y + dy));
            if w > 1 {
                points.push((x + w - 1, y + dy));
            }
        }
    }
    points
}

/// Midpoint circle outline around `(cx, cy)`.
///
/// Each step of the decision variable emits the 8 symmetric octant points;
/// points on the diagonals and axes repeat, callers dedup by coordinate.
pub fn circle_points(cx: i64, cy: i64, radius: u32) -> Vec<(i64, i64)> {
    let r = radius as i64;
    if r == 0 {
        return vec![(cx, cy)];
    }

    let mut points = Vec::with_capacity((r as usize + 1) * 8);
    let mut x = r;
    let mut y = 0i64;
    let mut decision = 1 - r;

    while x >= y {
        points.extend_from_slice(&[
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ]);
        y += 1;
        if decision < 0 {
            decision += 2 * y + 1;
        } else {
            x -= 1;
            decision += 2 * (y - x) + 1;
        }
    }
    points
}

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, both ends included
pub fn line_points(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<(i64, i64)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
