/// RGB frame (gray triples) with a 1-pixel vertical line of `value` at
/// column `col`, rows `rows`, on a zero background.
pub fn vertical_line_rgb(
    width: usize,
    height: usize,
    col: usize,
    rows: std::ops::RangeInclusive<usize>,
    value: u8,
) -> Vec<[u8; 3]> {
    assert!(col < width, "line column outside the frame");
    let mut img = vec![[0u8; 3]; width * height];
    for y in rows {
        img[y * width + col] = [value; 3];
    }
    img
}

/// Luma frame: 0 left of `col`, `mid` at `col`, `high` right of it.
pub fn ramp_edge_u8(width: usize, height: usize, col: usize, mid: u8, high: u8) -> Vec<u8> {
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in col..width {
            img[y * width + x] = if x == col { mid } else { high };
        }
    }
    img
}

/// Luma frame with a filled disc of `value` centred at `(cx, cy)`.
pub fn disc_u8(width: usize, height: usize, cx: f32, cy: f32, radius: f32, value: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                img[y * width + x] = value;
            }
        }
    }
    img
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32u8 } else { 220u8 };
        }
    }
    img
}
