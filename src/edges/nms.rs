//! Non-maximum suppression on gradient magnitude guided by the direction map.
//!
//! A ridge pixel must be a local maximum across the edge it belongs to:
//! vertical-class pixels are compared with their left and right neighbours,
//! horizontal-class pixels with the neighbours above and below. A pixel
//! survives when its magnitude is not smaller than either neighbour, so flat
//! ridge tops of width two keep both pixels.
//!
//! Only interior pixels are examined; the outermost 1-pixel frame is always
//! suppressed, so every anchor has a full 3×3 neighbourhood.
use super::anchors::AnchorMap;
use crate::error::{ensure_same_shape, EdgeError};
use crate::image::{DirectionMap, EdgeDirection, ImageF32, ImageView, ImageViewMut};

/// Suppress non-ridge pixels; survivors keep their magnitude as strength.
pub fn extract_anchors(magnitude: &ImageF32, direction: &DirectionMap) -> Result<AnchorMap, EdgeError> {
    ensure_same_shape(magnitude.shape(), direction.shape())?;
    let (w, h) = (magnitude.w, magnitude.h);
    let mut strengths = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return Ok(AnchorMap::new(strengths));
    }

    for y in 1..h - 1 {
        let mag_prev = magnitude.row(y - 1);
        let mag_row = magnitude.row(y);
        let mag_next = magnitude.row(y + 1);
        let dir_row = direction.row(y);
        let out = strengths.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag.is_nan() || mag <= 0.0 {
                continue;
            }
            let (neighbor1, neighbor2) = match dir_row[x] {
                EdgeDirection::Vertical => (mag_row[x - 1], mag_row[x + 1]),
                EdgeDirection::Horizontal => (mag_prev[x], mag_next[x]),
            };
            if mag < neighbor1 || mag < neighbor2 {
                continue;
            }
            out[x] = mag;
        }
    }

    Ok(AnchorMap::new(strengths))
}
