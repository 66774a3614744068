//! Luminance conversion for incoming frames.
//!
//! RGB frames are reduced to the unweighted mean of their three channels;
//! 8-bit luma frames are lifted to `f32` unchanged. Both keep 0–255 units.
use crate::image::{ImageF32, ImageRgb8, ImageU8, ImageView, ImageViewMut};

const NORMALIZE_GRAYSCALE: f32 = 1.0 / 3.0;

/// Replace each RGB triple by the mean of its channels.
pub fn grayscale(frame: &ImageRgb8<'_>) -> ImageF32 {
    let mut out = ImageF32::new(frame.w, frame.h);
    for (y, src) in frame.rows().enumerate() {
        let dst = out.row_mut(y);
        for (d, &[r, g, b]) in dst.iter_mut().zip(src) {
            *d = NORMALIZE_GRAYSCALE * (r as f32 + g as f32 + b as f32);
        }
    }
    out
}

/// Copy an 8-bit luma frame into an `f32` grid.
pub fn gray_from_luma(frame: &ImageU8<'_>) -> ImageF32 {
    let mut out = ImageF32::new(frame.w, frame.h);
    for (y, src) in frame.rows().enumerate() {
        for (d, &s) in out.row_mut(y).iter_mut().zip(src) {
            *d = s as f32;
        }
    }
    out
}
