//! Separable directional smoothing ahead of differentiation.
//!
//! A 7-tap kernel is applied along rows, then along columns of the row-pass
//! output. Samples closer than the kernel radius to a border are not
//! filtered on that axis and pass through from the preceding pass; the
//! derivative and suppression stages never read that band for detection.

use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). Odd length, centred.
    fn taps(&self) -> &[f32];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        SMOOTH_7TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Gaussian-derived 7-tap kernel; taps sum to 1.001.
pub const SMOOTH_7TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.006, 0.061, 0.242, 0.383, 0.242, 0.061, 0.006]);

/// Smooth with [`SMOOTH_7TAP`].
pub fn smooth(img: &ImageF32) -> ImageF32 {
    smooth_with(img, &SMOOTH_7TAP)
}

/// Horizontal pass, then vertical pass over its output.
pub fn smooth_with(img: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    let taps = filter.taps();
    let radius = filter.radius();
    let (w, h) = (img.w, img.h);

    let mut horiz = img.clone();
    if w > 2 * radius {
        for y in 0..h {
            let src = img.row(y);
            let dst = horiz.row_mut(y);
            for x in radius..w - radius {
                dst[x] = taps
                    .iter()
                    .zip(&src[x - radius..=x + radius])
                    .map(|(t, s)| t * s)
                    .sum();
            }
        }
    }

    let mut out = horiz.clone();
    if h > 2 * radius {
        for y in radius..h - radius {
            let dst = out.row_mut(y);
            dst.fill(0.0);
            for (k, &tap) in taps.iter().enumerate() {
                let src = horiz.row(y + k - radius);
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d += tap * s;
                }
            }
        }
    }
    out
}
