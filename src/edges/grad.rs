//! Prewitt-style gradients with magnitude and a binary direction class.
//!
//! - Row pass: `[-1, 0, 1]` (derivative) and `[1, 1, 1]` (average) along
//!   each row.
//! - Column pass: `[1; 1; 1]` over the row derivative gives `gx`,
//!   `[-1; 0; 1]` over the row average gives `gy`.
//! - Magnitude is the L1 norm `|gx| + |gy|`, zeroed below a quantization
//!   noise threshold tuned for this kernel pair.
//! - Direction keeps only two classes (see [`EdgeDirection`]).
//!
//! The outermost row and column on every side stay zero because the 3×3
//! support cannot be centred there. `gx`/`gy` are recomputed on each call
//! instead of being cached between the magnitude and direction requests.
//!
//! Complexity: O(W·H) per call; memory: four float buffers.
use crate::image::{DirectionMap, EdgeDirection, ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

/// Magnitudes below this value are treated as quantization noise.
pub const QUANTIZATION_THRESHOLD: f32 = 8.48;

/// Which map [`gradient_map`] produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientMode {
    Magnitude,
    Direction,
}

/// Output of [`gradient_map`], tagged by the requested mode.
#[derive(Clone, Debug)]
pub enum GradientMap {
    Magnitude(ImageF32),
    Direction(DirectionMap),
}

impl GradientMap {
    pub fn into_magnitude(self) -> Option<ImageF32> {
        match self {
            GradientMap::Magnitude(m) => Some(m),
            GradientMap::Direction(_) => None,
        }
    }

    pub fn into_direction(self) -> Option<DirectionMap> {
        match self {
            GradientMap::Direction(d) => Some(d),
            GradientMap::Magnitude(_) => None,
        }
    }
}

/// Per-pixel derivative buffers.
#[derive(Clone, Debug, Default)]
pub struct Grad {
    /// Row derivative averaged over three rows
    pub gx: ImageF32,
    /// Column derivative of the three-pixel row average
    pub gy: ImageF32,
}

/// Compute `gx` and `gy` on a single-channel float image.
pub fn prewitt_gradients(l: &ImageF32) -> Grad {
    let (w, h) = (l.w, l.h);
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return Grad { gx, gy };
    }

    let mut temp_x = ImageF32::new(w, h);
    let mut temp_y = ImageF32::new(w, h);
    for y in 0..h {
        let src = l.row(y);
        let tx = temp_x.row_mut(y);
        for x in 1..w - 1 {
            tx[x] = src[x + 1] - src[x - 1];
        }
        let ty = temp_y.row_mut(y);
        for x in 1..w - 1 {
            ty[x] = src[x - 1] + src[x] + src[x + 1];
        }
    }

    for y in 1..h - 1 {
        let (tx_prev, tx_row, tx_next) = (temp_x.row(y - 1), temp_x.row(y), temp_x.row(y + 1));
        let out_gx = gx.row_mut(y);
        for x in 0..w {
            out_gx[x] = tx_prev[x] + tx_row[x] + tx_next[x];
        }
        let (ty_prev, ty_next) = (temp_y.row(y - 1), temp_y.row(y + 1));
        let out_gy = gy.row_mut(y);
        for x in 0..w {
            out_gy[x] = ty_next[x] - ty_prev[x];
        }
    }

    Grad { gx, gy }
}

/// Compute the map selected by `mode` with the default noise threshold.
pub fn gradient_map(l: &ImageF32, mode: GradientMode) -> GradientMap {
    gradient_map_with_threshold(l, mode, QUANTIZATION_THRESHOLD)
}

/// Compute the map selected by `mode`; `magnitude_threshold` only affects
/// [`GradientMode::Magnitude`].
pub fn gradient_map_with_threshold(
    l: &ImageF32,
    mode: GradientMode,
    magnitude_threshold: f32,
) -> GradientMap {
    match mode {
        GradientMode::Magnitude => GradientMap::Magnitude(magnitude_map(l, magnitude_threshold)),
        GradientMode::Direction => GradientMap::Direction(direction_map(l)),
    }
}

/// Thresholded L1 gradient magnitude.
pub fn magnitude_map(l: &ImageF32, magnitude_threshold: f32) -> ImageF32 {
    let Grad { gx, gy } = prewitt_gradients(l);
    let data = gx
        .data
        .iter()
        .zip(&gy.data)
        .map(|(&x, &y)| {
            let mag = x.abs() + y.abs();
            if mag < magnitude_threshold {
                0.0
            } else {
                mag
            }
        })
        .collect();
    ImageF32 {
        w: l.w,
        h: l.h,
        stride: l.w,
        data,
    }
}

/// Binary direction classes; ties (including flat regions) are `Vertical`.
pub fn direction_map(l: &ImageF32) -> DirectionMap {
    let Grad { gx, gy } = prewitt_gradients(l);
    let data = gx
        .data
        .iter()
        .zip(&gy.data)
        .map(|(&x, &y)| EdgeDirection::classify(x, y))
        .collect();
    DirectionMap {
        w: l.w,
        h: l.h,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: usize, h: usize, split_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in split_x..w {
                img.set(x, y, 100.0);
            }
        }
        img
    }

    fn transpose(img: &ImageF32) -> ImageF32 {
        let mut out = ImageF32::new(img.h, img.w);
        for y in 0..img.h {
            for x in 0..img.w {
                out.set(y, x, img.get(x, y));
            }
        }
        out
    }

    #[test]
    fn vertical_step_is_vertical_and_concentrated() {
        let img = vertical_step(20, 10, 10);
        let mag = magnitude_map(&img, QUANTIZATION_THRESHOLD);
        let dir = direction_map(&img);
        for y in 1..9 {
            for x in 0..20 {
                let m = mag.get(x, y);
                if x == 9 || x == 10 {
                    assert_eq!(m, 300.0, "({x},{y})");
                    assert_eq!(dir.get(x, y), EdgeDirection::Vertical);
                } else {
                    assert_eq!(m, 0.0, "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn horizontal_step_is_horizontal() {
        let img = transpose(&vertical_step(20, 10, 10));
        let mag = magnitude_map(&img, QUANTIZATION_THRESHOLD);
        let dir = direction_map(&img);
        for x in 1..9 {
            for y in [9usize, 10] {
                assert_eq!(mag.get(x, y), 300.0);
                assert_eq!(dir.get(x, y), EdgeDirection::Horizontal);
            }
        }
    }

    #[test]
    fn weak_gradients_are_zeroed_and_strong_pass_unchanged() {
        // slope 1 gives |gx| = 6, slope 1.5 gives |gx| = 9
        for (slope, expected) in [(1.0f32, 0.0f32), (1.5, 9.0)] {
            let mut img = ImageF32::new(12, 8);
            for y in 0..8 {
                for x in 0..12 {
                    img.set(x, y, slope * x as f32);
                }
            }
            let mag = magnitude_map(&img, QUANTIZATION_THRESHOLD);
            for y in 1..7 {
                for x in 1..11 {
                    assert!((mag.get(x, y) - expected).abs() < 1e-4, "slope {slope}");
                }
            }
        }
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // a single sample right of (4, 4) gives gx = v, gy = 0 there
        for (v, expected) in [
            (QUANTIZATION_THRESHOLD, QUANTIZATION_THRESHOLD),
            (QUANTIZATION_THRESHOLD - 0.01, 0.0),
        ] {
            let mut img = ImageF32::new(9, 9);
            img.set(5, 4, v);
            let grad = prewitt_gradients(&img);
            assert_eq!(grad.gx.get(4, 4), v);
            assert_eq!(grad.gy.get(4, 4), 0.0);
            let mag = magnitude_map(&img, QUANTIZATION_THRESHOLD);
            assert_eq!(mag.get(4, 4), expected, "v = {v}");
        }
    }

    #[test]
    fn outer_frame_stays_zero() {
        let mut img = ImageF32::new(9, 9);
        for (i, v) in img.data.iter_mut().enumerate() {
            *v = ((i * 37) % 255) as f32;
        }
        let grad = prewitt_gradients(&img);
        for x in 0..9 {
            assert_eq!(grad.gx.get(x, 0), 0.0);
            assert_eq!(grad.gy.get(x, 8), 0.0);
        }
    }

    #[test]
    fn mode_selects_variant() {
        let img = vertical_step(10, 10, 5);
        assert!(gradient_map(&img, GradientMode::Magnitude)
            .into_magnitude()
            .is_some());
        assert!(gradient_map(&img, GradientMode::Direction)
            .into_magnitude()
            .is_none());
        let dir = gradient_map(&img, GradientMode::Direction)
            .into_direction()
            .unwrap();
        assert_eq!(dir.get(5, 5), EdgeDirection::Vertical);
        assert!(gradient_map(&img, GradientMode::Magnitude)
            .into_direction()
            .is_none());
    }
}
