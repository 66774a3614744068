//! Empirical cumulative distribution of gradient magnitudes.
//!
//! Entry `k` (k ≥ 1) holds the fraction of non-zero magnitude pixels whose
//! value is at least `k`, so "how rare is an edge pixel this strong" becomes
//! a table lookup. Entry 0 holds the total pixel count instead of a fraction.
//! Built from a 256-bin histogram and a suffix sum in O(W·H + 256).
use crate::image::ImageF32;
use serde::Serialize;

pub const NUM_PIXEL_VALUES: usize = 256;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpiricalDistribution {
    table: Vec<f32>,
    edge_pixels: usize,
    total_pixels: usize,
}

impl EmpiricalDistribution {
    pub fn from_magnitude(magnitude: &ImageF32) -> Self {
        let mut histogram = [0usize; NUM_PIXEL_VALUES];
        let mut edge_pixels = 0usize;
        for &m in &magnitude.data {
            if m > 0.0 {
                edge_pixels += 1;
                let bin = (m.floor() as usize).min(NUM_PIXEL_VALUES - 1);
                histogram[bin] += 1;
            }
        }

        let total_pixels = magnitude.w * magnitude.h;
        let mut table = vec![0.0f32; NUM_PIXEL_VALUES];
        table[0] = total_pixels as f32;
        if edge_pixels > 0 {
            let mut at_least = 0usize;
            for k in (1..NUM_PIXEL_VALUES).rev() {
                at_least += histogram[k];
                table[k] = at_least as f32 / edge_pixels as f32;
            }
        }

        Self {
            table,
            edge_pixels,
            total_pixels,
        }
    }

    /// Raw table entry; `k` must be below [`NUM_PIXEL_VALUES`].
    pub fn entry(&self, k: usize) -> f32 {
        self.table[k]
    }

    pub fn table(&self) -> &[f32] {
        &self.table
    }

    /// Fraction of edge pixels with magnitude ≥ `mu`.
    ///
    /// Values below 1 map to 1.0 (every edge pixel qualifies); values above
    /// 255 saturate at the last entry.
    pub fn survival(&self, mu: f32) -> f32 {
        if mu.is_nan() || mu < 1.0 {
            return if self.edge_pixels > 0 { 1.0 } else { 0.0 };
        }
        let k = (mu.floor() as usize).min(NUM_PIXEL_VALUES - 1);
        self.table[k]
    }

    /// Number of pixels with non-zero magnitude.
    pub fn edge_pixel_count(&self) -> usize {
        self.edge_pixels
    }

    pub fn total_pixel_count(&self) -> usize {
        self.total_pixels
    }
}
