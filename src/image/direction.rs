//! Binary per-pixel edge orientation.
use serde::{Deserialize, Serialize};

/// Edge orientation class derived from comparing `|Gx|` and `|Gy|`.
///
/// `Vertical` marks a vertical edge (horizontal intensity change, strong
/// `Gx`); `Horizontal` marks a horizontal edge (strong `Gy`). No
/// intermediate angles are represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeDirection {
    Horizontal,
    #[default]
    Vertical,
}

impl EdgeDirection {
    /// Classify a gradient; ties favour `Vertical`.
    #[inline]
    pub fn classify(gx: f32, gy: f32) -> Self {
        if gx.abs() >= gy.abs() {
            EdgeDirection::Vertical
        } else {
            EdgeDirection::Horizontal
        }
    }

    /// Nominal edge angle in degrees measured from the horizontal.
    pub fn degrees(self) -> f32 {
        match self {
            EdgeDirection::Horizontal => 0.0,
            EdgeDirection::Vertical => 90.0,
        }
    }

}

/// Row-major grid of [`EdgeDirection`] tags sharing the frame shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectionMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<EdgeDirection>,
}

impl DirectionMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![EdgeDirection::default(); w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> EdgeDirection {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, d: EdgeDirection) {
        self.data[y * self.w + x] = d;
    }

    /// Render as an angle map (0 or 90 degrees per cell).
    pub fn to_degrees(&self) -> super::ImageF32 {
        let data = self.data.iter().map(|d| d.degrees()).collect();
        super::ImageF32 {
            w: self.w,
            h: self.h,
            stride: self.w,
            data,
        }
    }
}

impl super::traits::ImageView for DirectionMap {
    type Pixel = EdgeDirection;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[EdgeDirection] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[EdgeDirection]> {
        Some(&self.data)
    }
}

impl super::traits::ImageViewMut for DirectionMap {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [EdgeDirection] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}
