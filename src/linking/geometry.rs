//! Principal-axis summary of a chain's pixel cloud.
use super::chain::EdgeChain;
use nalgebra::{Matrix2, SymmetricEigen};
use serde::Serialize;

/// Line fit of a chain via the 2x2 covariance of its pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainGeometry {
    /// Mean `(x, y)` of the chain pixels
    pub centroid: [f32; 2],
    /// Unit tangent of the dominant axis, oriented so `x >= 0` (or `y > 0`
    /// for a vertical axis)
    pub direction: [f32; 2],
    /// Extreme projections onto the dominant axis, as image points
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    /// Span along the dominant axis
    pub length: f32,
    /// Span across the dominant axis
    pub width: f32,
    /// `1 - lambda_min / lambda_max`; 1 for a perfectly straight chain
    pub linearity: f32,
}

impl ChainGeometry {
    /// Fit the chain; `None` when it has fewer than two pixels or no spread.
    pub fn fit(chain: &EdgeChain) -> Option<Self> {
        if chain.len() < 2 {
            return None;
        }
        let count = chain.len() as f32;
        let (mut sx, mut sy) = (0.0f32, 0.0f32);
        for p in &chain.pixels {
            sx += p.col as f32;
            sy += p.row as f32;
        }
        let cx = sx / count;
        let cy = sy / count;

        let (mut cxx, mut cyy, mut cxy) = (0.0f32, 0.0f32, 0.0f32);
        for p in &chain.pixels {
            let dx = p.col as f32 - cx;
            let dy = p.row as f32 - cy;
            cxx += dx * dx;
            cyy += dy * dy;
            cxy += dx * dy;
        }
        let cov = Matrix2::new(cxx / count, cxy / count, cxy / count, cyy / count);
        let eig = SymmetricEigen::new(cov);
        let (vmax, lambda_max, lambda_min) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
            (eig.eigenvectors.column(0), eig.eigenvalues[0], eig.eigenvalues[1])
        } else {
            (eig.eigenvectors.column(1), eig.eigenvalues[1], eig.eigenvalues[0])
        };
        if !lambda_max.is_finite() || lambda_max <= 0.0 {
            return None;
        }

        let mut tx = vmax[0];
        let mut ty = vmax[1];
        let norm = (tx * tx + ty * ty).sqrt();
        if !norm.is_finite() || norm < 1e-6 {
            return None;
        }
        tx /= norm;
        ty /= norm;
        if tx < 0.0 || (tx == 0.0 && ty < 0.0) {
            tx = -tx;
            ty = -ty;
        }
        let (nx, ny) = (-ty, tx);

        let mut smin = f32::INFINITY;
        let mut smax = f32::NEG_INFINITY;
        let mut nmin = f32::INFINITY;
        let mut nmax = f32::NEG_INFINITY;
        for p in &chain.pixels {
            let dx = p.col as f32 - cx;
            let dy = p.row as f32 - cy;
            let s = dx * tx + dy * ty;
            let n = dx * nx + dy * ny;
            smin = smin.min(s);
            smax = smax.max(s);
            nmin = nmin.min(n);
            nmax = nmax.max(n);
        }

        Some(Self {
            centroid: [cx, cy],
            direction: [tx, ty],
            p0: [cx + smin * tx, cy + smin * ty],
            p1: [cx + smax * tx, cy + smax * ty],
            length: smax - smin,
            width: nmax - nmin,
            linearity: (1.0 - lambda_min.max(0.0) / lambda_max).clamp(0.0, 1.0),
        })
    }

    /// Orientation of the dominant axis in degrees, in `[0, 180)`.
    pub fn angle_degrees(&self) -> f32 {
        let a = self.direction[1].atan2(self.direction[0]).to_degrees();
        if a < 0.0 {
            a + 180.0
        } else if a >= 180.0 {
            a - 180.0
        } else {
            a
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::Anchor;
    use crate::image::EdgeDirection;

    fn chain_of(cells: &[(usize, usize)]) -> EdgeChain {
        let pixels: Vec<_> = cells.iter().map(|&(x, y)| Anchor::new(y, x, 10.0)).collect();
        EdgeChain::from_branches(0, pixels[0], EdgeDirection::Vertical, Vec::new(), pixels[1..].to_vec())
    }

    #[test]
    fn vertical_chain_fits_vertical_axis() {
        let chain = chain_of(&[(4, 1), (4, 2), (4, 3), (4, 4), (4, 5)]);
        let g = ChainGeometry::fit(&chain).unwrap();
        assert!((g.centroid[0] - 4.0).abs() < 1e-5);
        assert!((g.centroid[1] - 3.0).abs() < 1e-5);
        assert!(g.direction[0].abs() < 1e-4);
        assert!((g.direction[1].abs() - 1.0).abs() < 1e-4);
        assert!((g.length - 4.0).abs() < 1e-4);
        assert!(g.width.abs() < 1e-4);
        assert!((g.linearity - 1.0).abs() < 1e-4);
        assert!((g.angle_degrees() - 90.0).abs() < 1e-2);
    }

    #[test]
    fn diagonal_chain_has_45_degree_axis() {
        let chain = chain_of(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
        let g = ChainGeometry::fit(&chain).unwrap();
        assert!((g.angle_degrees() - 45.0).abs() < 1e-2);
        assert!((g.length - 3.0 * 2f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn staircase_is_less_linear_than_straight_line() {
        let chain = chain_of(&[(1, 1), (2, 1), (2, 2), (3, 2), (3, 3), (2, 4), (1, 4)]);
        let g = ChainGeometry::fit(&chain).unwrap();
        assert!(g.linearity < 0.99);
        assert!(g.width > 0.5);
    }

    #[test]
    fn single_pixel_has_no_geometry() {
        let chain = chain_of(&[(3, 3)]);
        assert!(ChainGeometry::fit(&chain).is_none());
    }
}
