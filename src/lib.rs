#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;

// Stage-level modules, usable on their own.
pub mod edges;
pub mod linking;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{DetectorParams, EdgeChainDetector, FrameEdges};
pub use crate::diagnostics::FrameReport;
pub use crate::error::EdgeError;
pub use crate::linking::{link_edges, EdgeChain, EdgeChains, LinkParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use edge_chains::prelude::*;
///
/// # fn main() -> Result<(), EdgeError> {
/// let (w, h) = (64usize, 48usize);
/// let pixels = vec![[0u8; 3]; w * h];
/// let frame = ImageRgb8 { w, h, stride: w, data: &pixels };
///
/// let detector = EdgeChainDetector::new(DetectorParams::default());
/// let edges = detector.process_rgb(&frame)?;
/// println!("chains={} total_ms={:.3}", edges.chains.len(), edges.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageRgb8, ImageU8};
    pub use crate::{DetectorParams, EdgeChainDetector, EdgeChains, EdgeError, FrameEdges};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::edges::{
        anchor_list, direction_map, extract_anchors, gradient_map, gradient_map_with_threshold,
        grayscale, magnitude_map, smooth, sort_anchors, Anchor, AnchorMap, EmpiricalDistribution,
        GradientMap, GradientMode, SortOrder,
    };
    pub use crate::linking::{validate_chains, ChainGeometry, ClaimMap, EdgeLinker};
}
