//! Edge-chain detector orchestrating the per-frame pipeline.
//!
//! Overview
//! - Converts the frame to a single luminance channel (unweighted RGB mean or
//!   8-bit luma as-is), keeping 0–255 units.
//! - Smooths with a separable 7-tap kernel (optional).
//! - Computes the thresholded gradient magnitude and the binary direction
//!   class as two independent maps of the same frame.
//! - Suppresses non-maxima across the edge to get anchors, lists them and
//!   sorts them strongest first.
//! - Links anchors into chains with a single-threaded claim map, then
//!   optionally validates chains against the frame's magnitude statistics
//!   and drops short ones.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the [`EdgeChainDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::DetectorParams;
pub use pipeline::{EdgeChainDetector, FrameEdges};
