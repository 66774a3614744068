//! Edge extraction front end: luminance, smoothing, gradients, suppression.
//!
//! Stages, in pipeline order:
//!
//! - [`gray`]: RGB frame to a single luminance channel (unweighted mean).
//! - [`smooth`]: separable 7-tap smoothing so derivatives behave.
//! - [`grad`]: Prewitt-style `gx`/`gy`, thresholded L1 magnitude and a
//!   binary direction class per pixel.
//! - [`nms`]: non-maximum suppression across the edge, producing anchors.
//! - [`anchors`]: anchor list extraction and strength ordering.
//! - [`ecdf`]: magnitude survival table used for chain validation.
//!
//! All maps share the frame shape and keep 0–255 sample units. Border
//! handling never clamps: stages leave the band they cannot centre their
//! support on untouched (smoothing) or zero (gradients, suppression).

pub mod anchors;
pub mod ecdf;
pub mod grad;
pub mod gray;
pub mod nms;
pub mod smooth;

pub use anchors::{anchor_list, sort_anchors, Anchor, AnchorMap, EdgePixel, SortOrder};
pub use ecdf::EmpiricalDistribution;
pub use grad::{
    direction_map, gradient_map, gradient_map_with_threshold, magnitude_map, prewitt_gradients,
    Grad, GradientMap, GradientMode, QUANTIZATION_THRESHOLD,
};
pub use gray::{gray_from_luma, grayscale};
pub use nms::extract_anchors;
pub use smooth::{smooth, smooth_with, SeparableFilter, StaticSeparableFilter, SMOOTH_7TAP};
