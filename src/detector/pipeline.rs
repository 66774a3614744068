//! Detector pipeline driving one frame from pixels to edge chains.
//!
//! Typical usage:
//! ```no_run
//! use edge_chains::{DetectorParams, EdgeChainDetector};
//! use edge_chains::image::ImageRgb8;
//!
//! # fn example(frame: ImageRgb8) -> Result<(), edge_chains::EdgeError> {
//! let detector = EdgeChainDetector::new(DetectorParams::default());
//! let edges = detector.process_rgb(&frame)?;
//! println!("{} chains, {} edge pixels", edges.chains.len(), edges.chains.total_pixels());
//! # Ok(())
//! # }
//! ```
use super::params::DetectorParams;
use crate::diagnostics::TimingBreakdown;
use crate::edges::{
    anchor_list, direction_map, extract_anchors, gray_from_luma, grayscale, magnitude_map, smooth,
    sort_anchors, Anchor, EmpiricalDistribution,
};
use crate::error::{ensure_frame_size, EdgeError};
use crate::image::{DirectionMap, ImageF32, ImageRgb8, ImageU8};
use crate::linking::{validate_chains, EdgeChains, EdgeLinker};
use log::debug;
use std::time::Instant;

/// Everything the pipeline derived from one frame.
#[derive(Clone, Debug)]
pub struct FrameEdges {
    pub width: usize,
    pub height: usize,
    /// Thresholded gradient magnitude
    pub magnitude: ImageF32,
    /// Per-pixel direction class
    pub direction: DirectionMap,
    /// Anchors in processing order; chain `anchor_index` values refer here
    pub anchors: Vec<Anchor>,
    /// Magnitude survival table of this frame
    pub distribution: EmpiricalDistribution,
    pub chains: EdgeChains,
    pub timings: TimingBreakdown,
}

impl FrameEdges {
    /// Chain pixels as 255 on a zero background.
    pub fn edge_map(&self) -> ImageF32 {
        self.chains.to_edge_map()
    }
}

/// Stateless per-frame edge-chain detector.
#[derive(Clone, Debug, Default)]
pub struct EdgeChainDetector {
    params: DetectorParams,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl EdgeChainDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn set_params(&mut self, params: DetectorParams) {
        self.params = params;
    }

    /// Run the pipeline on a 3-channel frame.
    pub fn process_rgb(&self, frame: &ImageRgb8<'_>) -> Result<FrameEdges, EdgeError> {
        ensure_frame_size(frame.w, frame.h)?;
        check_layout(frame.w, frame.stride, frame.data.len(), frame.required_len())?;
        let start = Instant::now();
        let gray = grayscale(frame);
        let gray_ms = elapsed_ms(start);
        let mut edges = self.process_f32(&gray)?;
        edges.timings.total_ms += gray_ms;
        edges.timings.prepend("grayscale", gray_ms);
        Ok(edges)
    }

    /// Run the pipeline on an 8-bit luma frame.
    pub fn process_gray(&self, frame: &ImageU8<'_>) -> Result<FrameEdges, EdgeError> {
        ensure_frame_size(frame.w, frame.h)?;
        check_layout(frame.w, frame.stride, frame.data.len(), frame.required_len())?;
        let start = Instant::now();
        let gray = gray_from_luma(frame);
        let gray_ms = elapsed_ms(start);
        let mut edges = self.process_f32(&gray)?;
        edges.timings.total_ms += gray_ms;
        edges.timings.prepend("grayscale", gray_ms);
        Ok(edges)
    }

    /// Run the pipeline on a luminance grid in 0–255 units.
    pub fn process_f32(&self, gray: &ImageF32) -> Result<FrameEdges, EdgeError> {
        let (width, height) = (gray.w, gray.h);
        ensure_frame_size(width, height)?;
        check_layout(width, gray.stride, gray.data.len(), gray.required_len())?;
        let params = &self.params;
        debug!(
            "EdgeChainDetector::process start w={} h={} smoothing={} thresh={:.2}",
            width, height, params.smoothing, params.magnitude_threshold
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let smoothed;
        let luminance = if params.smoothing {
            smoothed = smooth(gray);
            timings.push("smooth", elapsed_ms(stage));
            &smoothed
        } else {
            gray
        };

        let stage = Instant::now();
        let magnitude = magnitude_map(luminance, params.magnitude_threshold);
        let direction = direction_map(luminance);
        timings.push("gradients", elapsed_ms(stage));
        debug!(
            "EdgeChainDetector::process gradients nonzero={}",
            magnitude.count_nonzero()
        );

        let stage = Instant::now();
        let anchor_map = extract_anchors(&magnitude, &direction)?;
        let mut anchors = anchor_list(&anchor_map);
        sort_anchors(&mut anchors, params.sort_order);
        timings.push("anchors", elapsed_ms(stage));
        debug!(
            "EdgeChainDetector::process anchors={} order={:?}",
            anchors.len(),
            params.sort_order
        );

        let distribution = EmpiricalDistribution::from_magnitude(&magnitude);

        let stage = Instant::now();
        let (mut chains, _claims) =
            EdgeLinker::new(&magnitude, &direction, params.link)?.link(&anchors);
        timings.push("link", elapsed_ms(stage));

        if params.validate_chains {
            let stage = Instant::now();
            chains = validate_chains(chains, &distribution, params.nfa_epsilon);
            timings.push("validate", elapsed_ms(stage));
        }
        if params.min_chain_length > 1 {
            let min_len = params.min_chain_length;
            chains.retain(|c| c.len() >= min_len);
        }

        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "EdgeChainDetector::process done chains={} pixels={} total_ms={:.3}",
            chains.len(),
            chains.total_pixels(),
            timings.total_ms
        );

        Ok(FrameEdges {
            width,
            height,
            magnitude,
            direction,
            anchors,
            distribution,
            chains,
            timings,
        })
    }
}

fn check_layout(width: usize, stride: usize, len: usize, required: usize) -> Result<(), EdgeError> {
    if stride < width {
        return Err(EdgeError::InvalidStride { stride, width });
    }
    if len < required {
        return Err(EdgeError::BufferTooShort { len, required });
    }
    Ok(())
}
