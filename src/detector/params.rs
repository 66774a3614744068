//! Parameter types configuring the edge-chain detector.
//!
//! Defaults reproduce the classic pipeline: smoothing on, the 8.48 noise
//! threshold, strongest anchors first, no turning at class changes and no
//! chain filtering. Everything is deserializable so JSON configs can embed
//! [`DetectorParams`] directly.

use crate::edges::{SortOrder, QUANTIZATION_THRESHOLD};
use crate::linking::LinkParams;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters controlling the per-frame pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectorParams {
    /// Apply the 7-tap smoothing before differentiation.
    pub smoothing: bool,
    /// Gradient magnitudes below this value are zeroed.
    pub magnitude_threshold: f32,
    /// Anchor processing order for the linker.
    pub sort_order: SortOrder,
    /// Linker knobs.
    pub link: LinkParams,
    /// Chains shorter than this are dropped (1 keeps everything).
    pub min_chain_length: usize,
    /// Run the a-contrario chain validation.
    pub validate_chains: bool,
    /// Maximum number of false alarms accepted by the validation.
    pub nfa_epsilon: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            smoothing: true,
            magnitude_threshold: QUANTIZATION_THRESHOLD,
            sort_order: SortOrder::Descending,
            link: LinkParams::default(),
            min_chain_length: 1,
            validate_chains: false,
            nfa_epsilon: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: DetectorParams =
            serde_json::from_str(r#"{ "minChainLength": 5, "link": { "turnOnClassChange": true } }"#)
                .unwrap();
        assert_eq!(params.min_chain_length, 5);
        assert!(params.link.turn_on_class_change);
        assert!(params.smoothing);
        assert_eq!(params.magnitude_threshold, QUANTIZATION_THRESHOLD);
        assert_eq!(params.sort_order, SortOrder::Descending);
    }

    #[test]
    fn sort_order_parses_camel_case() {
        let params: DetectorParams = serde_json::from_str(r#"{ "sortOrder": "ascending" }"#).unwrap();
        assert_eq!(params.sort_order, SortOrder::Ascending);
    }
}
