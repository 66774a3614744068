use crate::detector::{DetectorParams, FrameEdges};
use crate::diagnostics::TimingBreakdown;
use crate::image::EdgeDirection;
use crate::linking::{chain_log_nfa, ChainGeometry, EdgeChain};
use serde::Serialize;

/// Serializable summary of one processed frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub input: InputDescriptor,
    pub params: DetectorParams,
    pub anchor_count: usize,
    pub edge_pixel_count: usize,
    pub chain_count: usize,
    pub chain_pixel_count: usize,
    pub timings: TimingBreakdown,
    pub chains: Vec<ChainDescriptor>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One chain with its derived statistics. `pixels` are `[x, y]` pairs.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub anchor_index: usize,
    pub class: EdgeDirection,
    pub len: usize,
    pub anchor_position: usize,
    pub min_strength: f32,
    pub mean_strength: f32,
    /// `null` in JSON when the chain is infinitely meaningful
    pub log10_nfa: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<ChainGeometry>,
    pub pixels: Vec<[usize; 2]>,
}

impl FrameReport {
    pub fn from_frame(edges: &FrameEdges, params: &DetectorParams, source: Option<String>) -> Self {
        let chains = edges
            .chains
            .iter()
            .map(|chain| ChainDescriptor::describe(chain, edges))
            .collect();
        Self {
            input: InputDescriptor {
                width: edges.width,
                height: edges.height,
                source,
            },
            params: params.clone(),
            anchor_count: edges.anchors.len(),
            edge_pixel_count: edges.distribution.edge_pixel_count(),
            chain_count: edges.chains.len(),
            chain_pixel_count: edges.chains.total_pixels(),
            timings: edges.timings.clone(),
            chains,
        }
    }
}

impl ChainDescriptor {
    fn describe(chain: &EdgeChain, edges: &FrameEdges) -> Self {
        Self {
            anchor_index: chain.anchor_index,
            class: chain.class,
            len: chain.len(),
            anchor_position: chain.anchor_position,
            min_strength: chain.min_strength(),
            mean_strength: chain.mean_strength(),
            log10_nfa: chain_log_nfa(chain, &edges.distribution),
            geometry: ChainGeometry::fit(chain),
            pixels: chain.pixels.iter().map(|p| [p.col, p.row]).collect(),
        }
    }
}
