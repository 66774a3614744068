//! Edge linking: grow sorted anchors into pixel chains.
//!
//! - [`linker`]: the ridge-following walk and its claim bookkeeping.
//! - [`chain`]: chain records and the per-frame collection.
//! - [`claims`]: which chain owns each pixel.
//! - [`geometry`]: principal-axis summary of a chain.
//! - [`validate`]: optional a-contrario filtering of weak chains.

pub mod chain;
pub mod claims;
pub mod geometry;
pub mod linker;
pub mod validate;

pub use chain::{EdgeChain, EdgeChains};
pub use claims::ClaimMap;
pub use geometry::ChainGeometry;
pub use linker::{EdgeLinker, Heading, LinkParams};
pub use validate::{chain_log_nfa, is_meaningful, validate_chains};

use crate::edges::Anchor;
use crate::error::EdgeError;
use crate::image::{DirectionMap, ImageF32};

/// Link `anchors` (in the given order) into chains.
///
/// `magnitude` and `direction` must share a shape. Each returned chain
/// records the index of its originating anchor in `anchors`.
pub fn link_edges(
    anchors: &[Anchor],
    magnitude: &ImageF32,
    direction: &DirectionMap,
    params: LinkParams,
) -> Result<EdgeChains, EdgeError> {
    let linker = EdgeLinker::new(magnitude, direction, params)?;
    let (chains, _claims) = linker.link(anchors);
    Ok(chains)
}
