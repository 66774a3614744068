//! Edge chains and the per-frame chain collection.
use crate::edges::{Anchor, EdgePixel};
use crate::image::{EdgeDirection, ImageF32};
use serde::Serialize;

/// Ordered ridge pixels grown from one anchor.
///
/// `pixels` runs from the far end of the up/left branch, through the anchor
/// at `anchor_position`, to the far end of the down/right branch.
/// Consecutive pixels are 8-connected.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeChain {
    /// Index of the originating anchor in the processed anchor list
    pub anchor_index: usize,
    /// Direction class of the originating anchor
    pub class: EdgeDirection,
    /// Position of the anchor inside `pixels`
    pub anchor_position: usize,
    pub pixels: Vec<EdgePixel>,
}

impl EdgeChain {
    /// Weld the two branches (each ordered outward from the anchor).
    pub fn from_branches(
        anchor_index: usize,
        anchor: Anchor,
        class: EdgeDirection,
        head: Vec<EdgePixel>,
        tail: Vec<EdgePixel>,
    ) -> Self {
        let anchor_position = head.len();
        let mut pixels = Vec::with_capacity(head.len() + 1 + tail.len());
        pixels.extend(head.into_iter().rev());
        pixels.push(anchor);
        pixels.extend(tail);
        Self {
            anchor_index,
            class,
            anchor_position,
            pixels,
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn anchor(&self) -> &EdgePixel {
        &self.pixels[self.anchor_position]
    }

    /// Up/left branch, ordered from its far end toward the anchor.
    pub fn head_branch(&self) -> &[EdgePixel] {
        &self.pixels[..self.anchor_position]
    }

    /// Down/right branch, ordered from the anchor outward.
    pub fn tail_branch(&self) -> &[EdgePixel] {
        &self.pixels[self.anchor_position + 1..]
    }

    /// Weakest magnitude along the chain.
    pub fn min_strength(&self) -> f32 {
        self.pixels
            .iter()
            .map(|p| p.strength)
            .fold(f32::INFINITY, f32::min)
    }

    pub fn mean_strength(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        self.pixels.iter().map(|p| p.strength).sum::<f32>() / self.pixels.len() as f32
    }

    /// `(first, last)` pixel of the chain.
    pub fn endpoints(&self) -> (&EdgePixel, &EdgePixel) {
        (&self.pixels[0], &self.pixels[self.pixels.len() - 1])
    }
}

/// All chains found in one frame, in anchor processing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeChains {
    pub width: usize,
    pub height: usize,
    chains: Vec<EdgeChain>,
}

impl EdgeChains {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            chains: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, chain: EdgeChain) {
        debug_assert!(
            self.chains
                .last()
                .map_or(true, |c| c.anchor_index < chain.anchor_index),
            "chains must be pushed in anchor order"
        );
        self.chains.push(chain);
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeChain> {
        self.chains.iter()
    }

    pub fn as_slice(&self) -> &[EdgeChain] {
        &self.chains
    }

    /// Chain grown from the anchor at `anchor_index`, if that anchor
    /// started one.
    pub fn by_anchor(&self, anchor_index: usize) -> Option<&EdgeChain> {
        self.chains
            .binary_search_by_key(&anchor_index, |c| c.anchor_index)
            .ok()
            .map(|i| &self.chains[i])
    }

    /// Sum of chain lengths.
    pub fn total_pixels(&self) -> usize {
        self.chains.iter().map(EdgeChain::len).sum()
    }

    pub fn longest(&self) -> Option<&EdgeChain> {
        self.chains.iter().max_by_key(|c| c.len())
    }

    /// Keep only the chains for which `keep` returns true.
    pub fn retain<F: FnMut(&EdgeChain) -> bool>(&mut self, keep: F) {
        self.chains.retain(keep);
    }

    /// Render chain pixels as 255 on a zero background.
    pub fn to_edge_map(&self) -> ImageF32 {
        let mut map = ImageF32::new(self.width, self.height);
        for px in self.chains.iter().flat_map(|c| &c.pixels) {
            map.set(px.col, px.row, 255.0);
        }
        map
    }
}

impl<'a> IntoIterator for &'a EdgeChains {
    type Item = &'a EdgeChain;
    type IntoIter = std::slice::Iter<'a, EdgeChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}
