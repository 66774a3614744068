//! Ridge-following walk that grows anchors into edge chains.
//!
//! Anchors are visited in the order given (strongest first after
//! [`sort_anchors`](crate::edges::sort_anchors)). Each unclaimed anchor
//! starts two branches along its edge: `Up` then `Down` for a vertical-class
//! anchor, `Left` then `Right` for a horizontal-class one. A branch moves
//! one pixel per step to the strongest of the three forward neighbours
//! (straight ahead and the two diagonals) and stops when
//!
//! - no forward neighbour has a positive magnitude (including all-NaN or
//!   out-of-grid neighbourhoods),
//! - the chosen pixel is already claimed by any chain, or
//! - the chosen pixel has the other direction class.
//!
//! Every accepted pixel is claimed immediately, so no two chains share a
//! pixel and a branch can never revisit its own trail; the total number of
//! steps in a frame is bounded by `w * h`.
//!
//! Ties between equally strong neighbours resolve in a fixed order: straight
//! ahead, then the side the branch last drifted to, then the other side.
//! Before any drift the up/left side wins.
//!
//! With [`LinkParams::turn_on_class_change`] a diagonal step onto a pixel of
//! the other class turns the branch toward that diagonal (for example `Up`
//! via up-right becomes `Right`) instead of stopping, which lets a branch
//! follow a curved ridge through both classes.
use super::chain::{EdgeChain, EdgeChains};
use super::claims::ClaimMap;
use crate::edges::{Anchor, EdgePixel};
use crate::error::{ensure_same_shape, EdgeError};
use crate::image::{DirectionMap, EdgeDirection, ImageF32, ImageView};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Knobs for the linking walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkParams {
    /// Turn at class changes reached diagonally instead of ending the branch.
    pub turn_on_class_change: bool,
}

/// Travel direction of a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Branch headings for an anchor of `class`, up/left branch first.
    pub fn branches(class: EdgeDirection) -> (Heading, Heading) {
        match class {
            EdgeDirection::Vertical => (Heading::Up, Heading::Down),
            EdgeDirection::Horizontal => (Heading::Left, Heading::Right),
        }
    }

    /// `(dx, dy)` of a straight step.
    #[inline]
    pub fn forward(self) -> (isize, isize) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// Unit vector across the travel axis; the negative side is up/left.
    #[inline]
    pub fn lateral(self) -> (isize, isize) {
        match self {
            Heading::Up | Heading::Down => (1, 0),
            Heading::Left | Heading::Right => (0, 1),
        }
    }

    /// Class of the edges this heading walks along.
    pub fn class(self) -> EdgeDirection {
        match self {
            Heading::Up | Heading::Down => EdgeDirection::Vertical,
            Heading::Left | Heading::Right => EdgeDirection::Horizontal,
        }
    }

    /// Heading pointing toward lateral `side` (-1 or +1).
    pub fn turn(self, side: isize) -> Heading {
        match (self.class(), side < 0) {
            (EdgeDirection::Vertical, true) => Heading::Left,
            (EdgeDirection::Vertical, false) => Heading::Right,
            (EdgeDirection::Horizontal, true) => Heading::Up,
            (EdgeDirection::Horizontal, false) => Heading::Down,
        }
    }
}

/// Per-branch walk state.
#[derive(Clone, Copy, Debug)]
struct Walk {
    x: usize,
    y: usize,
    heading: Heading,
    class: EdgeDirection,
    /// Last non-straight lateral move (-1 or +1)
    drift: isize,
}

struct Candidate {
    x: usize,
    y: usize,
    magnitude: f32,
    side: isize,
}

/// Links anchors into chains over one frame's magnitude and direction maps.
pub struct EdgeLinker<'a> {
    magnitude: &'a ImageF32,
    direction: &'a DirectionMap,
    params: LinkParams,
    claims: ClaimMap,
    chains: EdgeChains,
    skipped_claimed: usize,
    skipped_invalid: usize,
}

impl<'a> EdgeLinker<'a> {
    pub fn new(
        magnitude: &'a ImageF32,
        direction: &'a DirectionMap,
        params: LinkParams,
    ) -> Result<Self, EdgeError> {
        ensure_same_shape(magnitude.shape(), direction.shape())?;
        Ok(Self {
            magnitude,
            direction,
            params,
            claims: ClaimMap::new(magnitude.w, magnitude.h),
            chains: EdgeChains::new(magnitude.w, magnitude.h),
            skipped_claimed: 0,
            skipped_invalid: 0,
        })
    }

    /// Process `anchors` in order and return the chains together with the
    /// final claim map.
    pub fn link(mut self, anchors: &[Anchor]) -> (EdgeChains, ClaimMap) {
        for (anchor_index, anchor) in anchors.iter().enumerate() {
            self.process_anchor(anchor_index, *anchor);
        }
        debug!(
            "EdgeLinker::link anchors={} chains={} pixels={} skipped_claimed={} skipped_invalid={}",
            anchors.len(),
            self.chains.len(),
            self.claims.claimed_count(),
            self.skipped_claimed,
            self.skipped_invalid
        );
        (self.chains, self.claims)
    }

    fn process_anchor(&mut self, anchor_index: usize, anchor: Anchor) {
        if anchor.is_suppressed() {
            return;
        }
        let (x, y) = (anchor.col, anchor.row);
        if !self.magnitude.is_interior(x, y) {
            warn!(
                "EdgeLinker: anchor {anchor_index} at row={} col={} is outside the interior of {}x{}; skipped",
                y, x, self.magnitude.w, self.magnitude.h
            );
            self.skipped_invalid += 1;
            return;
        }
        if self.claims.is_claimed(x, y) {
            self.skipped_claimed += 1;
            return;
        }

        let chain_id = self.chains.len();
        self.claims.claim(x, y, chain_id);
        let class = self.direction.get(x, y);
        let (first, second) = Heading::branches(class);
        let head = self.walk(x, y, first, class, chain_id);
        let tail = self.walk(x, y, second, class, chain_id);
        self.chains
            .push(EdgeChain::from_branches(anchor_index, anchor, class, head, tail));
    }

    fn walk(
        &mut self,
        x: usize,
        y: usize,
        heading: Heading,
        class: EdgeDirection,
        chain_id: usize,
    ) -> Vec<EdgePixel> {
        let mut state = Walk {
            x,
            y,
            heading,
            class,
            drift: -1,
        };
        let mut branch = Vec::new();
        while let Some(pixel) = self.step(&mut state) {
            self.claims.claim(pixel.col, pixel.row, chain_id);
            branch.push(pixel);
        }
        branch
    }

    /// Advance `state` by one pixel, or return `None` when the branch ends.
    fn step(&self, state: &mut Walk) -> Option<EdgePixel> {
        let best = self.strongest_forward(state)?;
        if self.claims.is_claimed(best.x, best.y) {
            return None;
        }

        let class_here = self.direction.get(best.x, best.y);
        if class_here != state.class {
            if !self.params.turn_on_class_change || best.side == 0 {
                return None;
            }
            let previous = state.heading;
            state.heading = previous.turn(best.side);
            state.class = class_here;
            // keep bending the same way the previous heading was travelling
            let (fx, fy) = previous.forward();
            let (lx, ly) = state.heading.lateral();
            state.drift = fx * lx + fy * ly;
        } else if best.side != 0 {
            state.drift = best.side;
        }

        state.x = best.x;
        state.y = best.y;
        Some(EdgePixel::new(best.y, best.x, best.magnitude))
    }

    /// Strongest positive forward neighbour; the first candidate wins ties.
    fn strongest_forward(&self, state: &Walk) -> Option<Candidate> {
        let (fx, fy) = state.heading.forward();
        let (lx, ly) = state.heading.lateral();
        let mut best: Option<Candidate> = None;
        for side in [0, state.drift, -state.drift] {
            let cx = state.x as isize + fx + side * lx;
            let cy = state.y as isize + fy + side * ly;
            let Some(magnitude) = self.magnitude.get_checked(cx, cy) else {
                continue;
            };
            let current = best.as_ref().map_or(0.0, |b| b.magnitude);
            if magnitude > current {
                best = Some(Candidate {
                    x: cx as usize,
                    y: cy as usize,
                    magnitude,
                    side,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps(w: usize, h: usize) -> (ImageF32, DirectionMap) {
        (ImageF32::new(w, h), DirectionMap::new(w, h))
    }

    fn cells(chain: &EdgeChain) -> Vec<(usize, usize)> {
        chain.pixels.iter().map(|p| (p.col, p.row)).collect()
    }

    fn link(
        mag: &ImageF32,
        dir: &DirectionMap,
        anchors: &[Anchor],
        params: LinkParams,
    ) -> EdgeChains {
        EdgeLinker::new(mag, dir, params).unwrap().link(anchors).0
    }

    /// Vertical run at x = 2 (rows 2..=5), then a horizontal run on row 6
    /// (cols 3..=6) reached diagonally from (2, 5).
    fn elbow() -> (ImageF32, DirectionMap) {
        let (mut mag, mut dir) = maps(10, 10);
        for y in 2..=5 {
            mag.set(2, y, 100.0);
        }
        for x in 3..=6 {
            mag.set(x, 6, 100.0);
            dir.set(x, 6, EdgeDirection::Horizontal);
        }
        (mag, dir)
    }

    #[test]
    fn vertical_ridge_becomes_one_chain() {
        let (mut mag, dir) = maps(8, 9);
        for y in 1..8 {
            mag.set(4, y, 40.0);
            mag.set(3, y, 20.0);
            mag.set(5, y, 20.0);
        }
        let anchors: Vec<_> = (1..8).map(|y| Anchor::new(y, 4, 40.0)).collect();
        let chains = link(&mag, &dir, &anchors, LinkParams::default());
        assert_eq!(chains.len(), 1, "{chains:?}");
        let chain = chains.by_anchor(0).unwrap();
        let expected: Vec<_> = (1..8).map(|y| (4, y)).collect();
        assert_eq!(cells(chain), expected);
        assert_eq!(chain.anchor_position, 0);
        assert_eq!(chain.class, EdgeDirection::Vertical);
    }

    #[test]
    fn branch_stops_at_class_change_by_default() {
        let (mag, dir) = elbow();
        let anchors = [Anchor::new(3, 2, 100.0), Anchor::new(6, 4, 100.0)];
        let chains = link(&mag, &dir, &anchors, LinkParams::default());
        assert_eq!(chains.len(), 2);
        assert_eq!(cells(&chains.as_slice()[0]), vec![(2, 2), (2, 3), (2, 4), (2, 5)]);
        assert_eq!(chains.as_slice()[0].anchor_position, 1);
        // the horizontal anchor walks left into (3, 6), then its strongest
        // forward neighbour (2, 5) is already claimed
        assert_eq!(cells(&chains.as_slice()[1]), vec![(3, 6), (4, 6), (5, 6), (6, 6)]);
    }

    #[test]
    fn branch_turns_through_class_change_when_enabled() {
        let (mag, dir) = elbow();
        let anchors = [Anchor::new(3, 2, 100.0), Anchor::new(6, 4, 100.0)];
        let params = LinkParams {
            turn_on_class_change: true,
        };
        let chains = link(&mag, &dir, &anchors, params);
        assert_eq!(chains.len(), 1, "second anchor is already claimed");
        assert_eq!(
            cells(&chains.as_slice()[0]),
            vec![(2, 2), (2, 3), (2, 4), (2, 5), (3, 6), (4, 6), (5, 6), (6, 6)]
        );
    }

    #[test]
    fn straight_step_onto_other_class_never_turns() {
        let (mut mag, mut dir) = maps(8, 8);
        for y in 2..=4 {
            mag.set(3, y, 50.0);
        }
        mag.set(3, 5, 50.0);
        dir.set(3, 5, EdgeDirection::Horizontal);
        let params = LinkParams {
            turn_on_class_change: true,
        };
        let chains = link(&mag, &dir, &[Anchor::new(3, 3, 50.0)], params);
        assert_eq!(cells(&chains.as_slice()[0]), vec![(3, 2), (3, 3), (3, 4)]);
    }

    #[test]
    fn blocked_anchor_yields_length_one_chain() {
        let (mut mag, dir) = maps(7, 7);
        mag.set(3, 3, 30.0);
        let chains = link(&mag, &dir, &[Anchor::new(3, 3, 30.0)], LinkParams::default());
        assert_eq!(chains.len(), 1);
        assert_eq!(chains.as_slice()[0].len(), 1);
    }

    #[test]
    fn nan_neighbourhood_ends_the_walk() {
        let (mut mag, dir) = maps(7, 7);
        mag.data.fill(f32::NAN);
        mag.set(3, 3, 30.0);
        let (chains, claims) = EdgeLinker::new(&mag, &dir, LinkParams::default())
            .unwrap()
            .link(&[Anchor::new(3, 3, 30.0)]);
        assert_eq!(chains.len(), 1);
        assert_eq!(cells(&chains.as_slice()[0]), vec![(3, 3)]);
        assert_eq!(claims.claimed_count(), 1);
    }

    #[test]
    fn ties_prefer_straight_then_drift_side() {
        let (mut mag, dir) = maps(9, 9);
        // anchor (4, 6) walking up: row 5 has equal left/straight/right
        mag.set(4, 6, 60.0);
        for x in 3..=5 {
            mag.set(x, 5, 60.0);
        }
        // row 4: only the two diagonals of (4, 5) are lit, equally
        mag.set(3, 4, 60.0);
        mag.set(5, 4, 60.0);
        // row 3 above (3, 4): all three equal again, straight must win
        for x in 2..=4 {
            mag.set(x, 3, 60.0);
        }
        let chains = link(&mag, &dir, &[Anchor::new(6, 4, 60.0)], LinkParams::default());
        let chain = &chains.as_slice()[0];
        let head: Vec<_> = chain.head_branch().iter().map(|p| (p.col, p.row)).collect();
        // straight at row 5, drift side (left) at row 4, straight at row 3
        assert_eq!(head, vec![(3, 3), (3, 4), (4, 5)]);
    }

    #[test]
    fn anchors_outside_interior_or_suppressed_are_skipped() {
        let (mag, dir) = maps(6, 6);
        let anchors = [
            Anchor::new(0, 3, 10.0),
            Anchor::new(3, 5, 10.0),
            Anchor::new(2, 2, 0.0),
            Anchor::new(40, 40, 10.0),
        ];
        let chains = link(&mag, &dir, &anchors, LinkParams::default());
        assert!(chains.is_empty());
    }

    #[test]
    fn chain_ids_follow_anchor_indices_and_claims_are_exclusive() {
        let (mut mag, dir) = maps(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                mag.set(x, y, 25.0);
            }
        }
        let anchors: Vec<_> = (1..9)
            .flat_map(|y| (1..9).map(move |x| Anchor::new(y, x, 25.0)))
            .collect();
        let (chains, claims) = EdgeLinker::new(&mag, &dir, LinkParams::default())
            .unwrap()
            .link(&anchors);
        let mut seen = std::collections::HashSet::new();
        for (id, chain) in chains.iter().enumerate() {
            for p in &chain.pixels {
                assert!(seen.insert((p.row, p.col)), "pixel shared: {p:?}");
                assert_eq!(claims.owner(p.col, p.row), Some(id));
            }
        }
        assert_eq!(seen.len(), 64);
        assert_eq!(claims.claimed_count(), 64);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let mag = ImageF32::new(5, 5);
        let dir = DirectionMap::new(5, 6);
        assert!(EdgeLinker::new(&mag, &dir, LinkParams::default()).is_err());
    }

    #[test]
    fn turning_keeps_bending_direction() {
        assert_eq!(Heading::Up.turn(-1), Heading::Left);
        assert_eq!(Heading::Down.turn(1), Heading::Right);
        assert_eq!(Heading::Left.turn(1), Heading::Down);
        assert_eq!(Heading::branches(EdgeDirection::Horizontal), (Heading::Left, Heading::Right));
    }
}
