//! Anchors: ridge maxima that seed edge chains, and their processing order.
use crate::image::{ImageF32, ImageView};
use serde::{Deserialize, Serialize};

/// A pixel record `{row, col, strength}`.
///
/// Anchors come out of suppression with their own magnitude as strength;
/// chains reuse the same shape for every pixel they visit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
    pub strength: f32,
}

/// A chain pixel shares the anchor record layout.
pub type EdgePixel = Anchor;

impl Anchor {
    pub fn new(row: usize, col: usize, strength: f32) -> Self {
        Self { row, col, strength }
    }

    /// Strength 0 marks a suppressed cell.
    pub fn is_suppressed(&self) -> bool {
        self.strength <= 0.0
    }
}

/// Per-pixel anchor strengths (0 = suppressed), same shape as the frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorMap {
    strengths: ImageF32,
}

impl AnchorMap {
    pub fn new(strengths: ImageF32) -> Self {
        Self { strengths }
    }

    pub fn width(&self) -> usize {
        self.strengths.w
    }

    pub fn height(&self) -> usize {
        self.strengths.h
    }

    /// Strength at column `x`, row `y`.
    #[inline]
    pub fn strength(&self, x: usize, y: usize) -> f32 {
        self.strengths.get(x, y)
    }

    /// Number of non-suppressed cells.
    pub fn count(&self) -> usize {
        self.strengths.count_nonzero()
    }

    /// Strength grid, usable directly as a visualization.
    pub fn as_image(&self) -> &ImageF32 {
        &self.strengths
    }

}

/// Processing order of [`sort_anchors`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Strongest first; lets the strongest ridge claim contested pixels.
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    /// True when `a` must be placed strictly before `b`.
    #[inline]
    fn precedes(self, a: f32, b: f32) -> bool {
        match self {
            SortOrder::Descending => a > b,
            SortOrder::Ascending => a < b,
        }
    }
}

/// Collect non-suppressed cells in row-major order.
pub fn anchor_list(map: &AnchorMap) -> Vec<Anchor> {
    let mut anchors = Vec::with_capacity(map.count());
    for (row, strengths) in map.as_image().rows().enumerate() {
        for (col, &strength) in strengths.iter().enumerate() {
            if strength > 0.0 {
                anchors.push(Anchor::new(row, col, strength));
            }
        }
    }
    anchors
}

/// Partition-exchange sort by strength. Not stable.
///
/// The pivot is the first element of each range; two pointers scan inward
/// and stop on elements that belong to the other side (ties stop both
/// scans, which keeps long runs of equal strengths from degenerating). The
/// smaller partition is handled recursively and the larger one in the loop,
/// bounding recursion depth by `log2(n)`.
pub fn sort_anchors(anchors: &mut [Anchor], order: SortOrder) {
    let mut range = anchors;
    while range.len() > 1 {
        let current = std::mem::take(&mut range);
        let split = partition(current, order);
        let (left, rest) = current.split_at_mut(split);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            sort_anchors(left, order);
            range = right;
        } else {
            sort_anchors(right, order);
            range = left;
        }
    }
}

fn partition(list: &mut [Anchor], order: SortOrder) -> usize {
    let last = list.len() - 1;
    let pivot = list[0].strength;
    let mut i = 0;
    let mut j = last + 1;
    loop {
        i += 1;
        while i < last && order.precedes(list[i].strength, pivot) {
            i += 1;
        }
        j -= 1;
        while order.precedes(pivot, list[j].strength) {
            j -= 1;
        }
        if i >= j {
            break;
        }
        list.swap(i, j);
    }
    list.swap(0, j);
    j
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strengths(anchors: &[Anchor]) -> Vec<f32> {
        anchors.iter().map(|a| a.strength).collect()
    }

    fn pseudo_random_anchors(n: usize, modulo: usize) -> Vec<Anchor> {
        let mut state = 12345u64;
        (0..n)
            .map(|i| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let v = ((state >> 33) as usize % modulo) as f32 + 1.0;
                Anchor::new(i / 7, i % 7, v)
            })
            .collect()
    }

    #[test]
    fn list_is_row_major_and_skips_suppressed() {
        let mut img = ImageF32::new(4, 3);
        img.set(2, 0, 5.0);
        img.set(1, 1, 9.0);
        img.set(3, 1, 1.0);
        let list = anchor_list(&AnchorMap::new(img));
        let cells: Vec<_> = list.iter().map(|a| (a.row, a.col)).collect();
        assert_eq!(cells, vec![(0, 2), (1, 1), (1, 3)]);
        assert_eq!(strengths(&list), vec![5.0, 9.0, 1.0]);
    }

    #[test]
    fn descending_sort_is_non_increasing_and_idempotent() {
        let mut anchors = pseudo_random_anchors(500, 40);
        let mut expected = strengths(&anchors);
        expected.sort_by(|a, b| b.partial_cmp(a).unwrap());

        sort_anchors(&mut anchors, SortOrder::Descending);
        assert_eq!(strengths(&anchors), expected);
        sort_anchors(&mut anchors, SortOrder::Descending);
        assert_eq!(strengths(&anchors), expected);
    }

    #[test]
    fn ascending_sort_is_non_decreasing() {
        let mut anchors = pseudo_random_anchors(257, 1000);
        sort_anchors(&mut anchors, SortOrder::Ascending);
        assert!(anchors.windows(2).all(|w| w[0].strength <= w[1].strength));
    }

    #[test]
    fn sort_keeps_every_anchor() {
        let original = pseudo_random_anchors(100, 5);
        let mut sorted = original.clone();
        sort_anchors(&mut sorted, SortOrder::Descending);
        let mut a: Vec<_> = original.iter().map(|a| (a.row, a.col)).collect();
        let mut b: Vec<_> = sorted.iter().map(|a| (a.row, a.col)).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_inputs() {
        let mut empty: Vec<Anchor> = Vec::new();
        sort_anchors(&mut empty, SortOrder::Descending);

        let mut equal = vec![Anchor::new(0, 0, 3.0); 10_000];
        sort_anchors(&mut equal, SortOrder::Descending);
        assert!(equal.iter().all(|a| a.strength == 3.0));

        let mut presorted: Vec<_> = (0..5_000).map(|i| Anchor::new(0, i, i as f32)).collect();
        sort_anchors(&mut presorted, SortOrder::Descending);
        assert_eq!(presorted[0].strength, 4999.0);
        assert_eq!(presorted[4999].strength, 0.0);
    }
}
