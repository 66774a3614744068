//! Per-frame record of which chain owns each ridge pixel.

/// Owner id per pixel; `0` means unclaimed, otherwise chain id + 1.
#[derive(Clone, Debug)]
pub struct ClaimMap {
    w: usize,
    h: usize,
    owner: Vec<u32>,
}

impl ClaimMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            owner: vec![0; w * h],
        }
    }

    #[inline]
    pub fn is_claimed(&self, x: usize, y: usize) -> bool {
        self.owner[y * self.w + x] != 0
    }

    /// Chain id owning `(x, y)`.
    pub fn owner(&self, x: usize, y: usize) -> Option<usize> {
        match self.owner[y * self.w + x] {
            0 => None,
            id => Some(id as usize - 1),
        }
    }

    /// Mark `(x, y)` as part of `chain`. Claims are never released.
    #[inline]
    pub fn claim(&mut self, x: usize, y: usize, chain: usize) {
        let slot = &mut self.owner[y * self.w + x];
        debug_assert_eq!(*slot, 0, "pixel ({x}, {y}) claimed twice");
        *slot = chain as u32 + 1;
    }

    pub fn claimed_count(&self) -> usize {
        self.owner.iter().filter(|&&o| o != 0).count()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_record_owner() {
        let mut claims = ClaimMap::new(4, 3);
        assert!(!claims.is_claimed(2, 1));
        claims.claim(2, 1, 0);
        claims.claim(3, 2, 7);
        assert!(claims.is_claimed(2, 1));
        assert_eq!(claims.owner(2, 1), Some(0));
        assert_eq!(claims.owner(3, 2), Some(7));
        assert_eq!(claims.owner(0, 0), None);
        assert_eq!(claims.claimed_count(), 2);
        assert_eq!(claims.shape(), (4, 3));
    }
}
