/// Borrowed 3-channel frame, one `[r, g, b]` triple per pixel.
///
/// Channel order does not matter to the pipeline: grayscale conversion takes
/// the unweighted mean of the three samples.
#[derive(Clone, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    /// Pixels (not bytes) between consecutive rows
    pub stride: usize,
    pub data: &'a [[u8; 3]],
}

impl<'a> ImageRgb8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.data[y * self.stride + x]
    }

    pub fn required_len(&self) -> usize {
        if self.h == 0 {
            0
        } else {
            (self.h - 1) * self.stride + self.w
        }
    }
}

impl<'a> crate::image::traits::ImageView for ImageRgb8<'a> {
    type Pixel = [u8; 3];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[[u8; 3]] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[[u8; 3]]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
