//! Failure modes of the per-frame edge pipeline.

/// Smallest frame side the smoothing and derivative stages accept.
pub const MIN_FRAME_SIDE: usize = 7;

/// Reasons a frame or a set of maps cannot be processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeError {
    /// The frame is narrower or shorter than the 7-tap smoothing support.
    FrameTooSmall {
        width: usize,
        height: usize,
        minimum: usize,
    },
    /// The pixel buffer is shorter than `width`, `height` and `stride` imply.
    BufferTooShort { len: usize, required: usize },
    /// Rows would overlap: the row stride is smaller than the width.
    InvalidStride { stride: usize, width: usize },
    /// Two maps derived from the same frame disagree on shape.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl std::fmt::Display for EdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeError::FrameTooSmall {
                width,
                height,
                minimum,
            } => write!(
                f,
                "frame {width}x{height} is too small (need at least {minimum}x{minimum})"
            ),
            EdgeError::BufferTooShort { len, required } => {
                write!(f, "pixel buffer holds {len} samples, need {required}")
            }
            EdgeError::InvalidStride { stride, width } => {
                write!(f, "row stride {stride} is smaller than width {width}")
            }
            EdgeError::ShapeMismatch { expected, found } => write!(
                f,
                "map shape {}x{} does not match {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for EdgeError {}

/// Fail fast on frames that leave no interior for the 7-tap stages.
pub fn ensure_frame_size(width: usize, height: usize) -> Result<(), EdgeError> {
    if width < MIN_FRAME_SIDE || height < MIN_FRAME_SIDE {
        return Err(EdgeError::FrameTooSmall {
            width,
            height,
            minimum: MIN_FRAME_SIDE,
        });
    }
    Ok(())
}

pub(crate) fn ensure_same_shape(
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), EdgeError> {
    if expected != found {
        return Err(EdgeError::ShapeMismatch { expected, found });
    }
    Ok(())
}
