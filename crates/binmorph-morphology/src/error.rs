use binmorph_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;
use crate::reconstruct::ReconstructionMode;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The structuring element has no active pixel.
    #[error("structuring element has no active pixel")]
    EmptyElement,

    /// The structuring element data does not match its declared footprint.
    #[error("structuring element data length ({0}) does not match a {1}x{2} footprint")]
    InvalidElementShape(usize, usize, usize),

    /// The structuring element origin lies outside its footprint.
    #[error("structuring element origin ({0}, {1}) lies outside its {2}x{3} footprint")]
    OriginOutOfBounds(usize, usize, usize, usize),

    /// Two images that must share a shape do not.
    #[error("image shapes do not match: {0} vs {1}")]
    ShapeMismatch(ImageSize, ImageSize),

    /// The marker does not satisfy the ordering required by the reconstruction mode.
    #[error("marker pixel ({row}, {col}) violates the {mode} ordering against the mask")]
    OrderingViolation {
        /// Row of the first offending pixel in raster order.
        row: usize,
        /// Column of the first offending pixel in raster order.
        col: usize,
        /// The requested reconstruction mode.
        mode: ReconstructionMode,
    },

    /// Error coming from the image type.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// Fail with [`MorphologyError::ShapeMismatch`] unless both sizes are equal.
pub(crate) fn check_shape(expected: ImageSize, got: ImageSize) -> Result<(), MorphologyError> {
    if expected != got {
        return Err(MorphologyError::ShapeMismatch(expected, got));
    }
    Ok(())
}
