use crate::error::ImageError;
use crate::image::{BinaryImage, ImageSize};

/// Half side of the square hole carved at the image center.
const HOLE_HALF: usize = 2;

/// Generate the lab grid: a checkerboard of `block_size` squares with extra structure.
///
/// A block is foreground when its block row plus block column is even. A 4x4 hole is
/// carved around the image center and a 2x2 block is added at rows 2-3, cols 12-13.
/// Both are clipped to the image.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `block_size` - The side of a checkerboard block in pixels.
///
/// # Errors
///
/// Returns [`ImageError::ZeroBlockSize`] if `block_size` is zero, or
/// [`ImageError::ZeroSize`] if the size has a zero dimension.
///
/// # Example
///
/// ```
/// use binmorph_image::{grid_image, ImageSize};
///
/// let grid = grid_image(ImageSize { width: 16, height: 16 }, 4).unwrap();
/// assert_eq!(grid.count_foreground(), 124);
/// ```
pub fn grid_image(size: ImageSize, block_size: usize) -> Result<BinaryImage, ImageError> {
    if block_size == 0 {
        return Err(ImageError::ZeroBlockSize);
    }

    let (center_row, center_col) = (size.height / 2, size.width / 2);
    let hole_rows = center_row.saturating_sub(HOLE_HALF)..center_row + HOLE_HALF;
    let hole_cols = center_col.saturating_sub(HOLE_HALF)..center_col + HOLE_HALF;

    BinaryImage::from_fn(size, |row, col| {
        let block = (row / block_size + col / block_size) % 2 == 0;
        let hole = hole_rows.contains(&row) && hole_cols.contains(&col);
        let extra = (2..4).contains(&row) && (12..14).contains(&col);
        (block && !hole) || extra
    })
}
