use binmorph_image::BinaryImage;

use crate::element::StructuringElement;
use crate::error::MorphologyError;
use crate::parallel::{execute_rows, ExecutionStrategy};

/// Value assumed for pixels outside the image.
///
/// The default is [`BorderMode::Background`]: the image is implicitly padded with
/// background, so erosion peels foreground touching the image edge while dilation never
/// grows from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Outside pixels are background (zero padding).
    #[default]
    Background,

    /// Outside pixels are foreground.
    Foreground,

    /// Outside pixels replicate the nearest edge pixel.
    Replicate,
}

impl BorderMode {
    /// The border mode seen by the complement of an image.
    ///
    /// `erode_with(a, b, mode)` equals the complement of
    /// `dilate_with(!a, b.reflect(), mode.complement())`.
    pub fn complement(&self) -> BorderMode {
        match self {
            BorderMode::Background => BorderMode::Foreground,
            BorderMode::Foreground => BorderMode::Background,
            BorderMode::Replicate => BorderMode::Replicate,
        }
    }
}

#[inline]
fn sample(src: &BinaryImage, row: isize, col: isize, border: BorderMode) -> bool {
    if let Some(v) = src.get_signed(row, col) {
        return v;
    }
    match border {
        BorderMode::Background => false,
        BorderMode::Foreground => true,
        BorderMode::Replicate => {
            let r = row.clamp(0, src.height() as isize - 1) as usize;
            let c = col.clamp(0, src.width() as isize - 1) as usize;
            src[[r, c]]
        }
    }
}

/// Erode a binary image with the default border and execution settings.
///
/// A pixel of the output is foreground iff every pixel covered by the structuring
/// element anchored on it is foreground. Pixels outside the image count as background.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `element` - The structuring element, [`StructuringElement::default`] is the 3x3 box.
///
/// # Returns
///
/// The eroded image.
///
/// # Example
///
/// ```
/// use binmorph_image::BinaryImage;
/// use binmorph_morphology::{erode, StructuringElement};
///
/// let image: BinaryImage = "
///     ....
///     .###
///     .###
///     .###
/// "
/// .parse()
/// .unwrap();
///
/// let eroded = erode(&image, &StructuringElement::default()).unwrap();
/// assert_eq!(eroded.to_string(), "....\n....\n..#.\n....");
/// ```
pub fn erode(
    src: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    erode_with(
        src,
        element,
        BorderMode::default(),
        ExecutionStrategy::default(),
    )
}

/// Dilate a binary image with the default border and execution settings.
///
/// A pixel `p` of the output is foreground iff `p - b` is foreground for some offset
/// `b` of the structuring element, i.e. the Minkowski sum of the image and the element.
/// For symmetric elements this is the same as probing the element anchored on `p`.
pub fn dilate(
    src: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    dilate_with(
        src,
        element,
        BorderMode::default(),
        ExecutionStrategy::default(),
    )
}

/// Erode a binary image with explicit border handling and execution strategy.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `element` - The structuring element.
/// * `border` - The value assumed outside the image ([`BorderMode`]).
/// * `strategy` - How rows are scheduled ([`ExecutionStrategy`]).
///
/// # Returns
///
/// The eroded image, or an error if the execution strategy is invalid.
pub fn erode_with(
    src: &BinaryImage,
    element: &StructuringElement,
    border: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<BinaryImage, MorphologyError> {
    let offsets = element.offsets();
    let mut dst = BinaryImage::from_size_val(src.size(), false)?;
    let width = src.width();

    execute_rows(strategy, dst.as_slice_mut(), width, |row, row_chunk| {
        for (col, out) in row_chunk.iter_mut().enumerate() {
            let (r, c) = (row as isize, col as isize);
            *out = offsets
                .iter()
                .all(|&[dr, dc]| sample(src, r + dr, c + dc, border));
        }
    })?;

    Ok(dst)
}

/// Dilate a binary image with explicit border handling and execution strategy.
///
/// See [`erode_with`] for the arguments.
pub fn dilate_with(
    src: &BinaryImage,
    element: &StructuringElement,
    border: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<BinaryImage, MorphologyError> {
    let offsets = element.offsets();
    let mut dst = BinaryImage::from_size_val(src.size(), false)?;
    let width = src.width();

    execute_rows(strategy, dst.as_slice_mut(), width, |row, row_chunk| {
        for (col, out) in row_chunk.iter_mut().enumerate() {
            let (r, c) = (row as isize, col as isize);
            *out = offsets
                .iter()
                .any(|&[dr, dc]| sample(src, r - dr, c - dc, border));
        }
    })?;

    Ok(dst)
}

/// Opening: erosion followed by dilation.
///
/// Removes foreground details smaller than the element and never adds foreground.
pub fn open(
    src: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    let eroded = erode(src, element)?;
    dilate(&eroded, element)
}

/// Closing: dilation followed by erosion.
///
/// Fills background gaps smaller than the element.
///
/// The erosion step pads with [`BorderMode::Foreground`] so that the padding alone does
/// not peel foreground off the image edge, which keeps the closing extensive.
pub fn close(
    src: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    let dilated = dilate(src, element)?;
    erode_with(
        &dilated,
        element,
        BorderMode::Foreground,
        ExecutionStrategy::default(),
    )
}
