use binmorph_image::BinaryImage;

use crate::connectivity::Connectivity;
use crate::reconstruct::propagate;

/// Fill the holes of a binary image.
///
/// A hole is a background region that cannot be reached from the image border. The
/// border background is flooded with the [`Connectivity::dual`] of `connectivity`, and
/// every background pixel the flood does not reach becomes foreground.
///
/// With the default [`Connectivity::Eight`] the flood moves through edges only, so a
/// diagonal gap in an 8-connected outline does not open its hole.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `connectivity` - The adjacency of the foreground.
///
/// # Returns
///
/// An image that contains `src` and has no holes.
///
/// # Example
///
/// ```
/// use binmorph_image::BinaryImage;
/// use binmorph_morphology::{fill_holes, Connectivity};
///
/// let ring: BinaryImage = "###\n#.#\n###".parse().unwrap();
/// assert_eq!(fill_holes(&ring, Connectivity::Eight).to_string(), "###\n###\n###");
/// ```
pub fn fill_holes(src: &BinaryImage, connectivity: Connectivity) -> BinaryImage {
    let background = src.complement();
    let (height, width) = (src.height(), src.width());

    // seed with the background pixels on the border
    let mut reached = background.clone();
    for (idx, px) in reached.as_slice_mut().iter_mut().enumerate() {
        let (row, col) = (idx / width, idx % width);
        if row > 0 && col > 0 && row + 1 < height && col + 1 < width {
            *px = false;
        }
    }

    propagate(
        &mut reached,
        &background,
        true,
        connectivity.dual().offsets(),
        None,
    );

    let filled = reached.complement();
    log::debug!(
        "filled {} hole pixels",
        filled.count_foreground() - src.count_foreground()
    );
    filled
}
