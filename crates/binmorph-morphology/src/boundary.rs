use binmorph_image::BinaryImage;

use crate::element::StructuringElement;
use crate::error::MorphologyError;
use crate::ops::erode;

/// Extract the inner boundary of every foreground region.
///
/// The boundary is the set difference `src AND NOT erode(src, element)`. With the unit
/// 3x3 element it is a one pixel wide ring along the inner edge of each region. Erosion
/// pads the image with background, so foreground touching the image edge is part of the
/// boundary as well.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `element` - The structuring element used for the erosion.
///
/// # Returns
///
/// The boundary image.
pub fn boundary(
    src: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    let eroded = erode(src, element)?;
    Ok(src.difference(&eroded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::Connectivity;
    use binmorph_image::ImageSize;

    fn img(text: &str) -> BinaryImage {
        text.parse().unwrap()
    }

    #[test]
    fn test_boundary_block() -> Result<(), MorphologyError> {
        let src = img("
            ......
            .####.
            .####.
            .####.
            .####.
            ......
        ");
        let edge = boundary(&src, &StructuringElement::default())?;
        assert_eq!(
            edge,
            img("
                ......
                .####.
                .#..#.
                .#..#.
                .####.
                ......
            ")
        );
        Ok(())
    }

    #[test]
    fn test_boundary_small_region_is_all_boundary() -> Result<(), MorphologyError> {
        let src = img("
            .....
            .##..
            .##..
            .....
        ");
        assert_eq!(boundary(&src, &StructuringElement::default())?, src);
        Ok(())
    }

    #[test]
    fn test_boundary_all_foreground() -> Result<(), MorphologyError> {
        let src = BinaryImage::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            true,
        )?;
        let edge = boundary(&src, &StructuringElement::default())?;
        assert_eq!(
            edge,
            img("
                #####
                #...#
                #...#
                #####
            ")
        );
        Ok(())
    }

    #[test]
    fn test_boundary_all_background() -> Result<(), MorphologyError> {
        let src = BinaryImage::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            false,
        )?;
        let edge = boundary(&src, &StructuringElement::default())?;
        assert!(edge.is_background());
        Ok(())
    }

    #[test]
    fn test_boundary_cross_element() -> Result<(), MorphologyError> {
        let src = img("
            .....
            .###.
            .###.
            .###.
            .....
        ");
        let edge = boundary(&src, &StructuringElement::unit(Connectivity::Four))?;
        assert_eq!(
            edge,
            img("
                .....
                .###.
                .#.#.
                .###.
                .....
            ")
        );
        Ok(())
    }
}
