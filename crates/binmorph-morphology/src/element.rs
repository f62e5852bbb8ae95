use std::fmt;

use crate::connectivity::Connectivity;
use crate::error::MorphologyError;

/// Shapes of morphological structuring elements.
///
/// All shapes are anchored at their geometric center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    /// A square box where every pixel is active.
    Box {
        /// The side length of the square (size x size).
        size: usize,
    },

    /// A cross (plus) shape: the center row and the center column are active.
    Cross {
        /// The side length of the square footprint (size x size).
        size: usize,
    },

    /// A digital disk: pixels at euclidean distance `<= radius` from the center.
    ///
    /// A radius of one gives the 3x3 cross, the 4-neighborhood.
    Disk {
        /// The radius of the disk in pixels.
        radius: usize,
    },

    /// An axis aligned ellipse inscribed in a `width x height` footprint.
    Ellipse {
        /// The width of the ellipse.
        width: usize,
        /// The height of the ellipse.
        height: usize,
    },
}

/// A binary structuring element.
///
/// The element stores a `width x height` footprint where `true` marks the pixels taking
/// part in the operation, together with the origin used to anchor it on each image pixel.
/// Offsets are measured from the origin as `[row, col]`.
///
/// # Example
///
/// ```rust
/// use binmorph_morphology::{ElementShape, StructuringElement};
///
/// let element = StructuringElement::new(ElementShape::Box { size: 3 }).unwrap();
/// assert_eq!(element.width(), 3);
/// assert_eq!(element.height(), 3);
/// assert_eq!(element.origin(), [1, 1]);
/// assert_eq!(element.offsets().len(), 9);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct StructuringElement {
    data: Vec<bool>,
    width: usize,
    height: usize,
    origin: [usize; 2],
    offsets: Vec<[isize; 2]>,
}

impl StructuringElement {
    /// Create a structuring element from a shape.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::EmptyElement`] when the shape has no active pixel,
    /// e.g. a box of size zero.
    pub fn new(shape: ElementShape) -> Result<Self, MorphologyError> {
        let (width, height, data) = match shape {
            ElementShape::Box { size } => (size, size, vec![true; size * size]),
            ElementShape::Cross { size } => (size, size, cross_mask(size)),
            ElementShape::Disk { radius } => {
                let size = 2 * radius + 1;
                (size, size, disk_mask(radius))
            }
            ElementShape::Ellipse { width, height } => (width, height, ellipse_mask(width, height)),
        };
        Self::from_mask(width, height, data, [height / 2, width / 2])
    }

    /// Create a structuring element from an explicit footprint.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the footprint.
    /// * `height` - The height of the footprint.
    /// * `data` - Row-major footprint, `true` for active pixels.
    /// * `origin` - The `[row, col]` anchor inside the footprint.
    ///
    /// # Errors
    ///
    /// Fails if the data length does not match the footprint, the origin lies outside of
    /// it, or no pixel is active.
    pub fn from_mask(
        width: usize,
        height: usize,
        data: Vec<bool>,
        origin: [usize; 2],
    ) -> Result<Self, MorphologyError> {
        if data.len() != width * height {
            return Err(MorphologyError::InvalidElementShape(
                data.len(),
                height,
                width,
            ));
        }

        if width == 0 || height == 0 {
            return Err(MorphologyError::EmptyElement);
        }

        if origin[0] >= height || origin[1] >= width {
            return Err(MorphologyError::OriginOutOfBounds(
                origin[0], origin[1], height, width,
            ));
        }

        let offsets = active_offsets(&data, width, origin);
        if offsets.is_empty() {
            return Err(MorphologyError::EmptyElement);
        }

        Ok(Self {
            data,
            width,
            height,
            origin,
            offsets,
        })
    }

    /// The unit neighborhood of a connectivity: the 3x3 cross for
    /// [`Connectivity::Four`] and the 3x3 box for [`Connectivity::Eight`].
    pub fn unit(connectivity: Connectivity) -> Self {
        let data = match connectivity {
            Connectivity::Four => cross_mask(3),
            Connectivity::Eight => vec![true; 9],
        };
        Self::centered(3, 3, data)
    }

    /// A disk of the given radius. See [`ElementShape::Disk`].
    pub fn disk(radius: usize) -> Self {
        let size = 2 * radius + 1;
        Self::centered(size, size, disk_mask(radius))
    }

    /// Get a reference to the footprint.
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Get the width of the footprint.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the footprint.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the `[row, col]` origin of the element inside its footprint.
    pub fn origin(&self) -> [usize; 2] {
        self.origin
    }

    /// `[row, col]` offsets of the active pixels relative to the origin, in raster order.
    pub fn offsets(&self) -> &[[isize; 2]] {
        &self.offsets
    }

    /// Whether the origin itself is active.
    ///
    /// Only elements containing their origin make dilation extensive and erosion
    /// anti-extensive.
    pub fn contains_origin(&self) -> bool {
        self.data[self.origin[0] * self.width + self.origin[1]]
    }

    /// Whether the element equals its reflection through the origin.
    pub fn is_symmetric(&self) -> bool {
        self.offsets
            .iter()
            .all(|&[dr, dc]| self.offsets.contains(&[-dr, -dc]))
    }

    /// The element reflected through its origin.
    pub fn reflect(&self) -> Self {
        let data = self.data.iter().rev().copied().collect();
        let origin = [
            self.height - 1 - self.origin[0],
            self.width - 1 - self.origin[1],
        ];
        let mut offsets = self
            .offsets
            .iter()
            .map(|&[dr, dc]| [-dr, -dc])
            .collect::<Vec<_>>();
        offsets.reverse();
        Self {
            data,
            width: self.width,
            height: self.height,
            origin,
            offsets,
        }
    }

    // NOTE: only for shapes known to have an active center pixel.
    fn centered(width: usize, height: usize, data: Vec<bool>) -> Self {
        let origin = [height / 2, width / 2];
        let offsets = active_offsets(&data, width, origin);
        Self {
            data,
            width,
            height,
            origin,
            offsets,
        }
    }
}

/// The unit 8-neighborhood, a 3x3 box.
impl Default for StructuringElement {
    fn default() -> Self {
        Self::unit(Connectivity::Eight)
    }
}

impl fmt::Debug for StructuringElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "StructuringElement({}x{}, origin {:?})",
            self.height, self.width, self.origin
        )?;
        write!(f, "{self}")
    }
}

impl fmt::Display for StructuringElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.data.chunks_exact(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &v in row {
                f.write_str(if v { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

fn active_offsets(data: &[bool], width: usize, origin: [usize; 2]) -> Vec<[isize; 2]> {
    data.iter()
        .enumerate()
        .filter(|(_, &active)| active)
        .map(|(idx, _)| {
            [
                (idx / width) as isize - origin[0] as isize,
                (idx % width) as isize - origin[1] as isize,
            ]
        })
        .collect()
}

fn cross_mask(size: usize) -> Vec<bool> {
    let mut data = vec![false; size * size];
    let mid = size / 2;

    // fill horizontal line
    for j in 0..size {
        data[mid * size + j] = true;
    }

    // fill vertical line
    for i in 0..size {
        data[i * size + mid] = true;
    }

    data
}

fn disk_mask(radius: usize) -> Vec<bool> {
    let size = 2 * radius + 1;
    let r = radius as isize;
    let mut data = vec![false; size * size];
    for i in 0..size {
        for j in 0..size {
            let y = i as isize - r;
            let x = j as isize - r;
            data[i * size + j] = x * x + y * y <= r * r;
        }
    }
    data
}

fn ellipse_mask(width: usize, height: usize) -> Vec<bool> {
    let mut data = vec![false; width * height];
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let rx = width as f32 / 2.0;
    let ry = height as f32 / 2.0;

    for i in 0..height {
        for j in 0..width {
            let x = j as f32 - cx;
            let y = i as f32 - cy;
            // (x^2 / rx^2) + (y^2 / ry^2) <= 1
            if (x * x) / (rx * rx) + (y * y) / (ry * ry) <= 1.0 {
                data[i * width + j] = true;
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_element() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(ElementShape::Box { size: 3 })?;
        assert_eq!(element.width(), 3);
        assert_eq!(element.height(), 3);
        assert!(element.data().iter().all(|&x| x));
        assert_eq!(element, StructuringElement::default());
        Ok(())
    }

    #[test]
    fn test_cross_element() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(ElementShape::Cross { size: 3 })?;
        assert_eq!(element.to_string(), ".#.\n###\n.#.");
        assert_eq!(element, StructuringElement::unit(Connectivity::Four));
        Ok(())
    }

    #[test]
    fn test_disk_element() -> Result<(), MorphologyError> {
        assert_eq!(
            StructuringElement::disk(1),
            StructuringElement::unit(Connectivity::Four)
        );
        let disk = StructuringElement::new(ElementShape::Disk { radius: 2 })?;
        assert_eq!(disk.to_string(), "..#..\n.###.\n#####\n.###.\n..#..");
        assert_eq!(disk.origin(), [2, 2]);
        assert_eq!(StructuringElement::disk(0).offsets(), &[[0, 0]]);
        Ok(())
    }

    #[test]
    fn test_ellipse_element() -> Result<(), MorphologyError> {
        let element = StructuringElement::new(ElementShape::Ellipse {
            width: 5,
            height: 5,
        })?;
        assert_eq!(element.width(), 5);
        assert_eq!(element.height(), 5);
        assert!(element.contains_origin());
        assert!(element.is_symmetric());
        Ok(())
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(
            StructuringElement::new(ElementShape::Box { size: 0 }),
            Err(MorphologyError::EmptyElement)
        );
        assert_eq!(
            StructuringElement::from_mask(2, 1, vec![false, false], [0, 0]),
            Err(MorphologyError::EmptyElement)
        );
    }

    #[test]
    fn test_invalid_mask() {
        assert_eq!(
            StructuringElement::from_mask(2, 2, vec![true; 3], [0, 0]),
            Err(MorphologyError::InvalidElementShape(3, 2, 2))
        );
        assert_eq!(
            StructuringElement::from_mask(2, 1, vec![true; 2], [1, 0]),
            Err(MorphologyError::OriginOutOfBounds(1, 0, 1, 2))
        );
    }

    #[test]
    fn test_offsets_and_reflection() -> Result<(), MorphologyError> {
        // an L shape anchored at its corner
        let element = StructuringElement::from_mask(2, 2, vec![true, false, true, true], [1, 0])?;
        assert_eq!(element.offsets(), &[[-1, 0], [0, 0], [0, 1]]);
        assert!(!element.is_symmetric());

        let reflected = element.reflect();
        assert_eq!(reflected.origin(), [0, 1]);
        assert_eq!(reflected.to_string(), "##\n.#");
        assert_eq!(reflected.offsets(), &[[0, -1], [0, 0], [1, 0]]);
        assert_eq!(reflected.reflect(), element);
        Ok(())
    }
}
