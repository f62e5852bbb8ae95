use std::collections::VecDeque;

use binmorph_image::{BinaryImage, ImageError, ImageSize};

use crate::connectivity::Connectivity;

/// An image of connected component labels.
///
/// Background pixels have label `0`, the components are numbered `1..=num_labels` in the
/// raster order of their first pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    size: ImageSize,
    labels: Vec<u32>,
    num_labels: usize,
}

impl LabelImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of connected components.
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// The labels in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }

    /// Label of the pixel at `[row, col]`, or `None` outside the image.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size.height && col < self.size.width {
            Some(self.labels[row * self.size.width + col])
        } else {
            None
        }
    }

    /// Pixel count of each component, indexed by `label - 1`.
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_labels];
        for &l in self.labels.iter().filter(|&&l| l > 0) {
            sizes[l as usize - 1] += 1;
        }
        sizes
    }

    /// The pixels carrying `label` as a binary image.
    pub fn component(&self, label: u32) -> Result<BinaryImage, ImageError> {
        let data = self.labels.iter().map(|&l| l == label && l > 0).collect();
        BinaryImage::new(self.size, data)
    }
}

/// Label the connected foreground components of a binary image.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `connectivity` - The adjacency used to connect foreground pixels.
///
/// # Example
///
/// ```
/// use binmorph_image::BinaryImage;
/// use binmorph_morphology::{label, Connectivity};
///
/// let image: BinaryImage = "#.\n.#".parse().unwrap();
/// assert_eq!(label(&image, Connectivity::Eight).num_labels(), 1);
/// assert_eq!(label(&image, Connectivity::Four).num_labels(), 2);
/// ```
pub fn label(src: &BinaryImage, connectivity: Connectivity) -> LabelImage {
    let (height, width) = (src.height(), src.width());
    let pixels = src.as_slice();
    let mut labels = vec![0u32; pixels.len()];
    let mut next = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..pixels.len() {
        if !pixels[start] || labels[start] != 0 {
            continue;
        }

        next += 1;
        labels[start] = next;
        queue.push_back(start);

        while let Some(idx) = queue.pop_front() {
            let (row, col) = ((idx / width) as isize, (idx % width) as isize);
            for &[dr, dc] in connectivity.offsets() {
                let (r, c) = (row + dr, col + dc);
                if r < 0 || c < 0 || r >= height as isize || c >= width as isize {
                    continue;
                }
                let n = r as usize * width + c as usize;
                if pixels[n] && labels[n] == 0 {
                    labels[n] = next;
                    queue.push_back(n);
                }
            }
        }
    }

    LabelImage {
        size: src.size(),
        labels,
        num_labels: next as usize,
    }
}

/// Number of connected foreground components.
pub fn count_components(src: &BinaryImage, connectivity: Connectivity) -> usize {
    label(src, connectivity).num_labels()
}

/// Number of holes: background components that do not touch the image border.
///
/// `connectivity` is the foreground adjacency, the background is connected with its
/// [`Connectivity::dual`].
pub fn count_holes(src: &BinaryImage, connectivity: Connectivity) -> usize {
    let background = label(&src.complement(), connectivity.dual());
    let (height, width) = (src.height(), src.width());

    let mut touches_border = vec![false; background.num_labels() + 1];
    for row in 0..height {
        for col in 0..width {
            if row == 0 || col == 0 || row + 1 == height || col + 1 == width {
                touches_border[background.labels[row * width + col] as usize] = true;
            }
        }
    }

    touches_border[1..].iter().filter(|&&t| !t).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(text: &str) -> BinaryImage {
        text.parse().unwrap()
    }

    #[test]
    fn test_label_raster_order() -> Result<(), ImageError> {
        let src = img("
            ##..#
            ....#
            .#...
        ");
        let labels = label(&src, Connectivity::Four);
        assert_eq!(labels.num_labels(), 3);
        assert_eq!(
            labels.as_slice(),
            &[1, 1, 0, 0, 2, 0, 0, 0, 0, 2, 0, 3, 0, 0, 0]
        );
        assert_eq!(labels.component_sizes(), vec![2, 2, 1]);
        assert_eq!(labels.get(2, 1), Some(3));
        assert_eq!(labels.get(3, 0), None);
        assert_eq!(
            labels.component(2)?,
            img("
                ....#
                ....#
                .....
            ")
        );
        Ok(())
    }

    #[test]
    fn test_label_diagonal() {
        let src = img("
            #...
            .#..
            ..##
        ");
        assert_eq!(count_components(&src, Connectivity::Four), 3);
        assert_eq!(count_components(&src, Connectivity::Eight), 1);
    }

    #[test]
    fn test_label_background_only() {
        let src = img("...\n...");
        assert_eq!(count_components(&src, Connectivity::Eight), 0);
        assert_eq!(count_holes(&src, Connectivity::Eight), 0);
    }

    #[test]
    fn test_count_holes() {
        let ring = img("
            .....
            .###.
            .#.#.
            .###.
            .....
        ");
        assert_eq!(count_holes(&ring, Connectivity::Eight), 1);

        // a diamond only closes its hole under 8-connectivity of the foreground
        let diamond = img("
            .....
            ..#..
            .#.#.
            ..#..
            .....
        ");
        assert_eq!(count_holes(&diamond, Connectivity::Eight), 1);
        assert_eq!(count_holes(&diamond, Connectivity::Four), 0);

        // background touching the border is not a hole
        let open_ring = img("
            ###
            #.#
            #.#
        ");
        assert_eq!(count_holes(&open_ring, Connectivity::Eight), 0);
    }
}
