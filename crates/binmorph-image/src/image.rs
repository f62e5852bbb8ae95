use std::{fmt, ops, str::FromStr};

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use binmorph_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Total number of pixels.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

/// A two dimensional binary image.
///
/// Pixels are stored row-major as booleans where `true` is foreground and `false` is
/// background. Both dimensions are always positive.
///
/// Pixels are addressed as `[row, col]`, in the same order as the underlying storage.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BinaryImage {
    size: ImageSize,
    data: Vec<bool>,
}

impl BinaryImage {
    /// Create a new binary image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row-major order.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the size has a zero dimension or the length of the pixel data does not match
    /// the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use binmorph_image::{BinaryImage, ImageSize};
    ///
    /// let image = BinaryImage::new(
    ///     ImageSize {
    ///         width: 3,
    ///         height: 2,
    ///     },
    ///     vec![false, true, false, true, true, true],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 3);
    /// assert_eq!(image.height(), 2);
    /// assert_eq!(image.count_foreground(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<bool>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSize(size));
        }

        if data.len() != size.area() {
            return Err(ImageError::InvalidDataLength(data.len(), size.area()));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use binmorph_image::{BinaryImage, ImageSize};
    ///
    /// let image = BinaryImage::from_size_val(ImageSize { width: 4, height: 4 }, false).unwrap();
    /// assert!(image.is_background());
    /// ```
    pub fn from_size_val(size: ImageSize, val: bool) -> Result<Self, ImageError> {
        Self::new(size, vec![val; size.area()])
    }

    /// Create a new image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(size.area());
        for row in 0..size.height {
            for col in 0..size.width {
                data.push(f(row, col));
            }
        }
        Self::new(size, data)
    }

    /// Create a new image from 0/1 integer data. Any non-zero value is foreground.
    pub fn from_u8(size: ImageSize, data: &[u8]) -> Result<Self, ImageError> {
        Self::new(size, data.iter().map(|&v| v != 0).collect())
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel data of the image.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Get the mutable pixel data of the image.
    pub fn as_slice_mut(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Get the pixel at `[row, col]`, or `None` if the index lies outside the image.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.height() && col < self.width() {
            Some(self.data[row * self.width() + col])
        } else {
            None
        }
    }

    /// Get the pixel at signed coordinates, or `None` if they fall outside the image.
    pub fn get_signed(&self, row: isize, col: isize) -> Option<bool> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Set the pixel at `[row, col]`.
    ///
    /// # Errors
    ///
    /// If the index lies outside the image, an error is returned.
    pub fn set(&mut self, row: usize, col: usize, val: bool) -> Result<(), ImageError> {
        if row >= self.height() || col >= self.width() {
            return Err(ImageError::PixelIndexOutOfBounds(row, col, self.size));
        }
        let width = self.width();
        self.data[row * width + col] = val;
        Ok(())
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Whether the image has no foreground pixel at all.
    pub fn is_background(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Iterate over the `[row, col]` coordinates of the foreground pixels in raster order.
    pub fn foreground(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let width = self.width();
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(idx, _)| [idx / width, idx % width])
    }

    /// Return the pixel-wise complement of the image.
    pub fn complement(&self) -> BinaryImage {
        BinaryImage {
            size: self.size,
            data: self.data.iter().map(|&v| !v).collect(),
        }
    }

    /// Pixel-wise `self AND other`.
    ///
    /// # Errors
    ///
    /// If the images have different sizes, an error is returned.
    pub fn intersection(&self, other: &BinaryImage) -> Result<BinaryImage, ImageError> {
        self.zip_with(other, |a, b| a && b)
    }

    /// Pixel-wise `self OR other`.
    ///
    /// # Errors
    ///
    /// If the images have different sizes, an error is returned.
    pub fn union(&self, other: &BinaryImage) -> Result<BinaryImage, ImageError> {
        self.zip_with(other, |a, b| a || b)
    }

    /// Pixel-wise set difference `self AND NOT other`.
    ///
    /// # Errors
    ///
    /// If the images have different sizes, an error is returned.
    pub fn difference(&self, other: &BinaryImage) -> Result<BinaryImage, ImageError> {
        self.zip_with(other, |a, b| a && !b)
    }

    /// Whether every foreground pixel of `self` is also foreground in `other`.
    ///
    /// # Errors
    ///
    /// If the images have different sizes, an error is returned.
    pub fn is_subset_of(&self, other: &BinaryImage) -> Result<bool, ImageError> {
        self.check_same_size(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| !a || b))
    }

    /// Check that `other` has the same size as `self`.
    pub fn check_same_size(&self, other: &BinaryImage) -> Result<(), ImageError> {
        if self.size != other.size {
            return Err(ImageError::InvalidImageSize(self.size, other.size));
        }
        Ok(())
    }

    /// Convert the image to bytes with `fg_value` for foreground and zero for background.
    pub fn to_u8(&self, fg_value: u8) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| if v { fg_value } else { 0 })
            .collect()
    }

    fn zip_with(
        &self,
        other: &BinaryImage,
        f: impl Fn(bool, bool) -> bool,
    ) -> Result<BinaryImage, ImageError> {
        self.check_same_size(other)?;
        Ok(BinaryImage {
            size: self.size,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl ops::Index<[usize; 2]> for BinaryImage {
    type Output = bool;

    fn index(&self, index: [usize; 2]) -> &Self::Output {
        let [row, col] = index;
        assert!(col < self.width(), "column {col} out of bounds");
        &self.data[row * self.width() + col]
    }
}

impl ops::IndexMut<[usize; 2]> for BinaryImage {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut Self::Output {
        let [row, col] = index;
        assert!(col < self.width(), "column {col} out of bounds");
        let width = self.width();
        &mut self.data[row * width + col]
    }
}

/// Renders the image as text, `#` for foreground and `.` for background, one line per row.
impl fmt::Display for BinaryImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.data.chunks_exact(self.width()).enumerate() {
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

impl fmt::Debug for BinaryImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "BinaryImage({}x{})", self.height(), self.width())?;
        write!(f, "{self}")
    }
}

/// Parses a text grid, the inverse of the [`fmt::Display`] rendering.
///
/// `#` and `1` are foreground, `.` and `0` are background. Leading and trailing
/// whitespace on each line is ignored, as are blank lines.
impl FromStr for BinaryImage {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut data = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (line_no, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let row_start = data.len();
            for ch in line.chars() {
                match ch {
                    '#' | '1' => data.push(true),
                    '.' | '0' => data.push(false),
                    other => return Err(ImageError::InvalidPixelSymbol(other, line_no + 1)),
                }
            }

            let row_len = data.len() - row_start;
            match width {
                None => width = Some(row_len),
                Some(w) if w != row_len => {
                    return Err(ImageError::RaggedRows(height, row_len, w));
                }
                Some(_) => {}
            }
            height += 1;
        }

        BinaryImage::new(
            ImageSize {
                width: width.unwrap_or(0),
                height,
            },
            data,
        )
    }
}
