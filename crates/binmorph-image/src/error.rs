use crate::image::ImageSize;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the image has a zero width or height.
    #[error("Image size must be positive, got {0}")]
    ZeroSize(ImageSize),

    /// Error when the pixel data does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when two images that must share a shape do not.
    #[error("Image size mismatch: expected {0}, got {1}")]
    InvalidImageSize(ImageSize, ImageSize),

    /// Error when a pixel index is outside the image.
    #[error("Pixel index ({0}, {1}) is out of bounds for {2}")]
    PixelIndexOutOfBounds(usize, usize, ImageSize),

    /// Error when a text grid contains a character that is not a pixel symbol.
    #[error("Invalid pixel symbol {0:?} on line {1}")]
    InvalidPixelSymbol(char, usize),

    /// Error when the rows of a text grid have different lengths.
    #[error("Row {0} has {1} pixels, expected {2}")]
    RaggedRows(usize, usize, usize),

    /// Error when a generated grid has a zero block size.
    #[error("Block size must be positive")]
    ZeroBlockSize,
}
