#![deny(missing_docs)]
//! Binary image type shared by the morphological operators.

/// binary image representation.
pub mod image;

/// Error types for the image module.
pub mod error;

/// synthetic test images.
pub mod synthetic;

pub use crate::error::ImageError;
pub use crate::image::{BinaryImage, ImageSize};
pub use crate::synthetic::grid_image;
