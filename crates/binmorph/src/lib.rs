#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use binmorph_image as image;

#[doc(inline)]
pub use binmorph_morphology as morphology;
