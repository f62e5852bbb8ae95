#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// inner boundary extraction.
pub mod boundary;

/// pixel adjacency.
pub mod connectivity;

/// structuring elements.
pub mod element;

/// error types for the morphology module.
pub mod error;

/// hole filling.
pub mod fill;

/// convex hull of the foreground.
pub mod hull;

/// connected component labeling.
pub mod label;

/// erosion, dilation, opening and closing.
pub mod ops;

/// module containing parallization utilities.
pub mod parallel;

/// geodesic reconstruction.
pub mod reconstruct;

/// topology preserving thinning.
pub mod skeleton;

pub use crate::boundary::boundary;
pub use crate::connectivity::Connectivity;
pub use crate::element::{ElementShape, StructuringElement};
pub use crate::error::MorphologyError;
pub use crate::fill::fill_holes;
pub use crate::hull::{convex_hull, convex_hull_vertices, convex_hull_with};
pub use crate::label::{count_components, count_holes, label, LabelImage};
pub use crate::ops::{close, dilate, dilate_with, erode, erode_with, open, BorderMode};
pub use crate::parallel::{ExecutionStrategy, ParallelError};
pub use crate::reconstruct::{
    geodesic_dilate, geodesic_erode, reconstruct, reconstruct_with, ReconstructionMethod,
    ReconstructionMode, ReconstructionParams, ReconstructionResult,
};
pub use crate::skeleton::{skeletonize, skeletonize_with, SkeletonParams, SkeletonResult};
