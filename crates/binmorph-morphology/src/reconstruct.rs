use std::fmt;

use binmorph_image::BinaryImage;

use crate::element::StructuringElement;
use crate::error::{check_shape, MorphologyError};
use crate::ops::{dilate_with, erode_with, BorderMode};
use crate::parallel::ExecutionStrategy;

/// Direction of a geodesic reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconstructionMode {
    /// Grow the marker inside the mask. Requires `marker <= mask` pointwise.
    Dilation,
    /// Shrink the marker down to the mask. Requires `marker >= mask` pointwise.
    Erosion,
}

impl fmt::Display for ReconstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReconstructionMode::Dilation => write!(f, "dilation"),
            ReconstructionMode::Erosion => write!(f, "erosion"),
        }
    }
}

/// Algorithm used to reach the reconstruction fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconstructionMethod {
    /// Repeat whole-image geodesic steps until the image stops changing.
    ///
    /// Takes O(H·W) per step and as many steps as the geodesic diameter of the mask.
    Iterative,

    /// Propagate from a FIFO queue of pixels changed by the previous wave.
    ///
    /// Every pixel is changed at most once, so the cost is linear in the number of
    /// pixels. Produces the same image and iteration count as [`Self::Iterative`].
    #[default]
    Queue,
}

/// Parameters of a geodesic reconstruction.
#[derive(Debug, Clone)]
pub struct ReconstructionParams {
    /// Element defining one geodesic step, the unit 3x3 box by default.
    pub element: StructuringElement,
    /// The algorithm used to reach the fixed point.
    pub method: ReconstructionMethod,
    /// Stop after this many geodesic steps even if the fixed point was not reached.
    pub max_iterations: Option<usize>,
    /// Row scheduling of the whole-image steps of [`ReconstructionMethod::Iterative`].
    pub strategy: ExecutionStrategy,
}

impl Default for ReconstructionParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            method: ReconstructionMethod::default(),
            max_iterations: None,
            strategy: ExecutionStrategy::default(),
        }
    }
}

/// Result of a geodesic reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionResult {
    /// The reconstructed image.
    pub image: BinaryImage,
    /// Number of geodesic steps that changed the image.
    pub num_iterations: usize,
    /// Whether the fixed point was reached.
    ///
    /// `false` only when `max_iterations` stopped the propagation early, in which case
    /// `image` is the partial reconstruction after `num_iterations` steps.
    pub converged: bool,
}

/// One geodesic dilation step: `(dilate(marker) OR marker) AND mask`.
///
/// Pixels outside the image are background for the dilation. The marker itself is kept
/// even if the element does not contain its origin, so repeated steps only grow. No
/// ordering between the marker and the mask is required.
///
/// # Errors
///
/// Fails with [`MorphologyError::ShapeMismatch`] if the images differ in size.
pub fn geodesic_dilate(
    marker: &BinaryImage,
    mask: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    geodesic_dilate_with(marker, mask, element, ExecutionStrategy::default())
}

/// One geodesic erosion step: `(erode(marker) AND marker) OR mask`.
///
/// Pixels outside the image are foreground for the erosion, the dual of
/// [`geodesic_dilate`], so background only enters through the marker.
///
/// # Errors
///
/// Fails with [`MorphologyError::ShapeMismatch`] if the images differ in size.
pub fn geodesic_erode(
    marker: &BinaryImage,
    mask: &BinaryImage,
    element: &StructuringElement,
) -> Result<BinaryImage, MorphologyError> {
    geodesic_erode_with(marker, mask, element, ExecutionStrategy::default())
}

fn geodesic_dilate_with(
    marker: &BinaryImage,
    mask: &BinaryImage,
    element: &StructuringElement,
    strategy: ExecutionStrategy,
) -> Result<BinaryImage, MorphologyError> {
    check_shape(mask.size(), marker.size())?;
    let dilated = dilate_with(marker, element, BorderMode::Background, strategy)?;
    Ok(dilated.union(marker)?.intersection(mask)?)
}

fn geodesic_erode_with(
    marker: &BinaryImage,
    mask: &BinaryImage,
    element: &StructuringElement,
    strategy: ExecutionStrategy,
) -> Result<BinaryImage, MorphologyError> {
    check_shape(mask.size(), marker.size())?;
    let eroded = erode_with(marker, element, BorderMode::Foreground, strategy)?;
    Ok(eroded.intersection(marker)?.union(mask)?)
}

/// Geodesic reconstruction of `marker` under `mask` with the default parameters.
///
/// In [`ReconstructionMode::Dilation`] the result is the union of the connected
/// components of `mask` (under the unit 8-neighborhood) that contain at least one
/// foreground pixel of `marker`. [`ReconstructionMode::Erosion`] is the dual: the
/// background components of `mask` survive only where the marker has background.
///
/// # Arguments
///
/// * `marker` - The seed image.
/// * `mask` - The image constraining the propagation.
/// * `mode` - The direction of the reconstruction.
///
/// # Errors
///
/// * [`MorphologyError::ShapeMismatch`] if the images differ in size.
/// * [`MorphologyError::OrderingViolation`] if the marker is not below (dilation) or
///   above (erosion) the mask. The marker is never clamped silently.
///
/// # Example
///
/// ```
/// use binmorph_image::BinaryImage;
/// use binmorph_morphology::{reconstruct, ReconstructionMode};
///
/// let mask: BinaryImage = "##..##\n##..##".parse().unwrap();
/// let marker: BinaryImage = "......\n.....#".parse().unwrap();
///
/// let out = reconstruct(&marker, &mask, ReconstructionMode::Dilation).unwrap();
/// assert_eq!(out.to_string(), "....##\n....##");
/// ```
pub fn reconstruct(
    marker: &BinaryImage,
    mask: &BinaryImage,
    mode: ReconstructionMode,
) -> Result<BinaryImage, MorphologyError> {
    let result = reconstruct_with(marker, mask, mode, &ReconstructionParams::default())?;
    Ok(result.image)
}

/// Geodesic reconstruction with explicit parameters.
///
/// Setting [`ReconstructionParams::max_iterations`] bounds the work. If the bound is
/// hit the partial reconstruction is returned with `converged == false`; this is a
/// degraded result, not an error.
pub fn reconstruct_with(
    marker: &BinaryImage,
    mask: &BinaryImage,
    mode: ReconstructionMode,
    params: &ReconstructionParams,
) -> Result<ReconstructionResult, MorphologyError> {
    check_shape(mask.size(), marker.size())?;
    check_ordering(marker, mask, mode)?;

    log::debug!(
        "reconstruction by {} ({:?}) of {} marker pixels under {} mask pixels",
        mode,
        params.method,
        marker.count_foreground(),
        mask.count_foreground()
    );

    let result = match params.method {
        ReconstructionMethod::Iterative => reconstruct_iterative(marker, mask, mode, params)?,
        ReconstructionMethod::Queue => {
            let mut image = marker.clone();
            let propagation = match mode {
                ReconstructionMode::Dilation => propagate(
                    &mut image,
                    mask,
                    true,
                    params.element.offsets(),
                    params.max_iterations,
                ),
                ReconstructionMode::Erosion => propagate(
                    &mut image,
                    mask,
                    false,
                    params.element.reflect().offsets(),
                    params.max_iterations,
                ),
            };
            ReconstructionResult {
                image,
                num_iterations: propagation.num_iterations,
                converged: propagation.converged,
            }
        }
    };

    if result.converged {
        log::debug!(
            "reconstruction converged after {} iterations",
            result.num_iterations
        );
    } else {
        log::warn!(
            "reconstruction stopped after {} iterations before reaching its fixed point",
            result.num_iterations
        );
    }

    Ok(result)
}

fn check_ordering(
    marker: &BinaryImage,
    mask: &BinaryImage,
    mode: ReconstructionMode,
) -> Result<(), MorphologyError> {
    let violation = marker
        .as_slice()
        .iter()
        .zip(mask.as_slice())
        .position(|(&m, &k)| match mode {
            ReconstructionMode::Dilation => m && !k,
            ReconstructionMode::Erosion => !m && k,
        });

    match violation {
        Some(idx) => Err(MorphologyError::OrderingViolation {
            row: idx / marker.width(),
            col: idx % marker.width(),
            mode,
        }),
        None => Ok(()),
    }
}

fn reconstruct_iterative(
    marker: &BinaryImage,
    mask: &BinaryImage,
    mode: ReconstructionMode,
    params: &ReconstructionParams,
) -> Result<ReconstructionResult, MorphologyError> {
    let mut current = marker.clone();
    let mut num_iterations = 0;
    let max_iterations = params.max_iterations.unwrap_or(usize::MAX);

    let converged = loop {
        let next = match mode {
            ReconstructionMode::Dilation => {
                geodesic_dilate_with(&current, mask, &params.element, params.strategy)?
            }
            ReconstructionMode::Erosion => {
                geodesic_erode_with(&current, mask, &params.element, params.strategy)?
            }
        };

        if next == current {
            break true;
        }

        if num_iterations >= max_iterations {
            break false;
        }

        num_iterations += 1;
        log::trace!(
            "iteration {}: {} foreground pixels",
            num_iterations,
            next.count_foreground()
        );
        current = next;
    };

    Ok(ReconstructionResult {
        image: current,
        num_iterations,
        converged,
    })
}

/// Outcome of a queue propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Propagation {
    pub num_iterations: usize,
    pub converged: bool,
}

/// Spread `value` from every pixel of `work` holding it into the pixels where `mask`
/// holds it too, moving by `steps` `[row, col]` offsets, one wave per iteration.
///
/// A wave that would exceed `max_iterations` is rolled back, so the image after `k`
/// waves is exactly the image after `k` whole-image geodesic steps.
pub(crate) fn propagate(
    work: &mut BinaryImage,
    mask: &BinaryImage,
    value: bool,
    steps: &[[isize; 2]],
    max_iterations: Option<usize>,
) -> Propagation {
    let (height, width) = (work.height() as isize, work.width() as isize);
    let mask = mask.as_slice();
    let pixels = work.as_slice_mut();

    let mut frontier = pixels
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == value)
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();
    let mut num_iterations = 0;

    loop {
        let mut next = Vec::new();
        for &idx in &frontier {
            let (row, col) = ((idx as isize) / width, (idx as isize) % width);
            for &[dr, dc] in steps {
                let (r, c) = (row + dr, col + dc);
                if r < 0 || c < 0 || r >= height || c >= width {
                    continue;
                }
                let n = (r * width + c) as usize;
                if mask[n] == value && pixels[n] != value {
                    pixels[n] = value;
                    next.push(n);
                }
            }
        }

        if next.is_empty() {
            return Propagation {
                num_iterations,
                converged: true,
            };
        }

        if max_iterations.is_some_and(|max| num_iterations >= max) {
            for &n in &next {
                pixels[n] = !value;
            }
            return Propagation {
                num_iterations,
                converged: false,
            };
        }

        num_iterations += 1;
        frontier = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::Connectivity;

    fn img(text: &str) -> BinaryImage {
        text.parse().unwrap()
    }

    fn params(method: ReconstructionMethod, max_iterations: Option<usize>) -> ReconstructionParams {
        ReconstructionParams {
            element: StructuringElement::unit(Connectivity::Four),
            method,
            max_iterations,
            strategy: ExecutionStrategy::Serial,
        }
    }

    #[test]
    fn test_reconstruct_dilation_keeps_touched_components() -> Result<(), MorphologyError> {
        let mask = img("
            ##....#
            ##...##
            ...#...
            ..###..
        ");
        let marker = img("
            .......
            .#.....
            .......
            ....#..
        ");
        let out = reconstruct(&marker, &mask, ReconstructionMode::Dilation)?;
        assert_eq!(
            out,
            img("
                ##.....
                ##.....
                ...#...
                ..###..
            ")
        );
        Ok(())
    }

    #[test]
    fn test_reconstruct_dilation_connectivity() -> Result<(), MorphologyError> {
        let mask = img("
            #...
            .#..
            ..##
        ");
        let marker = img("
            #...
            ....
            ....
        ");
        // diagonal neighbors are reached with the 3x3 box only
        let dilated = reconstruct(&marker, &mask, ReconstructionMode::Dilation)?;
        assert_eq!(dilated, mask);

        let four = reconstruct_with(
            &marker,
            &mask,
            ReconstructionMode::Dilation,
            &params(ReconstructionMethod::Queue, None),
        )?;
        assert_eq!(four.image, marker);
        assert_eq!(four.num_iterations, 0);
        assert!(four.converged);
        Ok(())
    }

    #[test]
    fn test_reconstruct_erosion() -> Result<(), MorphologyError> {
        let mask = img("
            #####.
            #.#.#.
            #####.
        ");
        let marker = img("
            #####.
            #.####
            ######
        ");
        let out = reconstruct(&marker, &mask, ReconstructionMode::Erosion)?;
        assert_eq!(
            out,
            img("
                #####.
                #.###.
                #####.
            ")
        );
        Ok(())
    }

    #[test]
    fn test_ordering_violation() {
        let mask = img("##..\n##..");
        let marker = img("....\n..#.");
        assert_eq!(
            reconstruct(&marker, &mask, ReconstructionMode::Dilation),
            Err(MorphologyError::OrderingViolation {
                row: 1,
                col: 2,
                mode: ReconstructionMode::Dilation,
            })
        );
        assert_eq!(
            reconstruct(&mask, &marker, ReconstructionMode::Erosion),
            Err(MorphologyError::OrderingViolation {
                row: 1,
                col: 2,
                mode: ReconstructionMode::Erosion,
            })
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let mask = img("##\n##");
        let marker = img("#..\n...");
        assert_eq!(
            reconstruct(&marker, &mask, ReconstructionMode::Dilation),
            Err(MorphologyError::ShapeMismatch(mask.size(), marker.size()))
        );
        assert!(matches!(
            geodesic_dilate(&marker, &mask, &StructuringElement::default()),
            Err(MorphologyError::ShapeMismatch(_, _))
        ));
    }

    #[test]
    fn test_iteration_cap_is_degraded_not_error() -> Result<(), MorphologyError> {
        let mask = img("######");
        let marker = img("#.....");

        for method in [ReconstructionMethod::Iterative, ReconstructionMethod::Queue] {
            let capped = reconstruct_with(
                &marker,
                &mask,
                ReconstructionMode::Dilation,
                &params(method, Some(2)),
            )?;
            assert_eq!(capped.image, img("###..."));
            assert_eq!(capped.num_iterations, 2);
            assert!(!capped.converged);

            let zero = reconstruct_with(
                &marker,
                &mask,
                ReconstructionMode::Dilation,
                &params(method, Some(0)),
            )?;
            assert_eq!(zero.image, marker);
            assert!(!zero.converged);

            let full = reconstruct_with(
                &marker,
                &mask,
                ReconstructionMode::Dilation,
                &params(method, Some(5)),
            )?;
            assert_eq!(full.image, mask);
            assert_eq!(full.num_iterations, 5);
            assert!(full.converged);
        }
        Ok(())
    }

    #[test]
    fn test_geodesic_steps() -> Result<(), MorphologyError> {
        let element = StructuringElement::default();
        let mask = img("
            ####.
            ....#
        ");
        let marker = img("
            #....
            .....
        ");
        assert_eq!(
            geodesic_dilate(&marker, &mask, &element)?,
            img("
                ##...
                .....
            ")
        );

        // the foreground padding keeps background from entering at the border
        let marker = img("
            #####
            ##.##
        ");
        let mask = img("
            .....
            .....
        ");
        assert_eq!(
            geodesic_erode(&marker, &mask, &element)?,
            img("
                #...#
                #...#
            ")
        );
        Ok(())
    }
}
