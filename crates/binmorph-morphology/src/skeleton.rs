use binmorph_image::BinaryImage;

use crate::error::MorphologyError;
use crate::parallel::{ExecutionStrategy, RowExecutor};

/// The 8-neighborhood walked clockwise from north: N, NE, E, SE, S, SW, W, NW.
const RING: [[isize; 2]; 8] = [
    [-1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
    [1, 0],
    [1, -1],
    [0, -1],
    [-1, -1],
];

/// Sub-pass directions in order: north, south, east, west.
const DIRECTIONS: [[isize; 2]; 4] = [[-1, 0], [1, 0], [0, 1], [0, -1]];

/// Parameters of the thinning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkeletonParams {
    /// Stop after this many thinning passes even if pixels could still be removed.
    pub max_passes: Option<usize>,
    /// How the candidate scan of every sub-pass runs over the rows.
    pub strategy: ExecutionStrategy,
}

/// Result of the thinning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonResult {
    /// The thinned image.
    pub image: BinaryImage,
    /// Number of passes that removed at least one pixel.
    pub num_passes: usize,
    /// Whether no pixel of `image` is deletable any more.
    pub converged: bool,
}

#[inline]
fn is_foreground(image: &BinaryImage, row: isize, col: isize) -> bool {
    image.get_signed(row, col).unwrap_or(false)
}

/// A foreground pixel is simple and not an end point.
///
/// It has between 2 and 6 foreground neighbors and exactly one background to foreground
/// transition around its ring, so removing it keeps the 8-connected components and the
/// 4-connected holes unchanged.
fn is_deletable(image: &BinaryImage, row: usize, col: usize) -> bool {
    let (row, col) = (row as isize, col as isize);
    let ring = RING.map(|[dr, dc]| is_foreground(image, row + dr, col + dc));
    let neighbors = ring.iter().filter(|&&v| v).count();
    let transitions = (0..ring.len())
        .filter(|&i| !ring[i] && ring[(i + 1) % ring.len()])
        .count();
    (2..=6).contains(&neighbors) && transitions == 1
}

fn has_deletable(image: &BinaryImage) -> bool {
    image
        .foreground()
        .any(|[row, col]| is_deletable(image, row, col))
}

/// Remove the deletable pixels exposed in `direction`. Returns the number removed.
///
/// Candidates are flagged on a snapshot row by row through `executor`, then removed in
/// raster order after checking again against the partially thinned image, so two pixels
/// that are only deletable one at a time never both disappear.
fn thin_direction(
    image: &mut BinaryImage,
    direction: [isize; 2],
    executor: &RowExecutor,
    candidates: &mut [bool],
) -> usize {
    let width = image.width();
    let [dr, dc] = direction;

    let snapshot = &*image;
    executor.run(candidates, width, |row, chunk| {
        for (col, flag) in chunk.iter_mut().enumerate() {
            *flag = snapshot[[row, col]]
                && !is_foreground(snapshot, row as isize + dr, col as isize + dc)
                && is_deletable(snapshot, row, col);
        }
    });

    let mut removed = 0;
    for (idx, &candidate) in candidates.iter().enumerate() {
        let (row, col) = (idx / width, idx % width);
        if candidate && is_deletable(image, row, col) {
            image[[row, col]] = false;
            removed += 1;
        }
    }
    removed
}

/// Thin the foreground to a one pixel wide skeleton.
///
/// See [`skeletonize_with`].
///
/// # Example
///
/// ```
/// use binmorph_image::BinaryImage;
/// use binmorph_morphology::skeletonize;
///
/// let bar: BinaryImage = "
///     .......
///     .#####.
///     .#####.
///     .#####.
///     .......
/// "
/// .parse()
/// .unwrap();
///
/// let skeleton = skeletonize(&bar);
/// assert_eq!(skeleton.to_string(), ".......\n.......\n.#####.\n.......\n.......");
/// ```
pub fn skeletonize(src: &BinaryImage) -> BinaryImage {
    thin(src, None, &RowExecutor::Global).image
}

/// Thin the foreground by repeated directional peeling until nothing changes.
///
/// Every pass peels the north, south, east and west borders in turn. A pixel is only
/// removed if it is simple, i.e. its removal keeps the number of 8-connected foreground
/// components and of 4-connected holes, and if it is not the end of a line. The result
/// is thin, contained in `src` and a fixed point of the thinning.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `params` - The pass limit and the execution strategy.
///
/// # Returns
///
/// The skeleton with the number of effective passes. If `max_passes` stopped the
/// thinning while pixels were still deletable, `converged` is `false`.
///
/// # Errors
///
/// Returns [`MorphologyError::Parallel`] if the thread pool of
/// [`ExecutionStrategy::Fixed`] cannot be built.
pub fn skeletonize_with(
    src: &BinaryImage,
    params: &SkeletonParams,
) -> Result<SkeletonResult, MorphologyError> {
    let executor = RowExecutor::new(params.strategy)?;
    Ok(thin(src, params.max_passes, &executor))
}

fn thin(
    src: &BinaryImage,
    max_passes: Option<usize>,
    executor: &RowExecutor,
) -> SkeletonResult {
    let mut image = src.clone();
    let mut candidates = vec![false; image.size().area()];
    let mut num_passes = 0;

    let converged = loop {
        if max_passes.is_some_and(|max| num_passes >= max) {
            break !has_deletable(&image);
        }

        let mut removed = 0;
        for direction in DIRECTIONS {
            removed += thin_direction(&mut image, direction, executor, &mut candidates);
        }
        if removed == 0 {
            break true;
        }

        num_passes += 1;
        log::debug!("thinning pass {}: removed {} pixels", num_passes, removed);
    };

    if !converged {
        log::warn!(
            "thinning stopped after {} passes with deletable pixels left",
            num_passes
        );
    }

    SkeletonResult {
        image,
        num_passes,
        converged,
    }
}
