use binmorph_image::BinaryImage;

use crate::error::MorphologyError;
use crate::parallel::{ExecutionStrategy, RowExecutor};

/// A lattice point as `(x, y)`, i.e. `(col, row)`.
type Point = (i64, i64);

/// z component of `(a - o) x (b - o)`, positive when `o, a, b` turn counter-clockwise.
fn cross(o: Point, a: Point, b: Point) -> i64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Monotone chain over the sorted, deduplicated points.
///
/// Collinear points are dropped, so a degenerate set yields at most two vertices.
fn monotone_chain(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut lower: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn hull_of(src: &BinaryImage) -> Vec<Point> {
    let mut points = src
        .foreground()
        .map(|[row, col]| (col as i64, row as i64))
        .collect::<Vec<_>>();
    points.sort_unstable();
    points.dedup();
    monotone_chain(&points)
}

/// Whether the lattice point `p` lies in the closed hull.
fn contains(hull: &[Point], p: Point) -> bool {
    match hull {
        [] => false,
        [a] => *a == p,
        [a, b] => {
            cross(*a, *b, p) == 0
                && p.0 >= a.0.min(b.0)
                && p.0 <= a.0.max(b.0)
                && p.1 >= a.1.min(b.1)
                && p.1 <= a.1.max(b.1)
        }
        _ => (0..hull.len()).all(|i| cross(hull[i], hull[(i + 1) % hull.len()], p) >= 0),
    }
}

/// Vertices of the convex hull of the foreground pixel centers, as `[row, col]`.
///
/// The vertices are listed counter-clockwise in `(col, row)` coordinates, starting from
/// the foreground pixel with the smallest column (and smallest row among those).
/// Collinear points are not vertices, so a set of aligned pixels yields its two end
/// points and an empty image yields no vertex.
pub fn convex_hull_vertices(src: &BinaryImage) -> Vec<[usize; 2]> {
    hull_of(src)
        .into_iter()
        .map(|(x, y)| [y as usize, x as usize])
        .collect()
}

/// Compute the convex hull image of the foreground.
///
/// A pixel is foreground in the output iff its center lies inside or on the boundary of
/// the convex polygon spanned by the centers of the foreground pixels. The output always
/// contains `src`. Three or more aligned pixels are joined by the lattice points of
/// their segment, while fewer than three foreground pixels are returned unchanged.
///
/// Rows are rasterized on the global thread pool, see [`convex_hull_with`] to choose the
/// execution strategy.
///
/// # Arguments
///
/// * `src` - The source image.
///
/// # Returns
///
/// The filled convex hull, or a copy of `src` if it has fewer than three foreground
/// pixels.
///
/// # Example
///
/// ```
/// use binmorph_image::BinaryImage;
/// use binmorph_morphology::convex_hull;
///
/// let corners: BinaryImage = "#..#\n....\n#...".parse().unwrap();
/// assert_eq!(convex_hull(&corners).to_string(), "####\n##..\n#...");
/// ```
pub fn convex_hull(src: &BinaryImage) -> BinaryImage {
    rasterize(src, &RowExecutor::Global)
}

/// Compute the convex hull image of the foreground with an explicit execution strategy.
///
/// # Errors
///
/// Returns [`MorphologyError::Parallel`] if the thread pool of
/// [`ExecutionStrategy::Fixed`] cannot be built.
pub fn convex_hull_with(
    src: &BinaryImage,
    strategy: ExecutionStrategy,
) -> Result<BinaryImage, MorphologyError> {
    Ok(rasterize(src, &RowExecutor::new(strategy)?))
}

fn rasterize(src: &BinaryImage, executor: &RowExecutor) -> BinaryImage {
    let hull = hull_of(src);
    log::debug!("convex hull with {} vertices", hull.len());

    let mut dst = src.clone();
    if src.count_foreground() < 3 {
        return dst;
    }

    let (mut x_min, mut x_max) = (i64::MAX, i64::MIN);
    let (mut y_min, mut y_max) = (i64::MAX, i64::MIN);
    for &(x, y) in &hull {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    executor.run(dst.as_slice_mut(), src.width(), |row, chunk| {
        let y = row as i64;
        if y < y_min || y > y_max {
            chunk.fill(false);
            return;
        }
        for (col, px) in chunk.iter_mut().enumerate() {
            let x = col as i64;
            *px = x >= x_min && x <= x_max && contains(&hull, (x, y));
        }
    });

    dst
}
