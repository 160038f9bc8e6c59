pub mod geo_traits;
pub mod primitives;
mod rotation;

#[doc(inline)]
pub use rotation::Rotation;
#[doc(inline)]
pub use rotation::rotate;

use crate::geometry::primitives::{Bounds, Point};

/// Computes the axis-aligned bounds of `points`.
/// An empty slice yields a degenerate bound at the origin.
pub fn compute_bounds(points: &[Point]) -> Bounds {
    Bounds::from_points(points)
}

/// Translates `points` so that the minimum corner of their bounds lands on the origin.
pub fn translate_to_origin(points: &[Point]) -> (Vec<Point>, Bounds) {
    let bounds = Bounds::from_points(points);
    let (dx, dy) = (-bounds.min_x(), -bounds.min_y());
    let moved = points.iter().map(|p| p.translate(dx, dy)).collect();
    (moved, bounds.translate(dx, dy))
}
