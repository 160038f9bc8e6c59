use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;
use anyhow::Result;
use anyhow::ensure;
use serde::Serialize;

/// Axis-aligned bounding box.
///
/// Always derived from a point set or from validated extents, so that
/// `min <= max` holds on both axes and `width`/`height` match the extents exactly.
#[derive(Clone, Debug, PartialEq, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    pub fn try_new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        ensure!(
            min_x <= max_x && min_y <= max_y,
            "invalid bounds, min_x: {min_x}, max_x: {max_x}, min_y: {min_y}, max_y: {max_y}"
        );
        Ok(Self::from_extents(min_x, min_y, max_x, max_y))
    }

    fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Zero-area bounds located at the origin.
    pub fn degenerate() -> Self {
        Self::from_extents(0.0, 0.0, 0.0, 0.0)
    }

    /// Smallest bounds enclosing all `points`, computed in a single pass.
    /// Returns [`Bounds::degenerate`] for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::degenerate();
        };
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (first.x(), first.y());
        for p in &points[1..] {
            min_x = f64::min(min_x, p.x());
            min_y = f64::min(min_y, p.y());
            max_x = f64::max(max_x, p.x());
            max_y = f64::max(max_y, p.y());
        }
        Self::from_extents(min_x, min_y, max_x, max_y)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns a copy of `self` shifted by `dx` and `dy`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::from_extents(
            self.min_x + dx,
            self.min_y + dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }
}

impl CollidesWith<Bounds> for Bounds {
    /// Strict overlap on both axes. Rectangles sharing only an edge or a corner do not collide.
    #[inline(always)]
    fn collides_with(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn empty_point_set_is_degenerate() {
        let b = Bounds::from_points(&[]);
        assert_eq!(b, Bounds::degenerate());
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn single_point_has_zero_extent() {
        let b = Bounds::from_points(&[Point(-3.5, 7.0)]);
        assert_eq!((b.min_x(), b.max_x()), (-3.5, -3.5));
        assert_eq!((b.min_y(), b.max_y()), (7.0, 7.0));
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn extents_and_dimensions_agree() {
        let pts = [Point(10.0, -5.0), Point(-2.0, 4.0), Point(3.0, 12.5)];
        let b = Bounds::from_points(&pts);
        assert!(b.min_x() <= b.max_x() && b.min_y() <= b.max_y());
        assert_eq!(b.width(), b.max_x() - b.min_x());
        assert_eq!(b.height(), b.max_y() - b.min_y());
        assert_eq!((b.width(), b.height()), (12.0, 17.5));
    }

    #[test]
    fn try_new_rejects_inverted_extents() {
        assert!(Bounds::try_new(5.0, 0.0, 1.0, 1.0).is_err());
        assert!(Bounds::try_new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test_case((0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 15.0, 15.0), true; "partial overlap")]
    #[test_case((0.0, 0.0, 10.0, 10.0), (2.0, 2.0, 4.0, 4.0), true; "enclosed")]
    #[test_case((0.0, 0.0, 10.0, 10.0), (10.0, 0.0, 20.0, 10.0), false; "shared vertical edge")]
    #[test_case((0.0, 0.0, 10.0, 10.0), (0.0, 10.0, 10.0, 20.0), false; "shared horizontal edge")]
    #[test_case((0.0, 0.0, 10.0, 10.0), (10.0, 10.0, 20.0, 20.0), false; "shared corner")]
    #[test_case((0.0, 0.0, 10.0, 10.0), (5.0, 20.0, 8.0, 30.0), false; "overlap on one axis only")]
    fn collision(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64), expected: bool) {
        let a = Bounds::try_new(a.0, a.1, a.2, a.3).unwrap();
        let b = Bounds::try_new(b.0, b.1, b.2, b.3).unwrap();
        assert_eq!(a.collides_with(&b), expected);
        assert_eq!(b.collides_with(&a), expected);
    }

    #[test]
    fn translate_preserves_dimensions() {
        let b = Bounds::try_new(1.0, 2.0, 4.0, 8.0).unwrap().translate(10.0, -2.0);
        assert_eq!((b.min_x(), b.min_y()), (11.0, 0.0));
        assert_eq!((b.width(), b.height()), (3.0, 6.0));
    }
}
