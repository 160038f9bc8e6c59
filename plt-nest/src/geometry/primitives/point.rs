use serde::{Deserialize, Serialize};

/// Geometric primitive representing a point, in plotter units
#[derive(Debug, Clone, PartialEq, Copy, Default, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    #[inline(always)]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline(always)]
    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point(self.0 + dx, self.1 + dy)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.sq_distance(other).sqrt()
    }

    pub fn sq_distance(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }

    /// Largest per-axis difference between two points.
    pub fn chebyshev_distance(&self, other: &Point) -> f64 {
        f64::max((self.0 - other.0).abs(), (self.1 - other.1).abs())
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}
