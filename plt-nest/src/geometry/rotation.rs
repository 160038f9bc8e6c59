use std::fmt::Display;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::{Bounds, Point};

/// Quarter-turn rotations allowed during nesting, counter-clockwise.
/// Serialized as the number of degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations, in the order they are tried during nesting.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Normalizes any multiple of 90 (negative included) into a [`Rotation`].
    pub fn from_degrees(degrees: i32) -> Option<Rotation> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = anyhow::Error;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match Rotation::from_degrees(i32::from(degrees)) {
            Some(r) if degrees < 360 => Ok(r),
            _ => bail!("unsupported rotation: {degrees}°, expected one of 0, 90, 180, 270"),
        }
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotates `points` about the center of their bounding box.
///
/// Quarter turns are applied as exact coordinate swaps (no trigonometry),
/// so [`Rotation::Deg0`] is the identity and four [`Rotation::Deg90`] turns restore the original bounds.
/// Returns the new points together with their recomputed bounds.
pub fn rotate(points: &[Point], rotation: Rotation) -> (Vec<Point>, Bounds) {
    let center = Bounds::from_points(points).centroid();
    let rotated: Vec<Point> = points
        .iter()
        .map(|p| {
            let (dx, dy) = (p.x() - center.x(), p.y() - center.y());
            let (rx, ry) = match rotation {
                Rotation::Deg0 => (dx, dy),
                Rotation::Deg90 => (-dy, dx),
                Rotation::Deg180 => (-dx, -dy),
                Rotation::Deg270 => (dy, -dx),
            };
            Point(rx + center.x(), ry + center.y())
        })
        .collect();
    let bounds = Bounds::from_points(&rotated);
    (rotated, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::FPA;
    use test_case::test_case;

    fn l_shape() -> Vec<Point> {
        vec![
            Point(10.0, 20.0),
            Point(70.0, 20.0),
            Point(70.0, 35.0),
            Point(25.0, 35.0),
            Point(25.0, 120.0),
            Point(10.0, 120.0),
        ]
    }

    #[test]
    fn zero_rotation_is_identity() {
        let pts = l_shape();
        let (rotated, bounds) = rotate(&pts, Rotation::Deg0);
        assert_eq!(rotated, pts);
        assert_eq!(bounds, Bounds::from_points(&pts));
    }

    #[test]
    fn four_quarter_turns_restore_bounds() {
        let pts = l_shape();
        let original = Bounds::from_points(&pts);
        let mut current = pts.clone();
        for _ in 0..4 {
            current = rotate(&current, Rotation::Deg90).0;
        }
        let restored = Bounds::from_points(&current);
        assert_eq!(FPA(restored.min_x()), FPA(original.min_x()));
        assert_eq!(FPA(restored.min_y()), FPA(original.min_y()));
        assert_eq!(FPA(restored.max_x()), FPA(original.max_x()));
        assert_eq!(FPA(restored.max_y()), FPA(original.max_y()));
        for (a, b) in current.iter().zip(pts.iter()) {
            assert_eq!(FPA(a.x()), FPA(b.x()));
            assert_eq!(FPA(a.y()), FPA(b.y()));
        }
    }

    #[test_case(Rotation::Deg90; "counter-clockwise quarter")]
    #[test_case(Rotation::Deg270; "clockwise quarter")]
    fn quarter_turn_swaps_dimensions_around_center(rotation: Rotation) {
        let pts = l_shape();
        let original = Bounds::from_points(&pts);
        let (_, bounds) = rotate(&pts, rotation);
        assert_eq!(FPA(bounds.width()), FPA(original.height()));
        assert_eq!(FPA(bounds.height()), FPA(original.width()));
        assert_eq!(FPA(bounds.centroid().x()), FPA(original.centroid().x()));
        assert_eq!(FPA(bounds.centroid().y()), FPA(original.centroid().y()));
    }

    #[test]
    fn half_turn_mirrors_points_through_center() {
        let (rotated, bounds) = rotate(&[Point(0.0, 0.0), Point(4.0, 2.0)], Rotation::Deg180);
        assert_eq!(rotated, vec![Point(4.0, 2.0), Point(0.0, 0.0)]);
        assert_eq!((bounds.width(), bounds.height()), (4.0, 2.0));
    }

    #[test]
    fn rotating_nothing_yields_nothing() {
        let (rotated, bounds) = rotate(&[], Rotation::Deg90);
        assert!(rotated.is_empty());
        assert_eq!(bounds, Bounds::degenerate());
    }

    #[test_case(0, Some(Rotation::Deg0); "zero")]
    #[test_case(450, Some(Rotation::Deg90); "full turn plus quarter")]
    #[test_case(-90, Some(Rotation::Deg270); "negative quarter")]
    #[test_case(45, None; "not a quarter turn")]
    fn degrees_are_normalized(degrees: i32, expected: Option<Rotation>) {
        assert_eq!(Rotation::from_degrees(degrees), expected);
    }

    #[test]
    fn serializes_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
        let r: Rotation = serde_json::from_str("180").unwrap();
        assert_eq!(r, Rotation::Deg180);
        assert!(serde_json::from_str::<Rotation>("45").is_err());
        assert!(serde_json::from_str::<Rotation>("450").is_err());
    }
}
