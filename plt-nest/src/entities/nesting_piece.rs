use serde::{Deserialize, Serialize};

use crate::entities::{PenCommand, Piece};
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Bounds, Point};
use crate::geometry::{Rotation, rotate, translate_to_origin};

/// Size classification driving the processing order: large pieces are placed before small ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Large,
    Small,
}

impl SizeClass {
    /// `Large` if either dimension of `bounds` exceeds `threshold`.
    pub fn classify(bounds: &Bounds, threshold: f64) -> SizeClass {
        if bounds.width() > threshold || bounds.height() > threshold {
            SizeClass::Large
        } else {
            SizeClass::Small
        }
    }
}

/// A [`Piece`] prepared for nesting.
///
/// Before placement, `points` and `bounds` are those of the decoded piece.
/// [`NestingPiece::place`] replaces them by the rotated outline, translated so its bounds start at the origin,
/// and sets `position` to where that origin lands on the fabric.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestingPiece {
    pub id: String,
    pub name: String,
    pub rotation: Rotation,
    pub position: Point,
    #[serde(rename = "type")]
    pub size_class: SizeClass,
    points: Vec<Point>,
    pub commands: Vec<PenCommand>,
    bounds: Bounds,
}

impl NestingPiece {
    pub fn from_piece(index: usize, piece: &Piece, size_threshold: f64) -> Self {
        Self {
            id: format!("piece-{index}"),
            name: piece.name.clone(),
            rotation: Rotation::Deg0,
            position: Point(0.0, 0.0),
            size_class: SizeClass::classify(&piece.bounds(), size_threshold),
            points: piece.points().to_vec(),
            commands: piece.commands().to_vec(),
            bounds: piece.bounds(),
        }
    }

    /// Outline in local coordinates
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounds of the local outline
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Outline under `rotation`, translated so that its bounds start at the origin.
    pub fn oriented(&self, rotation: Rotation) -> (Vec<Point>, Bounds) {
        let (rotated, _) = rotate(&self.points, rotation);
        translate_to_origin(&rotated)
    }

    /// Consumes the unplaced piece and returns it placed at `position` with `rotation`.
    pub fn place(self, rotation: Rotation, position: Point) -> NestingPiece {
        let (points, bounds) = self.oriented(rotation);
        NestingPiece {
            rotation,
            position,
            points,
            bounds,
            ..self
        }
    }

    /// Bounding box on the fabric: the local bounds translated by `position`.
    pub fn absolute_bbox(&self) -> Bounds {
        self.bounds.translate(self.position.x(), self.position.y())
    }

    /// Outline in fabric coordinates.
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        let Point(dx, dy) = self.position;
        self.points.iter().map(move |p| p.translate(dx, dy))
    }

    /// Y-coordinate of the top edge on the fabric.
    pub fn top(&self) -> f64 {
        self.absolute_bbox().max_y()
    }
}

impl Shape for NestingPiece {
    fn bbox(&self) -> Bounds {
        self.absolute_bbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PenCommand::*;
    use test_case::test_case;

    fn rect_piece(w: f64, h: f64) -> Piece {
        Piece::new(
            "RECT",
            vec![
                Point(100.0, 200.0),
                Point(100.0 + w, 200.0),
                Point(100.0 + w, 200.0 + h),
                Point(100.0, 200.0 + h),
            ],
            vec![PenUp, PenDown, PenDown, PenDown],
        )
    }

    #[test_case(60.0, 10.0, SizeClass::Large; "wide")]
    #[test_case(10.0, 60.0, SizeClass::Large; "tall")]
    #[test_case(50.0, 50.0, SizeClass::Small; "at threshold")]
    #[test_case(0.0, 0.0, SizeClass::Small; "degenerate")]
    fn classification(w: f64, h: f64, expected: SizeClass) {
        let np = NestingPiece::from_piece(0, &rect_piece(w, h), 50.0);
        assert_eq!(np.size_class, expected);
    }

    #[test]
    fn placement_normalizes_outline() {
        let np = NestingPiece::from_piece(3, &rect_piece(40.0, 10.0), 50.0);
        assert_eq!(np.id, "piece-3");
        let placed = np.place(Rotation::Deg90, Point(7.0, 11.0));
        assert_eq!(placed.bounds().min_x(), 0.0);
        assert_eq!(placed.bounds().min_y(), 0.0);
        assert_eq!((placed.bounds().width(), placed.bounds().height()), (10.0, 40.0));

        let abs = placed.absolute_bbox();
        assert_eq!((abs.min_x(), abs.min_y()), (7.0, 11.0));
        assert_eq!((abs.max_x(), abs.max_y()), (17.0, 51.0));
        assert_eq!(placed.top(), 51.0);
        assert!(
            placed
                .absolute_points()
                .all(|p| p.x() >= 7.0 && p.x() <= 17.0 && p.y() >= 11.0 && p.y() <= 51.0)
        );
    }

    #[test]
    fn outline_is_read_through_accessors() {
        let piece = rect_piece(40.0, 10.0);
        let np = NestingPiece::from_piece(0, &piece, 50.0);
        assert_eq!(np.points(), piece.points());
        assert_eq!(np.bounds(), piece.bounds());

        let placed = np.place(Rotation::Deg0, Point(5.0, 5.0));
        assert_eq!(placed.points()[0], Point(0.0, 0.0));
        assert_eq!(placed.bbox(), placed.absolute_bbox());
        assert_eq!(placed.bbox_area(), 400.0);
    }
}
