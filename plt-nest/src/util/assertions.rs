use float_cmp::approx_eq;
use itertools::Itertools;
use log::error;

use crate::entities::{NestingPiece, NestingResult};
use crate::geometry::geo_traits::{CollidesWith, Shape};

//Various checks to verify the state of a layout
//Used in debug_assert!() blocks

pub fn placements_are_disjoint(placed: &[NestingPiece]) -> bool {
    for (a, b) in placed.iter().tuple_combinations() {
        if a.bbox().collides_with(&b.bbox()) {
            error!("{} ({}) overlaps {} ({})", a.id, a.name, b.id, b.name);
            return false;
        }
    }
    true
}

pub fn placements_within_fabric(placed: &[NestingPiece], fabric_width: f64) -> bool {
    placed.iter().all(|p| {
        let bbox = p.bbox();
        let inside = bbox.min_x() >= 0.0 && bbox.min_y() >= 0.0 && bbox.max_x() <= fabric_width;
        if !inside {
            error!("{} ({}) lies outside the fabric: {:?}", p.id, p.name, bbox);
        }
        inside
    })
}

/// Local outline of a placed piece must start at the origin and match its bounds.
pub fn bounds_are_consistent(piece: &NestingPiece) -> bool {
    let bounds = crate::geometry::compute_bounds(piece.points());
    approx_eq!(f64, bounds.min_x(), piece.bounds().min_x())
        && approx_eq!(f64, bounds.min_y(), piece.bounds().min_y())
        && approx_eq!(f64, bounds.max_x(), piece.bounds().max_x())
        && approx_eq!(f64, bounds.max_y(), piece.bounds().max_y())
        && approx_eq!(f64, piece.bounds().min_x(), 0.0)
        && approx_eq!(f64, piece.bounds().min_y(), 0.0)
}

pub fn result_is_consistent(result: &NestingResult) -> bool {
    let NestingResult {
        pieces,
        efficiency,
        fabric_length,
        bounds,
        unplaced: _,
    } = result;

    let max_top = pieces.iter().map(|p| p.top()).fold(0.0, f64::max);

    placements_are_disjoint(pieces)
        && placements_within_fabric(pieces, bounds.width)
        && pieces.iter().all(bounds_are_consistent)
        && approx_eq!(f64, *fabric_length, max_top)
        && approx_eq!(f64, bounds.height, *fabric_length)
        && (0.0..=100.0 + 1e-9).contains(efficiency)
}
