use log::trace;

use crate::entities::NestingPiece;
use crate::geometry::Rotation;
use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::{Bounds, Point};
use crate::util::NestingConfig;

/// Position and rotation selected for a piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub rotation: Rotation,
    pub position: Point,
    /// Y-coordinate of the top edge of the piece once placed
    pub top: f64,
}

/// Step of the placement grid for a piece with (oriented) `bounds`.
pub fn grid_step(bounds: &Bounds, config: &NestingConfig) -> f64 {
    match config.grid_step {
        Some(step) => step,
        None => {
            let half_min_dim = f64::min(bounds.width(), bounds.height()) / 2.0;
            f64::max(half_min_dim, config.min_grid_step)
        }
    }
}

/// Whether `bbox` overlaps the bounding box of any placed piece.
pub fn collides_with_placed(bbox: &Bounds, placed: &[NestingPiece]) -> bool {
    placed.iter().any(|p| bbox.collides_with(&p.bbox()))
}

/// Search the strip for the position with the lowest top edge, across all four rotations.
///
/// For every rotation, columns `x = 0, step, 2·step, ...` are scanned. In each column, rows
/// `y = 0, step, ...` are tried from the bottom up, as long as the piece would end strictly below
/// the best top edge found so far. The first collision-free row of a column is its candidate.
/// Ties keep the earliest candidate (rotation order first, then column order).
///
/// Returns `None` if the piece does not fit the strip width under any rotation.
pub fn search(
    piece: &NestingPiece,
    placed: &[NestingPiece],
    fabric_width: f64,
    config: &NestingConfig,
) -> Option<Placement> {
    let mut best: Option<Placement> = None;

    for rotation in Rotation::ALL {
        let (_, bounds) = piece.oriented(rotation);
        let (width, height) = (bounds.width(), bounds.height());
        if width > fabric_width {
            trace!("[NEST] {} does not fit the strip at {rotation}", piece.id);
            continue;
        }
        let step = grid_step(&bounds, config);

        let mut x = 0.0;
        while x < fabric_width && x + width <= fabric_width {
            let mut y = 0.0;
            while y + height < best.map_or(f64::INFINITY, |b| b.top) {
                let candidate = bounds.translate(x, y);
                if !collides_with_placed(&candidate, placed) {
                    best = Some(Placement {
                        rotation,
                        position: Point(x, y),
                        top: y + height,
                    });
                    break;
                }
                y += step;
            }
            x += step;
        }
    }
    best
}
