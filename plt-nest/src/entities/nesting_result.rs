use serde::Serialize;

use crate::entities::NestingPiece;
use crate::geometry::geo_traits::Shape;

/// Outcome of one nesting run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestingResult {
    /// Placed pieces, in placement order
    pub pieces: Vec<NestingPiece>,
    /// Bounding-box area of the placed pieces as a percentage of the used fabric area.
    /// Empty space inside a piece's own bounding box counts as used,
    /// so irregular pieces report more than the true material utilization.
    pub efficiency: f64,
    /// Extent of the layout along the roll, in plotter units
    pub fabric_length: f64,
    pub bounds: StripBounds,
    /// Ids of the pieces for which no valid position was found
    pub unplaced: Vec<String>,
}

/// Dimensions of the used part of the fabric strip
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StripBounds {
    pub width: f64,
    pub height: f64,
}

impl NestingResult {
    /// Computes length and efficiency of a finished layout on a strip of `fabric_width`.
    pub fn from_placements(fabric_width: f64, pieces: Vec<NestingPiece>, unplaced: Vec<String>) -> Self {
        let fabric_length = pieces.iter().map(|p| p.top()).fold(0.0, f64::max);
        let used_area: f64 = pieces.iter().map(|p| p.bbox_area()).sum();
        let total_area = fabric_width * fabric_length;
        let efficiency = match total_area > 0.0 {
            true => 100.0 * used_area / total_area,
            false => 0.0,
        };
        Self {
            pieces,
            efficiency,
            fabric_length,
            bounds: StripBounds {
                width: fabric_width,
                height: fabric_length,
            },
            unplaced,
        }
    }

    pub fn n_placed(&self) -> usize {
        self.pieces.len()
    }

    /// Fabric length converted to meters
    pub fn fabric_length_m(&self) -> f64 {
        crate::plotter_units_to_meters(self.fabric_length)
    }
}
