use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, ensure};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

use crate::entities::{NestingPiece, NestingResult, Piece, SizeClass};
use crate::geometry::geo_traits::Shape;
use crate::nesting::search::search;
use crate::report::{LogSink, Reporter};
use crate::util::NestingConfig;
use crate::util::assertions;

/// Greedy bounding-box nesting of pieces on a strip of fixed width.
///
/// Pieces are placed one at a time, largest first, each at the lowest free position found on a grid.
/// A placement is final: there is no backtracking.
pub struct NestingEngine {
    fabric_width: f64,
    pieces: Vec<NestingPiece>,
    config: NestingConfig,
    sink: Arc<dyn LogSink>,
}

impl NestingEngine {
    /// Prepares a run. Fails if there is nothing to nest or if the fabric width is not a positive number.
    pub fn new(
        fabric_width: f64,
        pieces: &[Piece],
        config: NestingConfig,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self> {
        ensure!(
            !pieces.is_empty(),
            "no pieces available for nesting, load and decode a plotter file first"
        );
        ensure!(
            fabric_width > 0.0 && fabric_width.is_finite(),
            "fabric width must be a positive number, got {fabric_width}"
        );
        config.validate()?;

        let pieces = pieces
            .iter()
            .enumerate()
            .map(|(i, p)| NestingPiece::from_piece(i, p, config.size_threshold))
            .collect();

        Ok(Self {
            fabric_width,
            pieces,
            config,
            sink,
        })
    }

    /// Places the large pieces, then the small ones, each group in order of decreasing bounding-box area.
    ///
    /// Yields to the async scheduler after every `config.batch_size` pieces.
    /// Pieces without any valid position are left out of the layout and reported with a warning.
    pub async fn perform_nesting(&self) -> NestingResult {
        let reporter = Reporter::new(self.sink.as_ref(), "[NEST]");
        let start = Instant::now();
        reporter.info(format!(
            "starting nesting of {} pieces on a fabric width of {:.1}",
            self.pieces.len(),
            self.fabric_width
        ));

        let (large, small): (Vec<NestingPiece>, Vec<NestingPiece>) = self
            .pieces
            .iter()
            .cloned()
            .sorted_by_key(|p| Reverse(OrderedFloat(p.bbox_area())))
            .partition(|p| p.size_class == SizeClass::Large);

        let mut placed: Vec<NestingPiece> = Vec::with_capacity(self.pieces.len());
        let mut unplaced: Vec<String> = vec![];

        for (label, group) in [("large", large), ("small", small)] {
            reporter.info(format!("processing {} {label} pieces", group.len()));
            let mut group = group.into_iter().peekable();
            while group.peek().is_some() {
                for piece in group.by_ref().take(self.config.batch_size) {
                    self.place_piece(piece, &mut placed, &mut unplaced, &reporter);
                }
                tokio::task::yield_now().await;
            }
        }

        let result = NestingResult::from_placements(self.fabric_width, placed, unplaced);
        debug_assert!(assertions::result_is_consistent(&result));

        reporter.success(format!(
            "nesting finished in {:.3}ms with {:.2}% efficiency, fabric length {:.1} ({} placed, {} unplaced)",
            start.elapsed().as_secs_f64() * 1000.0,
            result.efficiency,
            result.fabric_length,
            result.pieces.len(),
            result.unplaced.len()
        ));
        result
    }

    /// Searches a position for `piece` against the current layout and commits it, or records it as unplaced.
    fn place_piece(
        &self,
        piece: NestingPiece,
        placed: &mut Vec<NestingPiece>,
        unplaced: &mut Vec<String>,
        reporter: &Reporter,
    ) {
        match search(&piece, placed, self.fabric_width, &self.config) {
            Some(p) => {
                let placed_piece = piece.place(p.rotation, p.position);
                reporter.info(format!(
                    "placed {} ({}) {}/{} at ({:.1}, {:.1}) rotated {}",
                    placed_piece.id,
                    placed_piece.name,
                    placed.len() + 1,
                    self.pieces.len(),
                    p.position.x(),
                    p.position.y(),
                    p.rotation
                ));
                placed.push(placed_piece);
                debug_assert!(assertions::placements_are_disjoint(placed));
            }
            None => {
                reporter.warning(format!(
                    "no valid position for {} ({}, {:.1}x{:.1}), skipping it",
                    piece.id,
                    piece.name,
                    piece.bounds().width(),
                    piece.bounds().height()
                ));
                unplaced.push(piece.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PenCommand::*;
    use crate::geometry::primitives::Point;
    use crate::report::{MemorySink, NoSink, Severity};
    use float_cmp::approx_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn rect(name: &str, w: f64, h: f64) -> Piece {
        Piece::new(
            name,
            vec![
                Point(0.0, 0.0),
                Point(w, 0.0),
                Point(w, h),
                Point(0.0, h),
                Point(0.0, 0.0),
            ],
            vec![PenUp, PenDown, PenDown, PenDown, PenDown],
        )
    }

    fn engine(width: f64, pieces: &[Piece], config: NestingConfig) -> NestingEngine {
        NestingEngine::new(width, pieces, config, Arc::new(NoSink)).unwrap()
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = NestingEngine::new(150.0, &[], NestingConfig::default(), Arc::new(NoSink));
        assert!(err.is_err());
        assert!(format!("{:#}", err.err().unwrap()).contains("no pieces"));
    }

    #[test]
    fn invalid_width_is_rejected() {
        let pieces = [rect("A", 10.0, 10.0)];
        for width in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let config = NestingConfig::default();
            assert!(NestingEngine::new(width, &pieces, config, Arc::new(NoSink)).is_err());
        }
    }

    #[tokio::test]
    async fn squares_are_stacked_on_narrow_fabric() {
        let pieces = [rect("A", 100.0, 100.0), rect("B", 100.0, 100.0)];
        let result = engine(150.0, &pieces, NestingConfig::default())
            .perform_nesting()
            .await;

        assert_eq!(result.pieces.len(), 2);
        assert!(result.unplaced.is_empty());
        assert_eq!(result.pieces[0].position, Point(0.0, 0.0));
        assert_eq!(result.pieces[1].position, Point(0.0, 100.0));
        assert!(approx_eq!(f64, result.fabric_length, 200.0));
        assert!(approx_eq!(f64, result.efficiency, 200.0 / 3.0, epsilon = 1e-9));
        assert!(assertions::result_is_consistent(&result));
    }

    #[tokio::test]
    async fn oversized_piece_is_skipped_with_warning() {
        let sink = Arc::new(MemorySink::new());
        let pieces = [rect("HUGE", 200.0, 180.0), rect("OK", 100.0, 40.0)];
        let engine =
            NestingEngine::new(150.0, &pieces, NestingConfig::default(), sink.clone()).unwrap();
        let result = engine.perform_nesting().await;

        assert_eq!(result.unplaced, ["piece-0"]);
        assert_eq!(result.pieces.len(), 1);
        assert_eq!(result.pieces[0].name, "OK");
        assert!(
            sink.with_severity(Severity::Warning)
                .iter()
                .any(|e| e.message.contains("piece-0"))
        );
        assert_eq!(sink.with_severity(Severity::Success).len(), 1);
    }

    #[tokio::test]
    async fn large_pieces_are_placed_first() {
        let pieces = [
            rect("SMALL", 10.0, 10.0),
            rect("MEDIUM", 60.0, 30.0),
            rect("LARGE", 120.0, 80.0),
            rect("TINY", 5.0, 5.0),
        ];
        let result = engine(150.0, &pieces, NestingConfig::default())
            .perform_nesting()
            .await;
        let names: Vec<_> = result.pieces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["LARGE", "MEDIUM", "SMALL", "TINY"]);
    }

    #[tokio::test]
    async fn equal_areas_keep_input_order() {
        let pieces = [rect("FIRST", 80.0, 20.0), rect("SECOND", 20.0, 80.0)];
        let result = engine(150.0, &pieces, NestingConfig::default())
            .perform_nesting()
            .await;
        assert_eq!(result.pieces[0].name, "FIRST");
        assert_eq!(result.pieces[0].id, "piece-0");
    }

    #[tokio::test]
    async fn layout_is_disjoint_and_efficient() {
        let pieces: Vec<Piece> = (0..23)
            .map(|i| {
                let w = 20.0 + (i * 37 % 90) as f64;
                let h = 15.0 + (i * 53 % 70) as f64;
                rect(&format!("P{i}"), w, h)
            })
            .collect();
        let result = engine(300.0, &pieces, NestingConfig::default())
            .perform_nesting()
            .await;

        assert_eq!(result.pieces.len(), pieces.len());
        assert!(assertions::placements_are_disjoint(&result.pieces));
        assert!(assertions::placements_within_fabric(&result.pieces, 300.0));
        assert!(result.efficiency > 0.0 && result.efficiency <= 100.0);
    }

    #[tokio::test]
    async fn batch_size_does_not_change_layout() {
        let pieces: Vec<Piece> = (0..12)
            .map(|i| rect(&format!("P{i}"), 30.0 + i as f64 * 5.0, 40.0))
            .collect();
        let config = |batch_size| NestingConfig {
            batch_size,
            ..NestingConfig::default()
        };
        let a = engine(200.0, &pieces, config(1)).perform_nesting().await;
        let b = engine(200.0, &pieces, config(5)).perform_nesting().await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn engine_yields_to_other_tasks() {
        let pieces: Vec<Piece> = (0..6).map(|i| rect(&format!("P{i}"), 60.0, 60.0)).collect();
        let engine = engine(200.0, &pieces, NestingConfig::default());

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        engine.perform_nesting().await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
