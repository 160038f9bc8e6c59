use crate::decoder::Stroke;
use crate::entities::PenCommand;

/// Splits a stroke into runs at shape boundaries: a pen-up event immediately followed by a pen-down event.
///
/// The pen-up point opens the next run. A run of `min_points` points or fewer is not closed at a boundary:
/// it keeps accumulating into the next one. Only a final leftover that short is dropped as noise.
pub fn split_at_pen_lifts(stroke: &Stroke, min_points: usize) -> Vec<Stroke> {
    let mut runs = vec![];
    let mut current = Stroke::default();

    for (i, (&command, &point)) in stroke.commands.iter().zip(stroke.points.iter()).enumerate() {
        let next = stroke.commands.get(i + 1);
        if command == PenCommand::PenUp
            && next == Some(&PenCommand::PenDown)
            && current.len() > min_points
        {
            runs.push(std::mem::take(&mut current));
        }
        current.push(command, point);
    }
    if current.len() > min_points {
        runs.push(current);
    }
    runs
}

/// Splits a stroke where a pen-up event lies further than `jump_threshold` (Euclidean) from the previous point.
/// Runs of `min_points` points or fewer are dropped as noise.
pub fn split_at_jumps(stroke: &Stroke, jump_threshold: f64, min_points: usize) -> Vec<Stroke> {
    let mut runs = vec![];
    let mut current = Stroke::default();

    for (i, (&command, &point)) in stroke.commands.iter().zip(stroke.points.iter()).enumerate() {
        let is_jump = i > 0
            && command == PenCommand::PenUp
            && stroke.points[i - 1].distance(&point) > jump_threshold;
        if is_jump {
            let run = std::mem::take(&mut current);
            if run.len() > min_points {
                runs.push(run);
            }
        }
        current.push(command, point);
    }
    if current.len() > min_points {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Point;
    use PenCommand::*;

    fn stroke(events: &[(PenCommand, f64, f64)]) -> Stroke {
        let mut s = Stroke::default();
        for &(c, x, y) in events {
            s.push(c, Point(x, y));
        }
        s
    }

    fn shape(origin: f64, n: usize) -> Vec<(PenCommand, f64, f64)> {
        (0..n)
            .map(|i| {
                let c = if i == 0 { PenUp } else { PenDown };
                (c, origin + i as f64, origin)
            })
            .collect()
    }

    #[test]
    fn splits_at_pen_up_followed_by_pen_down() {
        let events = [shape(0.0, 7), shape(100.0, 8)].concat();
        let runs = split_at_pen_lifts(&stroke(&events), 5);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 7);
        assert_eq!(runs[1].len(), 8);
        assert_eq!(runs[1].commands[0], PenUp);
        assert_eq!(runs[1].points[0], Point(100.0, 100.0));
    }

    #[test]
    fn short_runs_merge_into_the_next() {
        let events = [shape(0.0, 7), shape(50.0, 3), shape(100.0, 6), shape(200.0, 5)].concat();
        let runs = split_at_pen_lifts(&stroke(&events), 5);
        let lens: Vec<_> = runs.iter().map(Stroke::len).collect();
        // the 3-point run opens the second one, the trailing 5-point run is dropped
        assert_eq!(lens, [7, 9]);
        assert_eq!(runs[1].points[0], Point(50.0, 50.0));
    }

    #[test]
    fn short_strokes_accumulate_into_one_run() {
        let events: Vec<_> = (0..10)
            .flat_map(|_| [(PenUp, 0.0, 0.0), (PenDown, 1.0, 1.0)])
            .collect();
        let runs = split_at_pen_lifts(&stroke(&events), 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 20);
    }

    #[test]
    fn outline_keeps_leading_fragment() {
        let events = [
            vec![(PenUp, 0.0, 0.0), (PenDown, 10.0, 0.0), (PenDown, 10.0, 10.0)],
            shape(100.0, 8),
        ]
        .concat();
        let runs = split_at_pen_lifts(&stroke(&events), 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 11);
        assert_eq!(runs[0].points[0], Point(0.0, 0.0));
    }

    #[test]
    fn leading_travel_moves_join_the_first_run() {
        let events = [
            vec![(PenUp, 0.0, 0.0), (PenUp, 5.0, 5.0)],
            shape(10.0, 6),
        ]
        .concat();
        let runs = split_at_pen_lifts(&stroke(&events), 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 8);
        assert_eq!(runs[0].points[0], Point(0.0, 0.0));
    }

    #[test]
    fn jump_split_needs_pen_up_and_distance() {
        let mut events = vec![];
        for i in 0..8 {
            events.push((PenUp, i as f64 * 10.0, 0.0));
        }
        for i in 0..8 {
            events.push((PenUp, 5000.0 + i as f64 * 10.0, 0.0));
        }
        let s = stroke(&events);
        assert_eq!(split_at_pen_lifts(&s, 5).len(), 1);

        let runs = split_at_jumps(&s, 1000.0, 5);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].points[0], Point(5000.0, 0.0));
    }

    #[test]
    fn pen_down_jump_does_not_split() {
        let events: Vec<_> = (0..12)
            .map(|i| (PenDown, i as f64 * 2000.0, 0.0))
            .collect();
        let runs = split_at_jumps(&stroke(&events), 1000.0, 5);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 12);
    }
}
