//! Independent extraction strategies, from the strictest dialect to the most permissive.
//! Each one maps the input text to an ordered stroke and never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::decoder::{DecodeMethod, PltText, Stroke};
use crate::entities::PenCommand;
use crate::geometry::primitives::Point;
use crate::util::DecoderConfig;

/// Extraction function of a strategy
pub type StrategyFn = fn(&PltText, &DecoderConfig) -> Stroke;

/// Strategies in the order they are attempted.
pub const STRATEGIES: [(DecodeMethod, StrategyFn); 4] = [
    (DecodeMethod::StrictLine, strict_line),
    (DecodeMethod::Global, global),
    (DecodeMethod::GenericPrefix, generic_prefix),
    (DecodeMethod::NumericPairs, numeric_pairs),
];

static STRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(PU|PD)[\s,]*(-?\d+\.?\d*)[\s,]*(-?\d+\.?\d*)").expect("valid pattern")
});

static GLOBAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(PU|PD)[\s,;]*(-?\d+\.?\d*)[\s,;]*(-?\d+\.?\d*)").expect("valid pattern")
});

static GENERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)P[A-Z][\s,;]*(-?\d+\.?\d*)[\s,;]*(-?\d+\.?\d*)").expect("valid pattern")
});

static NUMERIC_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d+\.?\d*)[\s,;]+(-?\d+\.?\d*)").expect("valid pattern"));

fn parse_pair(x: &str, y: &str) -> Option<Point> {
    match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(x), Ok(y)) => Some(Point(x, y)),
        _ => None,
    }
}

/// Per line, per `;`-separated command: the first `PU`/`PD` token followed by two numbers.
/// Lines without a pen token are skipped entirely.
pub fn strict_line(text: &PltText, _config: &DecoderConfig) -> Stroke {
    let mut stroke = Stroke::default();
    for line in text.lines() {
        let upper = line.to_ascii_uppercase();
        if !upper.contains("PU") && !upper.contains("PD") {
            continue;
        }
        for cmd in line.split(';').filter(|c| !c.is_empty()) {
            let Some(caps) = STRICT_RE.captures(cmd) else {
                continue;
            };
            let command = PenCommand::from_mnemonic(&caps[1]);
            if let (Some(command), Some(point)) = (command, parse_pair(&caps[2], &caps[3])) {
                stroke.push(command, point);
            }
        }
    }
    stroke
}

/// Every `PU`/`PD` token followed by two numbers anywhere in the joined content.
/// Recovers multiple commands per line and coordinates broken across lines.
pub fn global(text: &PltText, _config: &DecoderConfig) -> Stroke {
    let mut stroke = Stroke::default();
    for caps in GLOBAL_RE.captures_iter(text.joined()) {
        let command = PenCommand::from_mnemonic(&caps[1]);
        if let (Some(command), Some(point)) = (command, parse_pair(&caps[2], &caps[3])) {
            stroke.push(command, point);
        }
    }
    stroke
}

/// Any two-letter `P<letter>` token (`PA`, `PR`, ...) followed by two numbers.
/// The pen state of these dialects is unknown, every point is taken as pen-down.
pub fn generic_prefix(text: &PltText, _config: &DecoderConfig) -> Stroke {
    let mut stroke = Stroke::default();
    for caps in GENERIC_RE.captures_iter(text.joined()) {
        if let Some(point) = parse_pair(&caps[1], &caps[2]) {
            stroke.push(PenCommand::PenDown, point);
        }
    }
    stroke
}

/// Every adjacent pair of numbers, regardless of command tokens.
///
/// The first point is pen-up. Afterwards, a jump larger than `jump_threshold`
/// on either axis is taken as travel (pen-up), anything shorter as drawing (pen-down).
pub fn numeric_pairs(text: &PltText, config: &DecoderConfig) -> Stroke {
    let mut stroke = Stroke::default();
    for caps in NUMERIC_PAIR_RE.captures_iter(text.joined()) {
        let Some(point) = parse_pair(&caps[1], &caps[2]) else {
            continue;
        };
        let command = match stroke.points.last() {
            Some(prev) if prev.chebyshev_distance(&point) <= config.jump_threshold => {
                PenCommand::PenDown
            }
            _ => PenCommand::PenUp,
        };
        stroke.push(command, point);
    }
    stroke
}

#[cfg(test)]
mod tests {
    use super::*;
    use PenCommand::*;
    use test_case::test_case;

    fn run(strategy: StrategyFn, content: &str) -> Stroke {
        strategy(&PltText::new(content), &DecoderConfig::default())
    }

    #[test]
    fn strict_line_reads_one_command_per_semicolon() {
        let s = run(strict_line, "IN;SP1;\r\nPU0,0;PD10,0;PD10 10\nPD 0 , 10;\n");
        assert_eq!(s.commands, [PenUp, PenDown, PenDown, PenDown]);
        assert_eq!(
            s.points,
            [Point(0.0, 0.0), Point(10.0, 0.0), Point(10.0, 10.0), Point(0.0, 10.0)]
        );
    }

    #[test]
    fn strict_line_keeps_first_pair_only() {
        // only the first coordinate pair after a token is read in this dialect
        let s = run(strict_line, "PD10,0,20,0,30,0;");
        assert_eq!(s.points, [Point(10.0, 0.0)]);
    }

    #[test]
    fn strict_line_accepts_lowercase_and_signs() {
        let s = run(strict_line, "pu-5.5,3;pd12.25,-7");
        assert_eq!(s.commands, [PenUp, PenDown]);
        assert_eq!(s.points, [Point(-5.5, 3.0), Point(12.25, -7.0)]);
    }

    #[test]
    fn global_crosses_line_breaks() {
        let s = run(global, "PU0,\n0;PD100\r\n0;PD100,100");
        assert_eq!(s.commands, [PenUp, PenDown, PenDown]);
        assert_eq!(s.points, [Point(0.0, 0.0), Point(100.0, 0.0), Point(100.0, 100.0)]);
        assert!(run(strict_line, "PU0,\n0;PD100\r\n0;PD100,100").len() < 3);
    }

    #[test]
    fn generic_prefix_assumes_pen_down() {
        let s = run(generic_prefix, "PA100,200;PR5,5;PU1,1");
        assert_eq!(s.commands, [PenDown, PenDown, PenDown]);
        assert_eq!(s.points, [Point(100.0, 200.0), Point(5.0, 5.0), Point(1.0, 1.0)]);
    }

    #[test]
    fn numeric_pairs_infers_pen_state_from_jumps() {
        let s = run(numeric_pairs, "0 0; 10 10; 20 20; 5000 20; 5010 30");
        assert_eq!(s.commands, [PenUp, PenDown, PenDown, PenUp, PenDown]);
        assert_eq!(s.points[3], Point(5000.0, 20.0));
    }

    #[test_case(""; "empty")]
    #[test_case("hello world"; "prose")]
    #[test_case(";;;\r\n\r\n"; "separators only")]
    fn non_matching_input_yields_empty_stroke(content: &str) {
        for (_, strategy) in STRATEGIES {
            assert!(run(strategy, content).is_empty());
        }
    }
}
