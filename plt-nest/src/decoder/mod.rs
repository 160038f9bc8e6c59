//! Decoder for loosely structured plotter command files.
//!
//! Several dialects are attempted in a fixed order (see [`strategies::STRATEGIES`]),
//! the first one that extracts enough points wins. The decoded stroke is then cut into
//! segments at pen lifts and every segment is given a name.
//! Decoding never fails: input from which nothing usable can be extracted
//! degrades into a placeholder square.

mod naming;
mod segmentation;
pub mod strategies;

use std::fmt::Display;
use std::time::Instant;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{PenCommand, Piece};
use crate::geometry::primitives::Point;
use crate::report::{LogSink, Reporter};
use crate::util::DecoderConfig;

pub use naming::name_segments;
pub use segmentation::{split_at_jumps, split_at_pen_lifts};

/// Name of the segment produced when decoding falls back to the placeholder shape.
pub const PLACEHOLDER_NAME: &str = "EXAMPLE";

/// Strategy that produced a [`DecodedPlt`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeMethod {
    StrictLine,
    Global,
    GenericPrefix,
    NumericPairs,
    Placeholder,
}

impl Display for DecodeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DecodeMethod::StrictLine => "strict-line",
            DecodeMethod::Global => "global",
            DecodeMethod::GenericPrefix => "generic-prefix",
            DecodeMethod::NumericPairs => "numeric-pairs",
            DecodeMethod::Placeholder => "placeholder",
        };
        f.write_str(s)
    }
}

/// Input text split into lines, independent of the line-ending convention.
pub struct PltText {
    lines: Vec<String>,
    joined: String,
}

impl PltText {
    pub fn new(content: &str) -> Self {
        let lines: Vec<String> = content
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        let joined = lines.join(" ");
        Self { lines, joined }
    }

    /// Non-empty, trimmed lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined by a single space
    pub fn joined(&self) -> &str {
        &self.joined
    }
}

/// Ordered pen events: parallel command and point sequences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    pub commands: Vec<PenCommand>,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn push(&mut self, command: PenCommand, point: Point) {
        self.commands.push(command);
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unit square of 100 plotter units, drawn as a pen-up move followed by four pen-down strokes.
    pub fn placeholder() -> Self {
        use PenCommand::*;
        Self {
            commands: vec![PenUp, PenDown, PenDown, PenDown, PenDown],
            points: vec![
                Point(0.0, 0.0),
                Point(100.0, 0.0),
                Point(100.0, 100.0),
                Point(0.0, 100.0),
                Point(0.0, 0.0),
            ],
        }
    }
}

/// Annotation placed on the decoded drawing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Output of [`decode`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedPlt {
    pub commands: Vec<PenCommand>,
    pub points: Vec<Point>,
    pub text_elements: Vec<TextElement>,
    pub segments: Vec<Piece>,
    pub raw_content: String,
    pub method: DecodeMethod,
}

/// Decodes plotter text into pen events and named segments.
///
/// Never fails: if no strategy extracts `config.min_points` points,
/// the result holds a single [`PLACEHOLDER_NAME`] segment describing a 100×100 square.
pub fn decode(content: &str, config: &DecoderConfig, sink: &dyn LogSink) -> DecodedPlt {
    let reporter = Reporter::new(sink, "[DEC]");
    let text = PltText::new(content);
    reporter.info(format!("input contains {} lines", text.lines().len()));
    let text_elements = text_elements(config, &reporter);

    for (i, (method, strategy)) in strategies::STRATEGIES.iter().enumerate() {
        reporter.info(format!("strategy {} ({method}): started", i + 1));
        let start = Instant::now();
        let stroke = strategy(&text, config);
        let n_points = stroke.len();
        let msg = format!(
            "strategy {} ({method}): extracted {n_points} points in {:.3}s",
            i + 1,
            start.elapsed().as_secs_f64()
        );
        match n_points > 0 {
            true => reporter.success(msg),
            false => reporter.warning(msg),
        }

        if n_points >= config.min_points {
            let segments = extract_segments(&stroke, config, &reporter);
            reporter.success(format!("using results of strategy {} ({method})", i + 1));
            return DecodedPlt {
                commands: stroke.commands,
                points: stroke.points,
                text_elements,
                segments,
                raw_content: content.to_string(),
                method: *method,
            };
        }
    }

    reporter.warning("no strategy extracted enough points, using placeholder data");
    let stroke = Stroke::placeholder();
    let segment = Piece::new(
        PLACEHOLDER_NAME,
        stroke.points.clone(),
        stroke.commands.clone(),
    );
    DecodedPlt {
        commands: stroke.commands,
        points: stroke.points,
        text_elements,
        segments: vec![segment],
        raw_content: content.to_string(),
        method: DecodeMethod::Placeholder,
    }
}

fn text_elements(config: &DecoderConfig, reporter: &Reporter) -> Vec<TextElement> {
    let elements = config
        .text_regions
        .iter()
        .map(|region| {
            let Point(x, y) = region.center();
            TextElement {
                text: region.text.clone(),
                x,
                y,
                size: region.size,
            }
        })
        .collect_vec();
    reporter.success(format!(
        "added {} text elements: {}",
        elements.len(),
        elements.iter().map(|e| e.text.as_str()).join(", ")
    ));
    elements
}

/// Cuts the stroke into runs at pen lifts (falling back to distance jumps) and names them.
fn extract_segments(stroke: &Stroke, config: &DecoderConfig, reporter: &Reporter) -> Vec<Piece> {
    reporter.info("identifying separate segments in the drawing");
    let mut runs = split_at_pen_lifts(stroke, config.min_segment_points);
    reporter.success(format!("identified {} segments at pen lifts", runs.len()));

    if runs.is_empty() && stroke.len() > config.jump_split_min_points {
        runs = split_at_jumps(stroke, config.jump_threshold, config.min_segment_points);
        reporter.success(format!(
            "identified {} segments based on distance jumps",
            runs.len()
        ));
    }
    name_segments(runs, config)
}
