use std::fmt::Display;

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::{Bounds, Point};

/// Pen state of a plotter command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenCommand {
    /// Travel without drawing
    #[serde(rename = "PU")]
    PenUp,
    /// Draw while moving
    #[serde(rename = "PD")]
    PenDown,
}

impl PenCommand {
    /// Parses a `PU`/`PD` mnemonic, ignoring case.
    pub fn from_mnemonic(token: &str) -> Option<PenCommand> {
        if token.eq_ignore_ascii_case("PU") {
            Some(PenCommand::PenUp)
        } else if token.eq_ignore_ascii_case("PD") {
            Some(PenCommand::PenDown)
        } else {
            None
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            PenCommand::PenUp => "PU",
            PenCommand::PenDown => "PD",
        }
    }
}

impl Display for PenCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A named pattern piece: an ordered stroke path with one pen command per point.
///
/// Geometry is fixed at construction, the bounds are derived from the points
/// and cannot drift from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExtPiece", into = "ExtPiece")]
pub struct Piece {
    pub name: String,
    points: Vec<Point>,
    commands: Vec<PenCommand>,
    bounds: Bounds,
}

impl Piece {
    /// Creates a piece from parallel point and command sequences.
    /// If the sequences differ in length, both are truncated to the shorter one.
    pub fn new(name: impl Into<String>, mut points: Vec<Point>, mut commands: Vec<PenCommand>) -> Self {
        let n = usize::min(points.len(), commands.len());
        points.truncate(n);
        commands.truncate(n);
        let bounds = Bounds::from_points(&points);
        Self {
            name: name.into(),
            points,
            commands,
            bounds,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn commands(&self) -> &[PenCommand] {
        &self.commands
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }
}

/// External representation of a [`Piece`]: the `{name, points, commands}` record produced by the decoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtPiece {
    pub name: String,
    pub points: Vec<Point>,
    pub commands: Vec<PenCommand>,
}

impl TryFrom<ExtPiece> for Piece {
    type Error = anyhow::Error;

    fn try_from(ext: ExtPiece) -> Result<Self, Self::Error> {
        ensure!(
            ext.points.len() == ext.commands.len(),
            "piece {:?} has {} points but {} commands",
            ext.name,
            ext.points.len(),
            ext.commands.len()
        );
        Ok(Piece::new(ext.name, ext.points, ext.commands))
    }
}

impl From<Piece> for ExtPiece {
    fn from(piece: Piece) -> Self {
        ExtPiece {
            name: piece.name,
            points: piece.points,
            commands: piece.commands,
        }
    }
}
