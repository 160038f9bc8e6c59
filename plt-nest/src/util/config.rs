use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Point;

/// Configuration of the plotter file decoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Minimum number of points a strategy must extract for its result to be accepted
    pub min_points: usize,
    /// Runs of this many points or fewer are discarded as noise during segmentation
    pub min_segment_points: usize,
    /// Distance (plotter units) above which consecutive points are considered a pen jump
    pub jump_threshold: f64,
    /// The distance-based segmentation fallback only runs when more points than this are available
    pub jump_split_min_points: usize,
    /// Vertical bands used to name segments by the y-coordinate of their top edge.
    /// Calibrated for one garment family, unlikely to generalize to other pattern files.
    pub name_bands: Vec<NameBand>,
    /// Size rules naming small segments, evaluated in order.
    /// With the default table every segment fitting `POCKET` already fits `SLEEVE`,
    /// so `POCKET` is only reached once the table is reordered or replaced.
    pub small_part_labels: Vec<SizeLabel>,
    /// Labels cycled through (by segment index) for segments no other rule could name
    pub label_pool: Vec<String>,
    /// Fixed annotations attached to every decoded drawing
    pub text_regions: Vec<TextRegion>,
}

/// Segments whose top edge (max y) lies strictly between `y_min` and `y_max` are named `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameBand {
    pub label: String,
    pub y_min: f64,
    pub y_max: f64,
}

/// Segments strictly narrower than `max_width` and strictly lower than `max_height` are named `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeLabel {
    pub label: String,
    pub max_width: f64,
    pub max_height: f64,
}

/// Region of the drawing carrying a known annotation, `text` is anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub text: String,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub size: f64,
}

impl TextRegion {
    pub fn new(
        text: &str,
        (min_x, max_x): (f64, f64),
        (min_y, max_y): (f64, f64),
        size: f64,
    ) -> Self {
        Self {
            text: text.to_string(),
            min_x,
            max_x,
            min_y,
            max_y,
            size,
        }
    }

    pub fn center(&self) -> Point {
        Point((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

impl NameBand {
    pub fn new(label: &str, y_min: f64, y_max: f64) -> Self {
        Self {
            label: label.to_string(),
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, y: f64) -> bool {
        self.y_min < y && y < self.y_max
    }
}

impl SizeLabel {
    pub fn new(label: &str, max_width: f64, max_height: f64) -> Self {
        Self {
            label: label.to_string(),
            max_width,
            max_height,
        }
    }

    pub fn fits(&self, width: f64, height: f64) -> bool {
        width < self.max_width && height < self.max_height
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            min_points: 10,
            min_segment_points: 5,
            jump_threshold: 1000.0,
            jump_split_min_points: 20,
            name_bands: vec![
                NameBand::new("CHEST", 37000.0, 42000.0),
                NameBand::new("FRONT", 27000.0, 33000.0),
                NameBand::new("BACK", 2000.0, 7000.0),
            ],
            small_part_labels: vec![
                SizeLabel::new("SLEEVE", 5000.0, 5000.0),
                SizeLabel::new("POCKET", 3000.0, 3000.0),
            ],
            label_pool: ["LEFT FRONT", "SLEEVE", "YOKE", "RIGHT FRONT", "POCKET", "TEMPLATE"]
                .into_iter()
                .map(String::from)
                .collect(),
            text_regions: vec![
                TextRegion::new("CHEST", (17000.0, 19000.0), (38900.0, 39400.0), 24.0),
                TextRegion::new("FRONT", (18000.0, 20000.0), (28300.0, 28800.0), 24.0),
                TextRegion::new("BACK", (17000.0, 19000.0), (3000.0, 3700.0), 24.0),
            ],
        }
    }
}

/// Configuration of the nesting engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestingConfig {
    /// Pieces with a width or height above this value (plotter units) are classified as large
    pub size_threshold: f64,
    /// Fixed step of the placement grid. If undefined, the step adapts to each piece:
    /// half of its smallest dimension, but never below `min_grid_step`
    pub grid_step: Option<f64>,
    /// Lower limit for the adaptive grid step
    pub min_grid_step: f64,
    /// Number of pieces placed between two yields to the async scheduler
    pub batch_size: usize,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            size_threshold: 50.0,
            grid_step: None,
            min_grid_step: 1.0,
            batch_size: 5,
        }
    }
}

impl NestingConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_grid_step > 0.0 && self.min_grid_step.is_finite(),
            "min_grid_step must be a positive number, got {}",
            self.min_grid_step
        );
        if let Some(step) = self.grid_step {
            ensure!(
                step > 0.0 && step.is_finite(),
                "grid_step must be a positive number, got {step}"
            );
        }
        ensure!(self.batch_size > 0, "batch_size must be at least 1");
        Ok(())
    }
}
