use serde::Serialize;

use plt_nest::decoder::{DecodeMethod, DecodedPlt, TextElement};
use plt_nest::entities::NestingResult;
use plt_nest::report::LogEvent;

use crate::config::NestConfig;

/// Contents of the `sol_<stem>.json` file written by a command-line run
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NestOutput {
    pub input_file: String,
    /// Fabric width in meters, as given on the command line
    pub fabric_width_m: f64,
    pub decoding: DecodingSummary,
    /// `None` if no nesting run could be started
    pub nesting: Option<NestingResult>,
    /// Fabric length in meters
    pub fabric_length_m: Option<f64>,
    pub config: NestConfig,
    pub log: Vec<LogEvent>,
}

/// Decoding outcome without the raw file content
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DecodingSummary {
    pub method: DecodeMethod,
    pub n_points: usize,
    pub segments: Vec<SegmentSummary>,
    pub text_elements: Vec<TextElement>,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub name: String,
    pub n_points: usize,
    pub width: f64,
    pub height: f64,
}

impl From<&DecodedPlt> for DecodingSummary {
    fn from(decoded: &DecodedPlt) -> Self {
        DecodingSummary {
            method: decoded.method,
            n_points: decoded.points.len(),
            segments: decoded
                .segments
                .iter()
                .map(|s| SegmentSummary {
                    name: s.name.clone(),
                    n_points: s.n_points(),
                    width: s.bounds().width(),
                    height: s.bounds().height(),
                })
                .collect(),
            text_elements: decoded.text_elements.clone(),
        }
    }
}
