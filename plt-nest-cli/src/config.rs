use serde::{Deserialize, Serialize};

use plt_nest::util::{DecoderConfig, NestingConfig};

use crate::io::svg_util::SvgDrawOptions;

/// Configuration of a command-line run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestConfig {
    /// Configuration of the plotter file decoder
    #[serde(default)]
    pub decoder: DecoderConfig,
    /// Configuration of the nesting engine
    #[serde(default)]
    pub nesting: NestingConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}
