use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, ensure};
use log::{error, info};
use thousands::Separable;

use plt_nest::decoder;
use plt_nest::meters_to_plotter_units;
use plt_nest::nesting::NestingEngine;
use plt_nest::report::MemorySink;

use crate::config::NestConfig;
use crate::io;
use crate::io::output::{DecodingSummary, NestOutput};

/// Decodes `input_file` and nests its pieces on a roll `fabric_width_m` meters wide.
///
/// A file without any usable piece still produces an output, with the failure recorded in its log.
pub async fn decode_and_nest(
    input_file: &Path,
    fabric_width_m: f64,
    config: &NestConfig,
) -> Result<NestOutput> {
    ensure!(
        fabric_width_m > 0.0 && fabric_width_m.is_finite(),
        "fabric width must be a positive number of meters, got {fabric_width_m}"
    );
    let content = io::read_plt_file(input_file)?;
    let sink = Arc::new(MemorySink::new());

    let decoded = decoder::decode(&content, &config.decoder, sink.as_ref());
    info!(
        "[RUN] decoded {} points into {} segments ({})",
        decoded.points.len().separate_with_commas(),
        decoded.segments.len(),
        decoded.method
    );

    let fabric_width = meters_to_plotter_units(fabric_width_m);
    let nesting = match NestingEngine::new(
        fabric_width,
        &decoded.segments,
        config.nesting,
        sink.clone(),
    ) {
        Ok(engine) => Some(engine.perform_nesting().await),
        Err(e) => {
            error!("[RUN] nesting not started: {e:#}");
            None
        }
    };

    Ok(NestOutput {
        input_file: input_file.display().to_string(),
        fabric_width_m,
        decoding: DecodingSummary::from(&decoded),
        fabric_length_m: nesting.as_ref().map(|r| r.fabric_length_m()),
        nesting,
        config: config.clone(),
        log: sink.events(),
    })
}
