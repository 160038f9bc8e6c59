use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use plt_nest_cli::config::NestConfig;
use plt_nest_cli::io;
use plt_nest_cli::io::cli::Cli;
use plt_nest_cli::io::layout_to_svg::nesting_result_to_svg;
use plt_nest_cli::run::decode_and_nest;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            NestConfig::default()
        }
        Some(config_file) => io::read_config(config_file)?,
    };

    info!("[MAIN] Successfully parsed NestConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let output = decode_and_nest(&args.input_file, args.fabric_width, &config).await?;

    {
        let solution_path = args
            .solution_folder
            .join(format!("sol_{input_file_stem}.json"));
        io::write_json(&output, Path::new(&solution_path))?;
    }

    if let Some(result) = &output.nesting {
        let svg_path = args
            .solution_folder
            .join(format!("sol_{input_file_stem}.svg"));
        let svg = nesting_result_to_svg(result, config.svg_draw_options);
        io::write_svg(&svg, Path::new(&svg_path))?;

        info!(
            "[MAIN] {} of {} pieces placed, fabric length {:.3}m, efficiency {:.2}%",
            result.n_placed(),
            output.decoding.segments.len(),
            result.fabric_length_m(),
            result.efficiency
        );
    }

    Ok(())
}
