use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use s1bands::{
    IngestParams, build_event_request, declare, extract_bands_to_dir, render_default_evalscript,
};

use super::args::{CliArgs, Command, ExtractArgs, RequestArgs};
use super::errors::AppError;

fn emit(text: &str, output: Option<&PathBuf>) -> Result<(), AppError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!("Wrote {:?}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn load_geojson(path: &Path) -> Result<Value, AppError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn run_request(args: RequestArgs) -> Result<(), AppError> {
    let mut params = match &args.config {
        Some(path) => IngestParams::from_json_file(path)?,
        None => IngestParams::default(),
    };
    if let Some(back_coeff) = args.back_coeff {
        params.back_coeff = back_coeff;
    }
    if let Some(polarization) = args.polarization {
        params.polarization = polarization;
    }
    if let Some(mode) = args.acquisition_mode {
        params.acquisition_mode = mode;
    }
    if let Some(resolution) = args.resolution {
        params.resolution = resolution;
    }
    if let Some(tile_path) = args.tile_path {
        params.tile_path_template = tile_path;
    }

    let geojson = load_geojson(&args.geometry)?;
    let request = build_event_request(
        &args.item_id,
        geojson,
        args.time_range.as_deref(),
        &params,
    )?;
    info!("Built batch request for {}", args.item_id);
    emit(&serde_json::to_string_pretty(&request)?, args.output.as_ref())
}

fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    if args.output_dir.exists() && !args.output_dir.is_dir() {
        return Err(AppError::NotADirectory {
            path: args.output_dir.display().to_string(),
        });
    }
    let report = extract_bands_to_dir(&args.vv, &args.vh, &args.mask, &args.output_dir)?;
    if report.outputs.is_empty() {
        warn!("No output bands were written");
    }
    info!(
        "Extracted {}x{} pixels into {} bands",
        report.width,
        report.height,
        report.outputs.len()
    );
    for path in &report.outputs {
        println!("{}", path.display());
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match args.command {
        Command::Setup => {
            let setup = declare();
            emit(&serde_json::to_string_pretty(&setup)?, None)?;
        }
        Command::Evalscript { output } => {
            let script = render_default_evalscript()?;
            emit(&script, output.as_ref())?;
        }
        Command::Request(request) => run_request(request)?,
        Command::Extract(extract) => run_extract(extract)?,
    }

    Ok(())
}
