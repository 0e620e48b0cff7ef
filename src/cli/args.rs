use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use s1bands::{AcquisitionMode, BackscatterCoefficient, PolarizationFilter, ResolutionFilter};

#[derive(Parser)]
#[command(name = "s1bands", version, about = "Sentinel-1 VV/VH band extraction")]
pub struct CliArgs {
    /// Enable logging (RUST_LOG overrides the default debug level)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the band declaration (inputs and typed outputs) as JSON
    Setup,

    /// Print the evalscript handed to the processing platform
    Evalscript {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the batch process request body for one event
    Request(RequestArgs),

    /// Split VV, VH and dataMask rasters into typed single-band TIFFs
    Extract(ExtractArgs),
}

#[derive(Args)]
pub struct RequestArgs {
    /// Event identifier, used in the description and tile path
    #[arg(long)]
    pub item_id: String,

    /// GeoJSON file holding the event footprint (a geometry or a Feature)
    #[arg(long)]
    pub geometry: PathBuf,

    /// Acquisition window, e.g. 2019-05-22T00:00:00Z/2019-05-23T00:00:00Z.
    /// When omitted, taken from the Feature's Flood_Date, Start_Time and End_Time
    #[arg(long)]
    pub time_range: Option<String>,

    /// JSON file with ingest parameters; defaults apply to missing fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the backscatter coefficient
    #[arg(long, value_enum)]
    pub back_coeff: Option<BackscatterCoefficient>,

    /// Override the polarization filter
    #[arg(long, value_enum)]
    pub polarization: Option<PolarizationFilter>,

    /// Override the acquisition mode
    #[arg(long, value_enum)]
    pub acquisition_mode: Option<AcquisitionMode>,

    /// Override the resolution filter
    #[arg(long, value_enum)]
    pub resolution: Option<ResolutionFilter>,

    /// Override the tile path template ({item_id} is substituted)
    #[arg(long)]
    pub tile_path: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// VV backscatter raster
    #[arg(long)]
    pub vv: PathBuf,

    /// VH backscatter raster
    #[arg(long)]
    pub vh: PathBuf,

    /// dataMask raster (non-zero = valid)
    #[arg(long)]
    pub mask: PathBuf,

    /// Directory receiving VV.tiff, VH.tiff and MASK.tiff
    #[arg(short, long)]
    pub output_dir: PathBuf,
}
