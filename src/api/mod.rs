//! High-level library API: the dual-pol band contract, evalscript and batch
//! request rendering, and in-memory or file-to-file band extraction. Prefer
//! these entrypoints over the lower-level `core` and `io` modules.
use std::path::{Path, PathBuf};

use ndarray::ArrayView2;
use serde_json::Value;
use tracing::info;

use crate::core::evalscript::render_evalscript;
use crate::core::mapper::{DualPolPassThrough, PixelMapper, PixelResult, PixelSample, Setup};
use crate::core::params::IngestParams;
use crate::core::processing::block::{BandRasters, evaluate_block};
use crate::core::request::{BatchRequest, EventFootprint, TimeRange};
use crate::error::Result;
use crate::io::reader::{read_band_f32, read_mask};
use crate::io::writers::write_band_rasters;

/// Result of a file-to-file extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub width: usize,
    pub height: usize,
    /// Written files, in band declaration order
    pub outputs: Vec<PathBuf>,
}

/// The dual-pol pass-through declaration: inputs `VV`, `VH`, `dataMask`;
/// outputs `VV`, `VH` (`FLOAT32`) and `MASK` (`UINT8`).
pub fn declare() -> Setup {
    DualPolPassThrough.setup()
}

pub fn evaluate(sample: &PixelSample) -> PixelResult {
    DualPolPassThrough.evaluate_pixel(sample)
}

pub fn render_default_evalscript() -> Result<String> {
    render_evalscript(&DualPolPassThrough)
}

/// Batch process request for one event, using the dual-pol mapper.
pub fn build_batch_request(
    item_id: &str,
    geometry: Value,
    time_range: &str,
    params: &IngestParams,
) -> Result<BatchRequest> {
    let time_range = TimeRange::parse(time_range)?;
    crate::core::request::build_batch_request(
        &DualPolPassThrough,
        item_id,
        geometry,
        time_range,
        params,
    )
}

/// Batch process request for an event read from GeoJSON (a geometry or a
/// Feature). Without an explicit `time_range`, the window comes from the
/// Feature's `Flood_Date`, `Start_Time` and `End_Time` properties.
pub fn build_event_request(
    item_id: &str,
    geojson: Value,
    time_range: Option<&str>,
    params: &IngestParams,
) -> Result<BatchRequest> {
    let footprint = EventFootprint::from_geojson(geojson)?;
    let time_range = match time_range {
        Some(explicit) => TimeRange::parse(explicit)?,
        None => footprint.time_range()?,
    };
    info!("Event {} acquisition window {}", item_id, time_range);
    crate::core::request::build_batch_request(
        &DualPolPassThrough,
        item_id,
        footprint.geometry,
        time_range,
        params,
    )
}

pub fn extract_bands(
    vv: ArrayView2<f32>,
    vh: ArrayView2<f32>,
    mask: ArrayView2<u8>,
) -> Result<BandRasters> {
    evaluate_block(&DualPolPassThrough, vv, vh, mask)
}

/// Reads the three co-registered input TIFFs, extracts the bands, and writes
/// `VV.tiff`, `VH.tiff` and `MASK.tiff` into `output_dir`.
pub fn extract_bands_to_dir(
    vv_path: &Path,
    vh_path: &Path,
    mask_path: &Path,
    output_dir: &Path,
) -> Result<ExtractionReport> {
    info!("Reading inputs: {:?}, {:?}, {:?}", vv_path, vh_path, mask_path);
    let vv = read_band_f32(vv_path)?;
    let vh = read_band_f32(vh_path)?;
    let mask = read_mask(mask_path)?;

    let rasters = extract_bands(vv.view(), vh.view(), mask.view())?;
    let outputs = write_band_rasters(output_dir, &rasters)?;
    let (height, width) = vv.dim();
    Ok(ExtractionReport {
        width,
        height,
        outputs,
    })
}
