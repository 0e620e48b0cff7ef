//! Ingest parameters: the Sentinel-1 GRD acquisition filter and the batch
//! output options, with defaults matching the flood-event ingest and loadable
//! from JSON config files.
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{AcquisitionMode, BackscatterCoefficient, PolarizationFilter, ResolutionFilter};

pub const WGS84_CRS: &str = "http://www.opengis.net/def/crs/EPSG/0/4326";

/// Acquisition filter and batch output options, suitable for JSON config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestParams {
    pub back_coeff: BackscatterCoefficient,
    pub orthorectify: bool,
    pub polarization: PolarizationFilter,
    pub acquisition_mode: AcquisitionMode,
    pub resolution: ResolutionFilter,
    pub tiling_grid_id: u32,
    /// Output pixel size in metres
    pub tile_resolution: u32,
    /// `{item_id}` is filled in per event; `<requestId>`, `<tileName>` and
    /// `<outputId>` are left for the batch service.
    pub tile_path_template: String,
    pub cog_output: bool,
    pub crs: String,
}

impl Default for IngestParams {
    fn default() -> Self {
        Self {
            back_coeff: BackscatterCoefficient::Sigma0Ellipsoid,
            orthorectify: true,
            polarization: PolarizationFilter::Dv,
            acquisition_mode: AcquisitionMode::Iw,
            resolution: ResolutionFilter::High,
            tiling_grid_id: 0,
            tile_resolution: 10,
            tile_path_template: "s3://sentinelhub-batch/glofimr/{item_id}/<requestId>/<tileName>/<outputId>.tiff"
                .to_string(),
            cog_output: true,
            crs: WGS84_CRS.to_string(),
        }
    }
}

impl IngestParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("Loading ingest parameters from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        let params: IngestParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_resolution == 0 {
            return Err(Error::invalid_argument("tile_resolution", self.tile_resolution));
        }
        // Every output band lands in its own file; without the placeholder they collide.
        if !self.tile_path_template.contains("<outputId>") {
            return Err(Error::invalid_argument(
                "tile_path_template",
                &self.tile_path_template,
            ));
        }
        if self.crs.trim().is_empty() {
            return Err(Error::MissingArgument {
                arg: "crs".to_string(),
            });
        }
        Ok(())
    }

    pub fn tile_path_for(&self, item_id: &str) -> String {
        self.tile_path_template.replace("{item_id}", item_id)
    }
}
