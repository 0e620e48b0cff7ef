//! JSON body of a Sentinel Hub batch process request for one event.
//!
//! The request asks for orthorectified Sentinel-1 GRD backscatter over the
//! event footprint and time window, runs the mapper's evalscript on it, and
//! asks for one GeoTIFF response per declared output band. Sending the request
//! and polling its status belong to the caller.
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::evalscript::render_evalscript;
use crate::core::mapper::PixelMapper;
use crate::core::params::IngestParams;
use crate::error::{Error, Result};
use crate::types::{AcquisitionMode, BackscatterCoefficient, PolarizationFilter, ResolutionFilter};

pub const S1_GRD: &str = "S1GRD";
pub const TIFF_MIME: &str = "image/tiff";

/// Closed acquisition window, written `from/to` with RFC 3339 instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidTimeRange {
            value: value.to_string(),
            reason,
        };
        let (from, to) = value
            .split_once('/')
            .ok_or_else(|| invalid("expected `from/to`".to_string()))?;
        let from = DateTime::parse_from_rfc3339(from.trim())
            .map_err(|e| invalid(format!("start: {e}")))?
            .with_timezone(&Utc);
        let to = DateTime::parse_from_rfc3339(to.trim())
            .map_err(|e| invalid(format!("end: {e}")))?
            .with_timezone(&Utc);
        if from > to {
            return Err(invalid("start is after end".to_string()));
        }
        Ok(Self { from, to })
    }

    /// Window of a flood event Feature: `Flood_Date` combined with its
    /// `Start_Time` and `End_Time` properties, read as UTC.
    pub fn from_event_properties(properties: &Value) -> Result<Self> {
        let field = |name: &str| {
            properties
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .ok_or_else(|| Error::MissingArgument {
                    arg: format!("properties.{name}"),
                })
        };
        let (date, start, end) = (field("Flood_Date")?, field("Start_Time")?, field("End_Time")?);
        let value = format!("{date}T{start}Z/{date}T{end}Z");
        let invalid = |reason: String| Error::InvalidTimeRange {
            value: value.clone(),
            reason,
        };

        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| invalid(format!("Flood_Date: {e}")))?;
        let start = parse_time(start).map_err(|e| invalid(format!("Start_Time: {e}")))?;
        let end = parse_time(end).map_err(|e| invalid(format!("End_Time: {e}")))?;

        let from = Utc.from_utc_datetime(&day.and_time(start));
        let to = Utc.from_utc_datetime(&day.and_time(end));
        if from > to {
            return Err(invalid("start is after end".to_string()));
        }
        Ok(Self { from, to })
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            self.from.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.to.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

fn parse_time(value: &str) -> std::result::Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}

/// Event footprint read from GeoJSON: a bare geometry, or a Feature whose
/// properties may also carry the event's time window.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFootprint {
    pub geometry: Value,
    pub properties: Option<Value>,
}

impl EventFootprint {
    pub fn from_geojson(mut value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid_argument("geojson", "not a JSON object"));
        }
        let footprint = if value.get("type").and_then(Value::as_str) == Some("Feature") {
            let geometry = value
                .get_mut("geometry")
                .map(Value::take)
                .filter(|g| !g.is_null())
                .ok_or_else(|| Error::MissingArgument {
                    arg: "geometry".to_string(),
                })?;
            let properties = value
                .get_mut("properties")
                .map(Value::take)
                .filter(Value::is_object);
            Self {
                geometry,
                properties,
            }
        } else {
            Self {
                geometry: value,
                properties: None,
            }
        };
        check_geometry(&footprint.geometry)?;
        Ok(footprint)
    }

    /// Time window from the Feature properties.
    pub fn time_range(&self) -> Result<TimeRange> {
        match &self.properties {
            Some(properties) => TimeRange::from_event_properties(properties),
            None => Err(Error::MissingArgument {
                arg: "time range (no Feature properties to derive it from)".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub tiling_grid: TilingGrid,
    pub output: BatchOutput,
    pub description: String,
    pub process_request: ProcessRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilingGrid {
    pub id: u32,
    pub resolution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub cog_output: bool,
    pub default_tile_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub input: ProcessInput,
    pub evalscript: String,
    pub output: ProcessOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInput {
    pub bounds: Bounds,
    pub data: Vec<DataSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub geometry: Value,
    pub properties: BoundsProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsProperties {
    pub crs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub processing: S1Processing,
    pub data_filter: DataFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S1Processing {
    pub back_coeff: BackscatterCoefficient,
    pub orthorectify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFilter {
    pub time_range: TimeRange,
    pub polarization: PolarizationFilter,
    pub acquisition_mode: AcquisitionMode,
    pub resolution: ResolutionFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    pub responses: Vec<OutputResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputResponse {
    pub identifier: String,
    pub format: ResponseFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub mime: String,
}

fn check_geometry(geometry: &Value) -> Result<()> {
    match geometry.get("type").and_then(Value::as_str) {
        Some("Polygon") | Some("MultiPolygon") => {}
        other => {
            return Err(Error::invalid_argument(
                "geometry.type",
                other.unwrap_or("<missing>"),
            ));
        }
    }
    if !geometry.get("coordinates").is_some_and(Value::is_array) {
        return Err(Error::MissingArgument {
            arg: "geometry.coordinates".to_string(),
        });
    }
    Ok(())
}

/// Batch request covering `geometry` (GeoJSON Polygon or MultiPolygon in
/// `params.crs`) during `time_range`, evaluated with `mapper`.
pub fn build_batch_request(
    mapper: &dyn PixelMapper,
    item_id: &str,
    geometry: Value,
    time_range: TimeRange,
    params: &IngestParams,
) -> Result<BatchRequest> {
    if item_id.trim().is_empty() {
        return Err(Error::MissingArgument {
            arg: "item_id".to_string(),
        });
    }
    params.validate()?;
    check_geometry(&geometry)?;

    let evalscript = render_evalscript(mapper)?;
    let responses = mapper
        .setup()
        .output
        .into_iter()
        .map(|band| OutputResponse {
            identifier: band.id,
            format: ResponseFormat {
                mime: TIFF_MIME.to_string(),
            },
        })
        .collect::<Vec<_>>();
    debug!(
        "Batch request for {} with {} responses",
        item_id,
        responses.len()
    );

    Ok(BatchRequest {
        tiling_grid: TilingGrid {
            id: params.tiling_grid_id,
            resolution: params.tile_resolution.to_string(),
        },
        output: BatchOutput {
            cog_output: params.cog_output,
            default_tile_path: params.tile_path_for(item_id),
        },
        description: format!("Batch request for S1 data related to {}", item_id),
        process_request: ProcessRequest {
            input: ProcessInput {
                bounds: Bounds {
                    geometry,
                    properties: BoundsProperties {
                        crs: params.crs.clone(),
                    },
                },
                data: vec![DataSource {
                    kind: S1_GRD.to_string(),
                    processing: S1Processing {
                        back_coeff: params.back_coeff,
                        orthorectify: params.orthorectify,
                    },
                    data_filter: DataFilter {
                        time_range,
                        polarization: params.polarization,
                        acquisition_mode: params.acquisition_mode,
                        resolution: params.resolution,
                    },
                }],
            },
            evalscript,
            output: ProcessOutput { responses },
        },
    })
}
