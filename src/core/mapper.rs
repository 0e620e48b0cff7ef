//! The per-pixel contract between s1bands and the hosting imagery engine.
//!
//! A [`PixelMapper`] declares which input bands it needs and which output
//! bands it produces ([`Setup`]), and maps one [`PixelSample`] to one
//! [`PixelResult`]. [`DualPolPassThrough`] is the Sentinel-1 ingest mapper:
//! VV and VH go out untouched as `FLOAT32`, `dataMask` goes out as `UINT8`.
//!
//! Mappers never convert numbers. The declared [`SampleType`] tells the host
//! how to serialize each output; see `core::processing::block` for the host
//! side of that step.
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{InputBand, SampleType};

/// One named output channel group and its storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandDeclaration {
    pub id: String,
    pub bands: usize,
    pub sample_type: SampleType,
}

impl BandDeclaration {
    pub fn new(id: impl Into<String>, bands: usize, sample_type: SampleType) -> Self {
        Self {
            id: id.into(),
            bands,
            sample_type,
        }
    }
}

/// What a mapper needs from the host and what it hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub input: Vec<InputBand>,
    pub output: Vec<BandDeclaration>,
}

impl Setup {
    pub fn output_ids(&self) -> Vec<&str> {
        self.output.iter().map(|b| b.id.as_str()).collect()
    }

    pub fn declaration(&self, id: &str) -> Option<&BandDeclaration> {
        self.output.iter().find(|b| b.id == id)
    }
}

/// Input values for a single pixel, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSample {
    #[serde(rename = "VV")]
    pub vv: f64,
    #[serde(rename = "VH")]
    pub vh: f64,
    #[serde(rename = "dataMask")]
    pub data_mask: f64,
}

impl PixelSample {
    pub fn new(vv: f64, vh: f64, data_mask: f64) -> Self {
        Self { vv, vh, data_mask }
    }

    pub fn get(&self, band: InputBand) -> f64 {
        match band {
            InputBand::Vv => self.vv,
            InputBand::Vh => self.vh,
            InputBand::DataMask => self.data_mask,
        }
    }
}

/// Output values for a single pixel, one entry per declared band in
/// declaration order. Serializes as a JSON object that keeps that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PixelResult {
    entries: Vec<(&'static str, Vec<f64>)>,
}

impl PixelResult {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, id: &'static str, values: Vec<f64>) {
        self.entries.push((id, values));
    }

    pub fn get(&self, id: &str) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, v)| v.as_slice())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[f64])> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Values for `id`, checking position `index` first. Mappers that emit
    /// their outputs in declaration order are found without a scan.
    pub fn get_at(&self, index: usize, id: &str) -> Option<&[f64]> {
        match self.entries.get(index) {
            Some((k, v)) if *k == id => Some(v.as_slice()),
            _ => self.get(id),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PixelResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, values) in &self.entries {
            map.serialize_entry(id, values)?;
        }
        map.end()
    }
}

/// Plugin interface expected by the host: declare once, evaluate per pixel.
///
/// Implementations must be pure. The host may call `evaluate_pixel` from many
/// threads at once and in any order.
pub trait PixelMapper: Send + Sync {
    fn setup(&self) -> Setup;

    fn evaluate_pixel(&self, samples: &PixelSample) -> PixelResult;

    /// Output id to the input band it is taken from, in declaration order.
    fn routes(&self) -> Vec<(&'static str, InputBand)>;
}

struct OutputSpec {
    id: &'static str,
    source: InputBand,
    sample_type: SampleType,
}

const INPUTS: [InputBand; 3] = [InputBand::Vv, InputBand::Vh, InputBand::DataMask];

const OUTPUTS: [OutputSpec; 3] = [
    OutputSpec {
        id: "VV",
        source: InputBand::Vv,
        sample_type: SampleType::Float32,
    },
    OutputSpec {
        id: "VH",
        source: InputBand::Vh,
        sample_type: SampleType::Float32,
    },
    OutputSpec {
        id: "MASK",
        source: InputBand::DataMask,
        sample_type: SampleType::UInt8,
    },
];

/// Sentinel-1 dual-pol ingest mapper: VV, VH and dataMask passed through into
/// three single-band outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualPolPassThrough;

impl PixelMapper for DualPolPassThrough {
    fn setup(&self) -> Setup {
        Setup {
            input: INPUTS.to_vec(),
            output: OUTPUTS
                .iter()
                .map(|o| BandDeclaration::new(o.id, 1, o.sample_type))
                .collect(),
        }
    }

    fn evaluate_pixel(&self, samples: &PixelSample) -> PixelResult {
        let mut result = PixelResult::with_capacity(OUTPUTS.len());
        for o in &OUTPUTS {
            result.push(o.id, vec![samples.get(o.source)]);
        }
        result
    }

    fn routes(&self) -> Vec<(&'static str, InputBand)> {
        OUTPUTS.iter().map(|o| (o.id, o.source)).collect()
    }
}
