//! Shared types and enums used across s1bands.
//! Includes the band vocabulary (`InputBand`, `SampleType`) and the Sentinel-1
//! GRD acquisition filters (`BackscatterCoefficient`, `PolarizationFilter`,
//! `AcquisitionMode`, `ResolutionFilter`).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Numeric storage format of one output channel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleType {
    Int8,
    #[serde(rename = "UINT8")]
    UInt8,
    Int16,
    #[serde(rename = "UINT16")]
    UInt16,
    Float32,
    Auto,
}

impl SampleType {
    /// Bytes per stored sample; `Auto` leaves the choice to the host.
    pub fn bytes_per_sample(self) -> Option<usize> {
        match self {
            SampleType::Int8 | SampleType::UInt8 => Some(1),
            SampleType::Int16 | SampleType::UInt16 => Some(2),
            SampleType::Float32 => Some(4),
            SampleType::Auto => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SampleType::Int8 => "INT8",
            SampleType::UInt8 => "UINT8",
            SampleType::Int16 => "INT16",
            SampleType::UInt16 => "UINT16",
            SampleType::Float32 => "FLOAT32",
            SampleType::Auto => "AUTO",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input bands requested from the Sentinel-1 GRD collection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum InputBand {
    #[serde(rename = "VV")]
    Vv,
    #[serde(rename = "VH")]
    Vh,
    #[serde(rename = "dataMask")]
    DataMask,
}

impl InputBand {
    pub fn as_str(self) -> &'static str {
        match self {
            InputBand::Vv => "VV",
            InputBand::Vh => "VH",
            InputBand::DataMask => "dataMask",
        }
    }
}

impl std::fmt::Display for InputBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InputBand {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VV" => Ok(InputBand::Vv),
            "VH" => Ok(InputBand::Vh),
            "dataMask" => Ok(InputBand::DataMask),
            other => Err(crate::Error::UnknownBand(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackscatterCoefficient {
    Beta0,
    #[default]
    Sigma0Ellipsoid,
    Gamma0Ellipsoid,
    Gamma0Terrain,
}

/// Polarization combination filter; `DV` is dual VV+VH.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolarizationFilter {
    #[default]
    Dv,
    Sv,
    Dh,
    Sh,
    Hh,
    Vv,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AcquisitionMode {
    #[default]
    Iw,
    Ew,
    Sm,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolutionFilter {
    #[default]
    High,
    Medium,
}
