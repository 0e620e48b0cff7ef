//! Crate-level error type and `Result` alias.
//! The pixel mapper itself never fails; these errors come from the host-side
//! adapters: block evaluation, raster I/O, configuration and request building.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Band shapes differ: {band} is {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        band: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Unsupported sample layout for band {id}: {reason}")]
    UnsupportedSampleLayout { id: String, reason: String },

    #[error("Invalid time range `{value}`: {reason}")]
    InvalidTimeRange { value: String, reason: String },

    #[error("Unknown band: {0}")]
    UnknownBand(String),
}

impl Error {
    pub fn invalid_argument<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }
}
