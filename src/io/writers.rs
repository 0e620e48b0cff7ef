//! Raster writers for encoded output bands.
pub mod tiff;

pub use self::tiff::{write_band_rasters, write_raster};
