//! I/O layer: single-band TIFF readers for the VV, VH and dataMask inputs and
//! `writers` for the encoded output bands.
pub mod reader;
pub use reader::{read_band_f32, read_mask};

pub mod writers;
