//! Host-side processing of whole raster blocks.
pub mod block;
