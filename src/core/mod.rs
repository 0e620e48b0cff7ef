//! Core building blocks: the pixel mapper contract, its evalscript rendering,
//! batch request construction, ingest parameters, and host-side block
//! processing. These are consumed by the high-level `api` module.
pub mod evalscript;
pub mod mapper;
pub mod params;
pub mod processing;
pub mod request;
