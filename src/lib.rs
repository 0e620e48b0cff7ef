#![doc = r#"
s1bands: Sentinel-1 dual-polarization band extraction.

The crate describes one small per-pixel contract used when ingesting Sentinel-1
GRD backscatter for flood mapping: take the `VV` and `VH` bands and the
`dataMask` validity band, and pass them through unchanged into three
single-band outputs, `VV` and `VH` stored as 32-bit floats and `MASK` stored as
8-bit unsigned integers.

Around that contract it provides what a host needs to use it: rendering it as a
Sentinel Hub evalscript, building the batch process request that carries it,
and evaluating it locally over co-registered raster blocks or TIFF files.

Declare and evaluate
--------------------
```rust
use s1bands::{declare, evaluate, PixelSample, SampleType};

let setup = declare();
assert_eq!(setup.output_ids(), vec!["VV", "VH", "MASK"]);
assert_eq!(setup.output[2].sample_type, SampleType::UInt8);

let result = evaluate(&PixelSample::new(0.0132, 0.0041, 1.0));
assert_eq!(result.get("VV"), Some(&[0.0132][..]));
assert_eq!(result.get("MASK"), Some(&[1.0][..]));
```

Build a batch request
---------------------
```rust
use s1bands::{build_batch_request, IngestParams};
use serde_json::json;

fn main() -> s1bands::Result<()> {
    let footprint = json!({
        "type": "Polygon",
        "coordinates": [[[-95.7, 38.4], [-94.4, 38.4], [-94.4, 40.3], [-95.7, 40.3], [-95.7, 38.4]]]
    });
    let request = build_batch_request(
        "US-KS-2019-05",
        footprint,
        "2019-05-22T00:00:00Z/2019-05-23T00:00:00Z",
        &IngestParams::default(),
    )?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
```

Extract bands from files
------------------------
```rust,no_run
use std::path::Path;

fn main() -> s1bands::Result<()> {
    let report = s1bands::extract_bands_to_dir(
        Path::new("/data/vv.tiff"),
        Path::new("/data/vh.tiff"),
        Path::new("/data/dataMask.tiff"),
        Path::new("/out"),
    )?;
    println!("{}x{} -> {:?}", report.width, report.height, report.outputs);
    Ok(())
}
```

Useful modules
--------------
- [`api`]: high-level entry points.
- [`core`]: the `PixelMapper` trait, evalscript rendering, batch requests, block evaluation.
- [`io`]: TIFF readers and writers.
- [`types`]: band and acquisition enums.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Types
pub use crate::core::mapper::{
    BandDeclaration, DualPolPassThrough, PixelMapper, PixelResult, PixelSample, Setup,
};
pub use crate::core::params::IngestParams;
pub use crate::core::processing::block::{BandRasters, Raster};
pub use crate::core::request::{BatchRequest, EventFootprint, TimeRange};
pub use crate::error::{Error, Result};
pub use crate::types::{
    AcquisitionMode, BackscatterCoefficient, InputBand, PolarizationFilter, ResolutionFilter,
    SampleType,
};

// High-level API re-exports
pub use crate::api::{
    ExtractionReport, build_batch_request, build_event_request, declare, evaluate,
    extract_bands, extract_bands_to_dir, render_default_evalscript,
};
