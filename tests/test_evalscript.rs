use s1bands::core::evalscript::render_evalscript;
use s1bands::{
    BandDeclaration, DualPolPassThrough, Error, InputBand, PixelMapper, PixelResult, PixelSample,
    SampleType, Setup, render_default_evalscript,
};

const EXPECTED: &str = r#"//VERSION=3
function setup() {
  return {
    input: ["VV", "VH", "dataMask"],
    output: [{
      id: "VV",
      bands: 1,
      sampleType: "FLOAT32"
    }, {
      id: "VH",
      bands: 1,
      sampleType: "FLOAT32"
    }, {
      id: "MASK",
      bands: 1,
      sampleType: "UINT8"
    }]
  };
}

function evaluatePixel(samples) {
  return {
    VV: [samples.VV],
    VH: [samples.VH],
    MASK: [samples.dataMask]
  };
}
"#;

#[test]
fn test_dual_pol_evalscript() {
    let script = render_default_evalscript().unwrap();
    assert_eq!(script, EXPECTED);
}

#[test]
fn test_render_is_stable() {
    let a = render_evalscript(&DualPolPassThrough).unwrap();
    let b = render_evalscript(&DualPolPassThrough).unwrap();
    assert_eq!(a, b);
}

struct VhOnly {
    route: bool,
    bands: usize,
}

impl PixelMapper for VhOnly {
    fn setup(&self) -> Setup {
        Setup {
            input: vec![InputBand::Vh],
            output: vec![BandDeclaration::new("CROSS", self.bands, SampleType::UInt16)],
        }
    }

    fn evaluate_pixel(&self, samples: &PixelSample) -> PixelResult {
        let mut r = PixelResult::with_capacity(1);
        r.push("CROSS", vec![samples.vh]);
        r
    }

    fn routes(&self) -> Vec<(&'static str, InputBand)> {
        if self.route {
            vec![("CROSS", InputBand::Vh)]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn test_custom_mapper_renders_its_own_contract() {
    let script = render_evalscript(&VhOnly {
        route: true,
        bands: 1,
    })
    .unwrap();
    assert!(script.contains(r#"input: ["VH"],"#));
    assert!(script.contains(r#"sampleType: "UINT16""#));
    assert!(script.contains("CROSS: [samples.VH]"));
}

#[test]
fn test_missing_route_is_rejected() {
    let err = render_evalscript(&VhOnly {
        route: false,
        bands: 1,
    })
    .unwrap_err();
    assert!(matches!(err, Error::UnknownBand(id) if id == "CROSS"));
}

#[test]
fn test_multi_channel_output_is_rejected() {
    let err = render_evalscript(&VhOnly {
        route: true,
        bands: 3,
    })
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedSampleLayout { .. }));
}
