//! Single-band TIFF readers for the VV, VH and dataMask inputs.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::error::{Error, Result};

fn open_gray(path: &Path) -> Result<(Decoder<BufReader<File>>, (usize, usize))> {
    let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;
    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(Error::UnsupportedSampleLayout {
                id: path.display().to_string(),
                reason: format!("expected a single-band raster, found {:?}", other),
            });
        }
    }
    let (width, height) = decoder.dimensions()?;
    debug!("Opened {:?}: {}x{}", path, width, height);
    Ok((decoder, (height as usize, width as usize)))
}

fn to_array<T>(path: &Path, shape: (usize, usize), data: Vec<T>) -> Result<Array2<T>> {
    Array2::from_shape_vec(shape, data).map_err(|e| Error::UnsupportedSampleLayout {
        id: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn unsupported_format(path: &Path) -> Error {
    Error::UnsupportedSampleLayout {
        id: path.display().to_string(),
        reason: "unsupported sample format".to_string(),
    }
}

/// Reads a backscatter band as `f32`, widening or narrowing other numeric
/// sample formats.
pub fn read_band_f32(path: &Path) -> Result<Array2<f32>> {
    let (mut decoder, shape) = open_gray(path)?;
    let data: Vec<f32> = match decoder.read_image()? {
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        _ => return Err(unsupported_format(path)),
    };
    to_array(path, shape, data)
}

/// Reads a validity mask as 0/1 bytes; any non-zero sample counts as valid.
pub fn read_mask(path: &Path) -> Result<Array2<u8>> {
    let (mut decoder, shape) = open_gray(path)?;
    let data: Vec<u8> = match decoder.read_image()? {
        DecodingResult::U8(v) => v.into_iter().map(|x| u8::from(x != 0)).collect(),
        DecodingResult::U16(v) => v.into_iter().map(|x| u8::from(x != 0)).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| u8::from(x != 0)).collect(),
        DecodingResult::I8(v) => v.into_iter().map(|x| u8::from(x != 0)).collect(),
        DecodingResult::I16(v) => v.into_iter().map(|x| u8::from(x != 0)).collect(),
        _ => return Err(unsupported_format(path)),
    };
    to_array(path, shape, data)
}
