//! Host-side evaluation of a mapper over co-registered raster blocks.
//!
//! Rows are evaluated in parallel and every pixel's result is encoded straight
//! into the raster of each declared band according to its `SampleType`.
//! Integer encodings round to nearest and saturate to the type range, `NaN`
//! becomes 0. A result that breaks the mapper's own declaration is an error.
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView2, ArrayViewMut1};
use tracing::{debug, info};

use crate::core::mapper::{BandDeclaration, PixelMapper, PixelResult, PixelSample};
use crate::error::{Error, Result};
use crate::types::SampleType;

/// One encoded single-band output raster.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    Int8(Array2<i8>),
    UInt8(Array2<u8>),
    Int16(Array2<i16>),
    UInt16(Array2<u16>),
    Float32(Array2<f32>),
}

impl Raster {
    /// (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Raster::Int8(a) => a.dim(),
            Raster::UInt8(a) => a.dim(),
            Raster::Int16(a) => a.dim(),
            Raster::UInt16(a) => a.dim(),
            Raster::Float32(a) => a.dim(),
        }
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            Raster::Int8(_) => SampleType::Int8,
            Raster::UInt8(_) => SampleType::UInt8,
            Raster::Int16(_) => SampleType::Int16,
            Raster::UInt16(_) => SampleType::UInt16,
            Raster::Float32(_) => SampleType::Float32,
        }
    }

    pub fn as_f32(&self) -> Option<&Array2<f32>> {
        match self {
            Raster::Float32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<&Array2<u8>> {
        match self {
            Raster::UInt8(a) => Some(a),
            _ => None,
        }
    }
}

/// Encoded outputs, in the mapper's declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct BandRasters {
    pub bands: Vec<(BandDeclaration, Raster)>,
}

impl BandRasters {
    pub fn get(&self, id: &str) -> Option<&Raster> {
        self.bands
            .iter()
            .find(|(decl, _)| decl.id == id)
            .map(|(_, raster)| raster)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.bands.iter().map(|(decl, _)| decl.id.as_str()).collect()
    }
}

fn check_shape(band: &str, expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected != actual {
        return Err(Error::ShapeMismatch {
            band: band.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn auto_unsupported(decl: &BandDeclaration) -> Error {
    Error::UnsupportedSampleLayout {
        id: decl.id.clone(),
        reason: "AUTO sample type has no fixed encoding".to_string(),
    }
}

fn check_declaration(decl: &BandDeclaration) -> Result<()> {
    if decl.bands != 1 {
        return Err(Error::UnsupportedSampleLayout {
            id: decl.id.clone(),
            reason: format!("{} channels declared, only single-band rasters are written", decl.bands),
        });
    }
    if decl.sample_type == SampleType::Auto {
        return Err(auto_unsupported(decl));
    }
    Ok(())
}

/// Mutable view of one output row, typed like its raster.
enum RowMut<'a> {
    Int8(ArrayViewMut1<'a, i8>),
    UInt8(ArrayViewMut1<'a, u8>),
    Int16(ArrayViewMut1<'a, i16>),
    UInt16(ArrayViewMut1<'a, u16>),
    Float32(ArrayViewMut1<'a, f32>),
}

impl RowMut<'_> {
    // `as` from f64 saturates and maps NaN to 0.
    fn set(&mut self, col: usize, v: f64) {
        match self {
            RowMut::Int8(row) => row[col] = v.round() as i8,
            RowMut::UInt8(row) => row[col] = v.round() as u8,
            RowMut::Int16(row) => row[col] = v.round() as i16,
            RowMut::UInt16(row) => row[col] = v.round() as u16,
            RowMut::Float32(row) => row[col] = v as f32,
        }
    }
}

impl Raster {
    fn zeros(decl: &BandDeclaration, shape: (usize, usize)) -> Result<Self> {
        let raster = match decl.sample_type {
            SampleType::Float32 => Raster::Float32(Array2::zeros(shape)),
            SampleType::UInt8 => Raster::UInt8(Array2::zeros(shape)),
            SampleType::Int8 => Raster::Int8(Array2::zeros(shape)),
            SampleType::UInt16 => Raster::UInt16(Array2::zeros(shape)),
            SampleType::Int16 => Raster::Int16(Array2::zeros(shape)),
            SampleType::Auto => return Err(auto_unsupported(decl)),
        };
        Ok(raster)
    }

    fn rows_mut(&mut self) -> Vec<RowMut<'_>> {
        match self {
            Raster::Int8(a) => a.rows_mut().into_iter().map(RowMut::Int8).collect(),
            Raster::UInt8(a) => a.rows_mut().into_iter().map(RowMut::UInt8).collect(),
            Raster::Int16(a) => a.rows_mut().into_iter().map(RowMut::Int16).collect(),
            Raster::UInt16(a) => a.rows_mut().into_iter().map(RowMut::UInt16).collect(),
            Raster::Float32(a) => a.rows_mut().into_iter().map(RowMut::Float32).collect(),
        }
    }
}

/// Checks one pixel's result against the declaration and writes it out.
fn encode_pixel(
    declared: &[BandDeclaration],
    result: &PixelResult,
    outputs: &mut [RowMut<'_>],
    (row, col): (usize, usize),
) -> Result<()> {
    if result.len() > declared.len() {
        let extra = result
            .ids()
            .into_iter()
            .find(|id| !declared.iter().any(|d| d.id == *id));
        if let Some(extra) = extra {
            return Err(Error::UnknownBand(extra.to_string()));
        }
    }
    for (index, (decl, out)) in declared.iter().zip(outputs.iter_mut()).enumerate() {
        let values = result
            .get_at(index, &decl.id)
            .ok_or_else(|| Error::UnknownBand(decl.id.clone()))?;
        if values.len() != decl.bands {
            return Err(Error::UnsupportedSampleLayout {
                id: decl.id.clone(),
                reason: format!(
                    "pixel ({row}, {col}) has {} values, {} declared",
                    values.len(),
                    decl.bands
                ),
            });
        }
        out.set(col, values[0]);
    }
    Ok(())
}

/// Runs `mapper` over every pixel of the VV, VH and mask blocks and encodes
/// the declared outputs straight into preallocated rasters, one row per task.
pub fn evaluate_block<M: PixelMapper + ?Sized>(
    mapper: &M,
    vv: ArrayView2<f32>,
    vh: ArrayView2<f32>,
    mask: ArrayView2<u8>,
) -> Result<BandRasters> {
    let shape = vv.dim();
    check_shape("VH", shape, vh.dim())?;
    check_shape("dataMask", shape, mask.dim())?;

    let setup = mapper.setup();
    for decl in &setup.output {
        check_declaration(decl)?;
    }
    info!(
        "Evaluating {}x{} block into {} output bands",
        shape.1,
        shape.0,
        setup.output.len()
    );

    let mut rasters = setup
        .output
        .iter()
        .map(|decl| Raster::zeros(decl, shape))
        .collect::<Result<Vec<_>>>()?;

    {
        // Regroup band-major row views into one set of output rows per image row.
        let mut per_row: Vec<Vec<RowMut<'_>>> = (0..shape.0)
            .map(|_| Vec::with_capacity(rasters.len()))
            .collect();
        for raster in rasters.iter_mut() {
            for (r, row) in raster.rows_mut().into_iter().enumerate() {
                per_row[r].push(row);
            }
        }

        let declared = setup.output.as_slice();
        per_row
            .into_par_iter()
            .enumerate()
            .try_for_each(|(r, mut outputs)| -> Result<()> {
                let (vv_row, vh_row, mask_row) = (vv.row(r), vh.row(r), mask.row(r));
                for c in 0..shape.1 {
                    let sample = PixelSample::new(
                        f64::from(vv_row[c]),
                        f64::from(vh_row[c]),
                        f64::from(mask_row[c]),
                    );
                    let result = mapper.evaluate_pixel(&sample);
                    encode_pixel(declared, &result, &mut outputs, (r, c))?;
                }
                Ok(())
            })?;
    }

    let bands = setup
        .output
        .into_iter()
        .zip(rasters)
        .inspect(|(decl, _)| debug!("Encoded band {} as {}", decl.id, decl.sample_type))
        .collect();
    Ok(BandRasters { bands })
}
