use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use tiff::encoder::{TiffEncoder, colortype};
use tracing::info;

use crate::core::processing::block::{BandRasters, Raster};
use crate::error::Result;

fn row_major<T: Copy>(data: &Array2<T>) -> Vec<T> {
    data.iter().copied().collect()
}

/// Writes `raster` as a single-band TIFF whose sample format matches its
/// encoding.
pub fn write_raster(output: &Path, raster: &Raster) -> Result<()> {
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(output)?))?;
    let (rows, cols) = raster.dim();
    let (width, height) = (cols as u32, rows as u32);
    match raster {
        Raster::Float32(a) => {
            encoder.write_image::<colortype::Gray32Float>(width, height, &row_major(a))?
        }
        Raster::UInt8(a) => encoder.write_image::<colortype::Gray8>(width, height, &row_major(a))?,
        Raster::Int8(a) => encoder.write_image::<colortype::GrayI8>(width, height, &row_major(a))?,
        Raster::UInt16(a) => {
            encoder.write_image::<colortype::Gray16>(width, height, &row_major(a))?
        }
        Raster::Int16(a) => {
            encoder.write_image::<colortype::GrayI16>(width, height, &row_major(a))?
        }
    }
    Ok(())
}

/// Writes every band to `<output_dir>/<id>.tiff`, in declaration order.
pub fn write_band_rasters(output_dir: &Path, rasters: &BandRasters) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::with_capacity(rasters.bands.len());
    for (decl, raster) in &rasters.bands {
        let path = output_dir.join(format!("{}.tiff", decl.id));
        write_raster(&path, raster)?;
        info!("Wrote {} ({}) to {:?}", decl.id, decl.sample_type, path);
        written.push(path);
    }
    Ok(written)
}
