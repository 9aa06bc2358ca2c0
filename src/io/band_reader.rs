//! Band file loading
//!
//! The cropping step upstream exports each clip as a plain array file,
//! either CSV (a `row/col` header line, then one row per raster row
//! with the row index in the first column) or NPY version 1.0 with a
//! little-endian float dtype. This module is the read side of that
//! interchange; the format is chosen by file extension.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::stats::band::Band;
use crate::stats::errors::{StatsError, StatsResult};

/// Load a band from a file, dispatching on the extension
///
/// # Arguments
/// * `path` - Path to a `.csv` or `.npy` band file
///
/// # Returns
/// The loaded band or an error
pub fn load_band(path: &Path) -> StatsResult<Band> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => load_csv_band(path),
        "npy" => load_npy_band(path),
        _ => Err(StatsError::InvalidBandFile(format!(
            "{}: unsupported band format '{}'",
            path.display(),
            ext
        ))),
    }
}

/// Load a band from an array CSV export
fn load_csv_band(path: &Path) -> StatsResult<Band> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut width = None;
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let first = fields.next().unwrap_or("");

        // Header line carries column numbers after the row/col label
        if first == "row/col" {
            width = Some(fields.count());
            continue;
        }

        let row: Vec<f64> = fields
            .map(|f| parse_sample(f, path))
            .collect::<StatsResult<_>>()?;

        if let Some(w) = width {
            if row.len() != w {
                return Err(StatsError::InvalidBandFile(format!(
                    "{}: row {} has {} values, expected {}",
                    path.display(), first, row.len(), w
                )));
            }
        } else {
            width = Some(row.len());
        }
        rows.push(row);
    }

    let width = width.unwrap_or(0);
    let height = rows.len();
    let data: Vec<f64> = rows.into_iter().flatten().collect();

    debug!("Loaded {}x{} CSV band from {}", width, height, path.display());
    Band::new(width, height, data)
}

/// Parse one CSV sample, treating blanks and nan as no-data
fn parse_sample(field: &str, path: &Path) -> StatsResult<f64> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| {
        StatsError::InvalidBandFile(format!(
            "{}: not a number: '{}'",
            path.display(), field
        ))
    })
}

/// Load a band from an NPY version 1.0 file
///
/// Accepts C-ordered little-endian float arrays (`<f8` or `<f4`) with
/// a two-dimensional shape.
fn load_npy_band(path: &Path) -> StatsResult<Band> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic)?;
    if &magic != b"\x93NUMPY" {
        return Err(StatsError::InvalidBandFile(format!(
            "{}: not an NPY file", path.display()
        )));
    }

    let mut version = [0u8; 2];
    reader.read_exact(&mut version)?;
    if version[0] != 1 {
        return Err(StatsError::InvalidBandFile(format!(
            "{}: unsupported NPY version {}.{}",
            path.display(), version[0], version[1]
        )));
    }

    let header_len = reader.read_u16::<LittleEndian>()? as usize;
    let mut header = vec![0u8; header_len];
    reader.read_exact(&mut header)?;
    let header = String::from_utf8_lossy(&header);

    if header.contains("'fortran_order': True") {
        return Err(StatsError::InvalidBandFile(format!(
            "{}: Fortran-ordered arrays are not supported", path.display()
        )));
    }

    let wide = if header.contains("'<f8'") {
        true
    } else if header.contains("'<f4'") {
        false
    } else {
        return Err(StatsError::InvalidBandFile(format!(
            "{}: expected '<f8' or '<f4' dtype in header: {}",
            path.display(), header.trim()
        )));
    };

    let (height, width) = parse_npy_shape(&header, path)?;

    let count = width * height;
    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        let value = if wide {
            reader.read_f64::<LittleEndian>()?
        } else {
            reader.read_f32::<LittleEndian>()? as f64
        };
        data.push(value);
    }

    debug!("Loaded {}x{} NPY band from {}", width, height, path.display());
    Band::new(width, height, data)
}

/// Pull the (rows, cols) shape tuple out of an NPY header dict
fn parse_npy_shape(header: &str, path: &Path) -> StatsResult<(usize, usize)> {
    let bad_shape = || {
        StatsError::InvalidBandFile(format!(
            "{}: malformed NPY shape in header: {}",
            path.display(), header.trim()
        ))
    };

    let start = header.find("'shape':").ok_or_else(&bad_shape)?;
    let rest = &header[start..];
    let open = rest.find('(').ok_or_else(&bad_shape)?;
    let close = rest.find(')').ok_or_else(&bad_shape)?;
    if close <= open {
        return Err(bad_shape());
    }

    let dims: Vec<usize> = rest[open + 1..close]
        .split(',')
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| d.parse::<usize>().map_err(|_| bad_shape()))
        .collect::<StatsResult<_>>()?;

    match dims.as_slice() {
        [rows, cols] => Ok((*rows, *cols)),
        _ => Err(bad_shape()),
    }
}
