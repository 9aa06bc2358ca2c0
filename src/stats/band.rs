//! Single-band raster container
//!
//! A band is a row-major grid of f64 samples where NaN is the no-data
//! sentinel. Foreground and background clips for one region share shape
//! and georeferencing upstream; the extractor only ever reads them.

use crate::stats::errors::{StatsError, StatsResult};

/// One single-band floating-point raster
///
/// Pixels outside the area of interest carry `f64::NAN` and are excluded
/// from every statistic computed over the band.
#[derive(Debug, Clone)]
pub struct Band {
    /// Width of the band (columns)
    width: usize,
    /// Height of the band (rows)
    height: usize,
    /// Sample values in row-major order
    data: Vec<f64>,
}

impl Band {
    /// Create a band from row-major samples
    ///
    /// # Arguments
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    /// * `data` - Samples in row-major order, NaN for no-data
    ///
    /// # Returns
    /// A new Band, or an error if the buffer does not match the shape
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> StatsResult<Self> {
        if data.len() != width * height {
            return Err(StatsError::GenericError(format!(
                "band buffer holds {} samples, shape {}x{} needs {}",
                data.len(), width, height, width * height
            )));
        }
        Ok(Band { width, height, data })
    }

    /// Build a band filled with a single value
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Band {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Width of the band (columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the band (rows)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the band holds no samples at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample at a position
    ///
    /// # Arguments
    /// * `x` - Column index
    /// * `y` - Row index
    ///
    /// # Returns
    /// The sample value, or None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Set the sample at a position, ignoring out-of-bounds writes
    ///
    /// Only used while assembling bands in readers and tests; the
    /// extractor itself never mutates a band.
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// All samples in row-major order, no-data included
    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    /// The finite (non-no-data) subset of the samples
    ///
    /// Statistics over a band are defined over exactly this subset.
    pub fn finite_values(&self) -> Vec<f64> {
        self.data.iter().copied().filter(|v| v.is_finite()).collect()
    }

    /// Whether the band contains at least one finite sample
    pub fn has_finite_values(&self) -> bool {
        self.data.iter().any(|v| v.is_finite())
    }
}
