//! No-data-aware descriptive statistics
//!
//! Summary statistics over the finite subset of a band. The standard
//! deviation is the population form, matching what the upstream SAR
//! processing chain reports for calibrated backscatter clips.

use crate::stats::band::Band;

/// Descriptive statistics for one band
#[derive(Debug, Clone, Copy)]
pub struct BandStats {
    /// Mean of the finite samples
    pub mean: f64,
    /// Population standard deviation of the finite samples
    pub std_dev: f64,
    /// Smallest finite sample
    pub min: f64,
    /// Largest finite sample
    pub max: f64,
    /// Median of the finite samples
    pub median: f64,
    /// Coefficient of variation (std_dev / mean)
    ///
    /// A ratio, so it goes non-finite when the mean is near zero; the
    /// value is carried through to the output as-is.
    pub var_coef: f64,
}

impl BandStats {
    /// Compute statistics over the finite subset of a band
    ///
    /// # Arguments
    /// * `band` - The band to summarize
    ///
    /// # Returns
    /// The statistics, or None when the band has no finite samples
    pub fn compute(band: &Band) -> Option<Self> {
        let values = band.finite_values();
        Self::from_samples(&values)
    }

    /// Compute statistics over a slice of finite samples
    ///
    /// # Arguments
    /// * `values` - Finite sample values
    ///
    /// # Returns
    /// The statistics, or None when the slice is empty
    pub fn from_samples(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len() as f64;
        let sum: f64 = values.iter().sum();
        let mean = sum / count;

        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
        let std_dev = var.sqrt();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        Some(BandStats {
            mean,
            std_dev,
            min,
            max,
            median: median_of(values),
            var_coef: std_dev / mean,
        })
    }
}

/// Median of a sample slice
///
/// Even-sized slices take the midpoint of the two central values.
fn median_of(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}
