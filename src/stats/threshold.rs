//! Adaptive binarization thresholds with fallback
//!
//! The primary threshold is the sample mean, which is cheap and valid
//! for clips with reasonable contrast. Near-constant backscatter breaks
//! it, so the histogram-based Otsu threshold recovers those cases. When
//! both tiers are undefined for a band the region is degenerate and the
//! caller skips it.

use log::warn;

use crate::stats::errors::{BandRole, StatsError, StatsResult};

/// Number of histogram bins for the Otsu threshold
const OTSU_BINS: usize = 256;

/// Mean-based binarization threshold
///
/// # Arguments
/// * `samples` - Finite sample values
///
/// # Returns
/// The sample mean, or None when the slice is empty or the mean is
/// not finite
pub fn mean_threshold(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    mean.is_finite().then_some(mean)
}

/// Otsu binarization threshold over a 256-bin histogram
///
/// Scans every candidate split for the one maximizing between-class
/// variance. Undefined when the samples carry fewer than two distinct
/// values, since a single-binned histogram has nothing to split.
///
/// # Arguments
/// * `samples` - Finite sample values
///
/// # Returns
/// The threshold in sample units, or None when undefined
pub fn otsu_threshold(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in samples {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    if !(hi - lo).is_finite() || hi <= lo {
        return None;
    }

    // Populate histogram
    let scale = (OTSU_BINS - 1) as f64 / (hi - lo);
    let mut histogram = vec![0u64; OTSU_BINS];
    for &v in samples {
        let bin = ((v - lo) * scale) as usize;
        histogram[bin.min(OTSU_BINS - 1)] += 1;
    }

    let total = samples.len() as f64;
    let mut sum = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum += i as f64 * count as f64;
    }

    let mut sum_b = 0.0;
    let mut weight_b = 0.0;
    let mut max_variance = 0.0;
    let mut best_bin = 0.0;

    for (i, &count) in histogram.iter().enumerate() {
        weight_b += count as f64;
        if weight_b == 0.0 {
            continue;
        }
        let weight_f = total - weight_b;
        if weight_f == 0.0 {
            break;
        }

        sum_b += i as f64 * count as f64;
        let mean_b = sum_b / weight_b;
        let mean_f = (sum - sum_b) / weight_f;
        let variance = weight_b * weight_f * (mean_b - mean_f) * (mean_b - mean_f);

        if variance > max_variance {
            max_variance = variance;
            best_bin = i as f64;
        }
    }

    // Map the winning bin back to sample units
    Some(lo + best_bin / scale)
}

/// Two-tier adaptive threshold for one band
///
/// Tries the mean threshold first and falls back to Otsu when it is
/// undefined. The fallback path is logged, so degenerate clips show up
/// in the run log even when the fallback recovers them.
///
/// # Arguments
/// * `samples` - Finite sample values of the band
/// * `band` - Which band the samples came from, for diagnostics
///
/// # Returns
/// The threshold, or a DegenerateStatistics error naming the band when
/// both tiers are undefined
pub fn adaptive_threshold(samples: &[f64], band: BandRole) -> StatsResult<f64> {
    if let Some(threshold) = mean_threshold(samples) {
        return Ok(threshold);
    }

    warn!("Mean threshold undefined for {} band, falling back to Otsu", band);
    otsu_threshold(samples).ok_or(StatsError::DegenerateStatistics { band })
}
