//! Sobel gradient and border statistics
//!
//! First-derivative analysis over the background band. The gradient
//! magnitude field and the edge-response map come from the same 3x3
//! Sobel kernels (the edge map scale-normalized), and border statistics
//! are taken over gradient magnitudes at pixels with a strictly
//! positive edge response.
//!
//! Boundaries replicate the nearest edge pixel. Any window touching a
//! no-data pixel yields NaN, so masked areas never contribute to the
//! border statistics.

use crate::stats::band::Band;
use crate::stats::descriptive::BandStats;

/// Border-gradient statistics for one band
///
/// All three fields are NaN when the edge map has no positive response,
/// which is the expected outcome for a perfectly smooth background and
/// not a failure.
#[derive(Debug, Clone, Copy)]
pub struct BorderGradientStats {
    /// Mean gradient magnitude over border pixels
    pub mean: f64,
    /// Population standard deviation over border pixels
    pub std_dev: f64,
    /// Maximum gradient magnitude over border pixels
    pub max: f64,
}

impl BorderGradientStats {
    /// The not-available marker triple
    fn unavailable() -> Self {
        BorderGradientStats {
            mean: f64::NAN,
            std_dev: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Sample a band with replicate (clamp-to-edge) boundary handling
#[inline]
fn sample_clamped(band: &Band, x: i64, y: i64) -> f64 {
    let cx = x.clamp(0, band.width() as i64 - 1) as usize;
    let cy = y.clamp(0, band.height() as i64 - 1) as usize;
    band.get(cx, cy).unwrap_or(f64::NAN)
}

/// Horizontal and vertical Sobel responses at one pixel
fn sobel_at(band: &Band, x: usize, y: usize) -> (f64, f64) {
    let g = |dx: i64, dy: i64| sample_clamped(band, x as i64 + dx, y as i64 + dy);

    let gx = -g(-1, -1) + g(1, -1) - 2.0 * g(-1, 0) + 2.0 * g(1, 0) - g(-1, 1) + g(1, 1);
    let gy = -g(-1, -1) - 2.0 * g(0, -1) - g(1, -1) + g(-1, 1) + 2.0 * g(0, 1) + g(1, 1);

    (gx, gy)
}

/// Per-pixel gradient magnitude over a band
///
/// Combines the horizontal and vertical Sobel derivatives into a
/// Euclidean norm per pixel. NaN wherever the 3x3 window touches
/// no-data.
///
/// # Arguments
/// * `band` - Input band
///
/// # Returns
/// A band of the same shape holding gradient magnitudes
pub fn gradient_magnitude(band: &Band) -> Band {
    let mut out = Band::filled(band.width(), band.height(), 0.0);
    for y in 0..band.height() {
        for x in 0..band.width() {
            let (gx, gy) = sobel_at(band, x, y);
            out.set(x, y, gx.hypot(gy));
        }
    }
    out
}

/// Sobel edge-response map over a band
///
/// Same kernels as the gradient, scale-normalized so the response is
/// independent of the kernel weights. Downstream only its strict
/// positivity is consumed.
///
/// # Arguments
/// * `band` - Input band
///
/// # Returns
/// A band of the same shape holding edge responses
pub fn edge_response(band: &Band) -> Band {
    let mut out = Band::filled(band.width(), band.height(), 0.0);
    for y in 0..band.height() {
        for x in 0..band.width() {
            let (gx, gy) = sobel_at(band, x, y);
            out.set(x, y, (gx / 8.0).hypot(gy / 8.0));
        }
    }
    out
}

/// Border-gradient statistics for a band
///
/// Selects gradient magnitudes at pixels whose edge response is
/// strictly positive and summarizes that subset. NaN responses fail the
/// positivity test, so no-data areas are excluded along the way.
///
/// # Arguments
/// * `band` - Input band (the background of a region)
///
/// # Returns
/// Mean, standard deviation and max over the border pixels, or the NaN
/// triple when no pixel qualifies
pub fn border_gradient_stats(band: &Band) -> BorderGradientStats {
    let magnitude = gradient_magnitude(band);
    let edges = edge_response(band);

    let mut border = Vec::new();
    for y in 0..band.height() {
        for x in 0..band.width() {
            let edge = edges.get(x, y).unwrap_or(f64::NAN);
            if edge > 0.0 {
                if let Some(value) = magnitude.get(x, y) {
                    if value.is_finite() {
                        border.push(value);
                    }
                }
            }
        }
    }

    match BandStats::from_samples(&border) {
        Some(stats) => BorderGradientStats {
            mean: stats.mean,
            std_dev: stats.std_dev,
            max: stats.max,
        },
        None => BorderGradientStats::unavailable(),
    }
}
