//! Tests for the Sobel gradient and border statistics

use crate::stats::gradient::{border_gradient_stats, edge_response, gradient_magnitude};

use super::test_utils::{band_from_rows, reference_background, uniform_band};

#[test]
fn test_uniform_band_has_zero_gradient() {
    let band = uniform_band(6, 6, 10.0);
    let magnitude = gradient_magnitude(&band);

    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(magnitude.get(x, y), Some(0.0));
        }
    }
}

#[test]
fn test_uniform_band_yields_unavailable_border_stats() {
    // A perfectly smooth background has no positive edge response;
    // that is the not-available marker, not an error
    let band = uniform_band(6, 6, 10.0);
    let border = border_gradient_stats(&band);

    assert!(border.mean.is_nan());
    assert!(border.std_dev.is_nan());
    assert!(border.max.is_nan());
}

#[test]
fn test_step_edge_produces_border_pixels() {
    let band = band_from_rows(&[
        &[0.0, 0.0, 10.0, 10.0],
        &[0.0, 0.0, 10.0, 10.0],
        &[0.0, 0.0, 10.0, 10.0],
        &[0.0, 0.0, 10.0, 10.0],
    ]);

    let edges = edge_response(&band);
    assert!(edges.get(1, 1).unwrap() > 0.0);

    let border = border_gradient_stats(&band);
    assert!(border.mean > 0.0);
    assert!(border.max >= border.mean);
    assert!(border.std_dev.is_finite());
}

#[test]
fn test_gradient_magnitude_on_vertical_step() {
    let band = band_from_rows(&[
        &[0.0, 0.0, 10.0, 10.0],
        &[0.0, 0.0, 10.0, 10.0],
        &[0.0, 0.0, 10.0, 10.0],
    ]);

    // Interior column next to the step: gx sums to 40, gy to 0
    let magnitude = gradient_magnitude(&band);
    assert_eq!(magnitude.get(1, 1), Some(40.0));
}

#[test]
fn test_no_data_propagates_through_windows() {
    let nan = f64::NAN;
    let band = band_from_rows(&[
        &[1.0, 2.0, 3.0],
        &[4.0, nan, 6.0],
        &[7.0, 8.0, 9.0],
    ]);

    let magnitude = gradient_magnitude(&band);
    // Every 3x3 window touches the center hole
    for y in 0..3 {
        for x in 0..3 {
            assert!(magnitude.get(x, y).unwrap().is_nan());
        }
    }
}

#[test]
fn test_masked_hole_excludes_border_stats() {
    // Reference background: uniform 10 with a 3x3 hole. Windows near
    // the hole go NaN, everything else is flat, so no border pixels
    // survive the positivity test.
    let band = reference_background();
    let border = border_gradient_stats(&band);

    assert!(border.mean.is_nan());
    assert!(border.std_dev.is_nan());
    assert!(border.max.is_nan());
}
