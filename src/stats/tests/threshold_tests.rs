//! Tests for the two-tier adaptive threshold

use crate::stats::errors::{BandRole, StatsError};
use crate::stats::threshold::{adaptive_threshold, mean_threshold, otsu_threshold};

#[test]
fn test_mean_threshold_is_sample_mean() {
    let samples = [2.0, 4.0, 9.0];
    assert_eq!(mean_threshold(&samples), Some(5.0));
}

#[test]
fn test_mean_threshold_accepts_constant_samples() {
    // A constant clip still binarizes at its own level; the reference
    // scenario depends on this succeeding
    let samples = [5.0; 5];
    assert_eq!(mean_threshold(&samples), Some(5.0));
}

#[test]
fn test_mean_threshold_undefined_for_empty() {
    assert_eq!(mean_threshold(&[]), None);
}

#[test]
fn test_mean_threshold_undefined_for_overflowing_mean() {
    let samples = [f64::MAX; 4];
    assert_eq!(mean_threshold(&samples), None);
}

#[test]
fn test_otsu_threshold_separates_bimodal_clusters() {
    let mut samples = vec![1.0; 40];
    samples.extend(std::iter::repeat(9.0).take(40));

    // The winning split ends the background class at the lower
    // cluster, so binarizing at `v > threshold` separates the two
    let threshold = otsu_threshold(&samples).unwrap();
    assert!((1.0..9.0).contains(&threshold),
            "threshold {} should split the clusters", threshold);
}

#[test]
fn test_otsu_threshold_undefined_for_single_value() {
    assert_eq!(otsu_threshold(&[7.0; 10]), None);
}

#[test]
fn test_otsu_threshold_undefined_for_empty() {
    assert_eq!(otsu_threshold(&[]), None);
}

#[test]
fn test_adaptive_threshold_takes_primary_tier() {
    let samples = [2.0, 4.0, 9.0];
    let threshold = adaptive_threshold(&samples, BandRole::Foreground).unwrap();
    assert_eq!(threshold, 5.0);
}

#[test]
fn test_adaptive_threshold_degenerate_names_band() {
    // Mean overflows and the histogram is single-binned, so both
    // tiers are undefined and the failure must name the band
    let samples = [f64::MAX; 4];
    let err = adaptive_threshold(&samples, BandRole::Background).unwrap_err();

    match err {
        StatsError::DegenerateStatistics { band } => {
            assert_eq!(band, BandRole::Background);
        }
        other => panic!("expected DegenerateStatistics, got {}", other),
    }
}

#[test]
fn test_degenerate_error_message_names_both_methods() {
    let err = StatsError::DegenerateStatistics { band: BandRole::Foreground };
    let message = err.to_string();
    assert!(message.contains("foreground"));
    assert!(message.contains("mean"));
    assert!(message.contains("Otsu"));
}
