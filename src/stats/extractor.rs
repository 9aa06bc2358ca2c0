//! Region feature extraction
//!
//! The algorithmic payload of the crate: one call per candidate region,
//! pure computation over the two bands supplied by the caller. Hard
//! failures (empty bands, degenerate statistics) come back as errors so
//! the aggregator can skip the region; expected-undefined outcomes
//! (no border pixels, near-zero-mean ratios) come back as NaN fields
//! inside a valid record.

use log::debug;

use crate::classification::{ClassLookup, RegionId};
use crate::stats::band::Band;
use crate::stats::descriptive::BandStats;
use crate::stats::errors::{BandRole, StatsError, StatsResult};
use crate::stats::gradient::border_gradient_stats;
use crate::stats::record::FeatureRecord;
use crate::stats::threshold::adaptive_threshold;

/// Extract the feature record for one candidate region
///
/// # Arguments
/// * `foreground` - Polygon clip band, exterior masked to no-data
/// * `background` - Full-scene band, polygon interior masked to no-data
/// * `image_id` - Identifier of the scene the region was clipped from
/// * `clip_name` - Clip file name or composite region identifier
/// * `classes` - Classification lookup keyed by base region id
///
/// # Returns
/// The assembled record, or an error when the region is unusable
pub fn extract_features(
    foreground: &Band,
    background: &Band,
    image_id: &str,
    clip_name: &str,
    classes: &ClassLookup,
) -> StatsResult<FeatureRecord> {
    let region = RegionId::from_clip_name(clip_name);
    debug!("Extracting features for region {} of {}", region.id_poly(), image_id);

    let fg_values = finite_or_empty(foreground, BandRole::Foreground)?;
    let bg_values = finite_or_empty(background, BandRole::Background)?;

    // from_samples only fails on an empty slice, which the guards above
    // already rule out
    let fg_stats = BandStats::from_samples(&fg_values)
        .ok_or(StatsError::EmptyInput(BandRole::Foreground))?;
    let bg_stats = BandStats::from_samples(&bg_values)
        .ok_or(StatsError::EmptyInput(BandRole::Background))?;

    let fg_thres = adaptive_threshold(&fg_values, BandRole::Foreground)?;
    let bg_thres = adaptive_threshold(&bg_values, BandRole::Background)?;

    // Oil slicks show up as a low-backscatter trough, so the strongest
    // contrast pairs the background mean with the foreground minimum
    let max_contrast = (bg_stats.mean - fg_stats.min).abs();
    let mean_contrast = (bg_stats.mean - fg_stats.mean).abs();
    let power_mean_ratio = fg_stats.mean / bg_stats.mean;

    let border = border_gradient_stats(background);

    let labels = classes.get(region.base_id());

    Ok(FeatureRecord {
        img_name: image_id.to_string(),
        img_number: leading_number(image_id),
        id_poly: region.id_poly().to_string(),
        classe: labels.classe,
        subclasse: labels.subclasse,

        area: String::new(),
        perim: String::new(),
        complexity_measure: String::new(),
        spreading: String::new(),
        shape_factor: String::new(),
        hu_moment: String::new(),
        circularity: String::new(),

        fg_mean: fg_stats.mean,
        fg_std: fg_stats.std_dev,
        fg_min: fg_stats.min,
        fg_max: fg_stats.max,
        fg_median: fg_stats.median,
        fg_var_coef: fg_stats.var_coef,
        fg_thres,
        bg_mean: bg_stats.mean,
        bg_std: bg_stats.std_dev,
        bg_min: bg_stats.min,
        bg_max: bg_stats.max,
        bg_median: bg_stats.median,
        bg_var_coef: bg_stats.var_coef,
        bg_thres,
        fg_bg_max_contrast: max_contrast,
        fg_bg_mean_contrast_ratio: mean_contrast,
        power_mean_ratio,
        border_grad_mean: border.mean,
        border_grad_std: border.std_dev,
        border_grad_max: border.max,
    })
}

/// The finite subset of a band, or an EmptyInput error naming the band
///
/// Guards both a zero-sized band and one that is technically non-empty
/// but entirely no-data.
fn finite_or_empty(band: &Band, role: BandRole) -> StatsResult<Vec<f64>> {
    if band.is_empty() {
        return Err(StatsError::EmptyInput(role));
    }
    let values = band.finite_values();
    if values.is_empty() {
        return Err(StatsError::EmptyInput(role));
    }
    Ok(values)
}

/// Leading decimal prefix of a scene identifier
///
/// Scene names in the catalog start with their image number
/// (e.g. "21 S1B_IW_GRDH_..."); identifiers without such a prefix yield
/// an empty string.
fn leading_number(image_id: &str) -> String {
    image_id
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}
