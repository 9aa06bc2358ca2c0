//! Batch aggregation over a clip directory
//!
//! Drives the extractor once per region. A region is one
//! `<id_poly>_background.<ext>` clip file paired with the full-scene
//! band `<id_poly>.<ext>` next to it. Per-region failures are logged
//! with the region identity and skipped; a single bad region never
//! aborts the run.

pub mod table;

pub use table::FeatureTable;

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use regex::Regex;

use crate::classification::ClassLookup;
use crate::io::load_band;
use crate::stats::errors::{StatsError, StatsResult};
use crate::stats::extractor::extract_features;
use crate::stats::record::FeatureRecord;
use crate::utils::progress::ProgressTracker;

/// One skipped region and the reason it was skipped
#[derive(Debug)]
pub struct RegionFailure {
    /// Clip file name of the failing region
    pub clip_name: String,
    /// Failure description, as logged
    pub reason: String,
}

/// Outcome of one batch run
#[derive(Debug)]
pub struct BatchSummary {
    /// Number of records appended to the table
    pub written: usize,
    /// Regions skipped, in iteration order
    pub failures: Vec<RegionFailure>,
}

impl BatchSummary {
    /// Total number of regions the run looked at
    pub fn total(&self) -> usize {
        self.written + self.failures.len()
    }
}

/// Run a batch over a directory of clip files
///
/// Scans for background clips, pairs each with its full-scene band,
/// extracts features and appends one record per success. Failures are
/// collected into the summary instead of aborting the run.
///
/// # Arguments
/// * `input_dir` - Directory holding the clip and scene band files
/// * `image_id` - Scene identifier recorded into every output row
/// * `classes` - Classification lookup keyed by base region id
/// * `table` - Open output table
///
/// # Returns
/// A summary of written records and skipped regions
pub fn run_batch(
    input_dir: &Path,
    image_id: &str,
    classes: &ClassLookup,
    table: &mut FeatureTable,
) -> StatsResult<BatchSummary> {
    let clips = scan_clips(input_dir)?;
    info!("Found {} background clips in {}", clips.len(), input_dir.display());

    let progress = ProgressTracker::new(clips.len() as u64, "Extracting region features");

    let mut written = 0;
    let mut failures = Vec::new();

    for clip_path in &clips {
        let clip_name = clip_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        progress.set_message(&clip_name);

        match process_region(clip_path, &clip_name, image_id, classes) {
            Ok(record) => {
                table.append(&record)?;
                written += 1;
            }
            Err(e) => {
                error!("Skipping region {}: {}", clip_name, e);
                failures.push(RegionFailure {
                    clip_name,
                    reason: e.to_string(),
                });
            }
        }
        progress.increment(1);
    }

    progress.finish();
    info!(
        "Batch complete: {} records written, {} regions skipped",
        written,
        failures.len()
    );

    Ok(BatchSummary { written, failures })
}

/// Process one region to a feature record
///
/// Loads the clip and its full-scene counterpart and runs the
/// extractor. Everything that can go wrong here is a per-region
/// failure for the caller to log and skip.
fn process_region(
    clip_path: &Path,
    clip_name: &str,
    image_id: &str,
    classes: &ClassLookup,
) -> StatsResult<FeatureRecord> {
    let scene_path = scene_path_for(clip_path)?;
    if !scene_path.exists() {
        return Err(StatsError::GenericError(format!(
            "no full-scene band {} for clip {}",
            scene_path.display(),
            clip_name
        )));
    }

    let foreground = load_band(clip_path)?;
    let background = load_band(&scene_path)?;

    extract_features(&foreground, &background, image_id, clip_name, classes)
}

/// Collect the background clip files of a directory, sorted by name
///
/// Sorting pins the iteration order, so output rows land in a
/// deterministic order across runs on the same directory.
fn scan_clips(input_dir: &Path) -> StatsResult<Vec<PathBuf>> {
    // Unwrap is fine, the pattern is a literal
    let clip_pattern = Regex::new(r"(?i)_background\.(csv|npy)$").unwrap();

    let mut clips = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(n) => n,
            None => {
                warn!("Ignoring non-UTF-8 file name in {}", input_dir.display());
                continue;
            }
        };
        if clip_pattern.is_match(name) {
            clips.push(entry.path());
        }
    }

    clips.sort();
    Ok(clips)
}

/// Full-scene band path for a clip path
///
/// `<id_poly>_background.<ext>` maps to `<id_poly>.<ext>` in the same
/// directory.
fn scene_path_for(clip_path: &Path) -> StatsResult<PathBuf> {
    let file_name = clip_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            StatsError::GenericError(format!(
                "unusable clip path {}",
                clip_path.display()
            ))
        })?;

    let ext = clip_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let stem = match file_name.find("_background") {
        Some(pos) => &file_name[..pos],
        None => {
            return Err(StatsError::GenericError(format!(
                "clip name {} lacks the _background suffix",
                file_name
            )))
        }
    };

    Ok(clip_path.with_file_name(format!("{}.{}", stem, ext)))
}
