use std::path::Path;
use log::info;

use crate::batch::{run_batch, BatchSummary, FeatureTable};
use crate::classification::ClassLookup;
use crate::io::load_band;
use crate::stats::errors::StatsResult;
use crate::stats::extractor::extract_features;
use crate::stats::record::FeatureRecord;
use crate::utils::logger::Logger;

/// Main interface to the slickstats library
pub struct SlickStats {
    logger: Logger,
}

impl SlickStats {
    /// Create a new SlickStats instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "slickstats.log"
    ///
    /// # Returns
    /// A SlickStats instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> StatsResult<Self> {
        let log_path = log_file.unwrap_or("slickstats.log");
        let logger = Logger::new(log_path)?;
        Ok(SlickStats { logger })
    }

    /// Extract the feature record for one clip/scene band pair
    ///
    /// # Arguments
    /// * `foreground_path` - Path to the polygon clip band file
    /// * `background_path` - Path to the full-scene band file
    /// * `image_id` - Scene identifier recorded into the output
    /// * `classes_path` - Optional path to the classification CSV
    ///
    /// # Returns
    /// The assembled record or an error
    pub fn extract_pair(&self,
                        foreground_path: &str,
                        background_path: &str,
                        image_id: &str,
                        classes_path: Option<&str>) -> StatsResult<FeatureRecord> {
        info!("Extracting features for clip {} against {}", foreground_path, background_path);

        let classes = match classes_path {
            Some(path) => ClassLookup::load(path)?,
            None => ClassLookup::empty(),
        };

        let foreground = load_band(Path::new(foreground_path))?;
        let background = load_band(Path::new(background_path))?;

        let clip_name = Path::new(foreground_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(foreground_path);

        let record = extract_features(&foreground, &background, image_id, clip_name, &classes)?;
        self.logger.log(&format!("Extracted features for region {}", record.id_poly))?;
        Ok(record)
    }

    /// Run a batch over a directory of clip files
    ///
    /// Scans `input_dir` for `<id>_background.<ext>` clips, pairs each
    /// with its `<id>.<ext>` full-scene band and appends one record per
    /// successfully processed region to the output table. Per-region
    /// failures are collected in the summary, never aborting the run.
    ///
    /// # Arguments
    /// * `input_dir` - Directory holding the band files
    /// * `image_id` - Optional scene identifier, defaults to the
    ///   directory name
    /// * `classes_path` - Path to the classification CSV
    /// * `output_path` - Path to the output table, appended to when it
    ///   already exists
    ///
    /// # Returns
    /// A summary of written records and skipped regions
    pub fn run_batch(&self,
                     input_dir: &str,
                     image_id: Option<&str>,
                     classes_path: &str,
                     output_path: &str) -> StatsResult<BatchSummary> {
        let dir = Path::new(input_dir);
        let derived_id;
        let image_id = match image_id {
            Some(id) => id,
            None => {
                derived_id = dir
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown-scene")
                    .to_string();
                &derived_id
            }
        };

        let classes = ClassLookup::load(classes_path)?;
        let mut table = FeatureTable::open(Path::new(output_path))?;

        let summary = run_batch(dir, image_id, &classes, &mut table)?;
        self.logger.log(&format!(
            "Batch over {}: {} written, {} skipped",
            input_dir, summary.written, summary.failures.len()
        ))?;
        Ok(summary)
    }
}
