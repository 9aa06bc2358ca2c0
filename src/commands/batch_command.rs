//! Batch feature-extraction command
//!
//! Runs the aggregation loop over a directory of clip files and
//! appends one record per region to the output table.

use std::path::Path;

use clap::ArgMatches;
use log::{debug, info, warn};

use crate::batch::{run_batch, FeatureTable};
use crate::classification::ClassLookup;
use crate::commands::command_traits::Command;
use crate::stats::errors::{StatsError, StatsResult};
use crate::utils::logger::Logger;

/// Command for batch feature extraction over a clip directory
pub struct BatchCommand<'a> {
    /// Directory holding the clip and scene band files
    input_dir: String,
    /// Scene identifier recorded into the output, when given
    image_id: Option<String>,
    /// Path to the classification CSV
    classes_path: String,
    /// Path to the output feature table
    output_path: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    /// Create a new batch command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new BatchCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> StatsResult<Self> {
        let input_dir = args.get_one::<String>("input")
            .ok_or_else(|| StatsError::GenericError("Missing input directory".to_string()))?
            .clone();

        let classes_path = args.get_one::<String>("classes")
            .ok_or_else(|| StatsError::GenericError("Missing classification table".to_string()))?
            .clone();

        let output_path = args.get_one::<String>("output")
            .cloned()
            .unwrap_or_else(|| "features.csv".to_string());

        Ok(BatchCommand {
            input_dir,
            image_id: args.get_one::<String>("image").cloned(),
            classes_path,
            output_path,
            verbose: args.get_flag("verbose"),
            logger,
        })
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> StatsResult<()> {
        info!("Running batch over {}", self.input_dir);

        if self.verbose {
            debug!("Verbose mode enabled");
        }

        let input_dir = Path::new(&self.input_dir);

        // Default the scene identifier to the directory name
        let image_id = match &self.image_id {
            Some(id) => id.clone(),
            None => input_dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown-scene")
                .to_string(),
        };

        let classes = ClassLookup::load(&self.classes_path)?;
        let mut table = FeatureTable::open(Path::new(&self.output_path))?;

        let summary = run_batch(input_dir, &image_id, &classes, &mut table)?;

        info!("Processed {} regions: {} written to {}, {} skipped",
              summary.total(), summary.written, self.output_path, summary.failures.len());

        for failure in &summary.failures {
            warn!("  skipped {}: {}", failure.clip_name, failure.reason);
        }

        self.logger.log("Batch run completed")?;

        Ok(())
    }
}
