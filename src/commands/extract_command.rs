//! Single-pair feature-extraction command
//!
//! Extracts the record for one explicitly named clip/scene pair,
//! printing every field and optionally appending to an output table.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::batch::FeatureTable;
use crate::classification::ClassLookup;
use crate::commands::command_traits::Command;
use crate::io::load_band;
use crate::stats::errors::{StatsError, StatsResult};
use crate::stats::extractor::extract_features;
use crate::stats::record::FeatureRecord;
use crate::utils::logger::Logger;

/// Command for extracting features from one band pair
pub struct ExtractCommand<'a> {
    /// Path to the polygon clip band file
    foreground: String,
    /// Path to the full-scene band file
    background: String,
    /// Scene identifier recorded into the output
    image_id: String,
    /// Optional path to the classification CSV
    classes_path: Option<String>,
    /// Optional output table to append the record to
    output_path: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> StatsResult<Self> {
        let foreground = args.get_one::<String>("foreground")
            .ok_or_else(|| StatsError::GenericError("Missing foreground band file".to_string()))?
            .clone();

        let background = args.get_one::<String>("background")
            .ok_or_else(|| StatsError::GenericError("Missing background band file".to_string()))?
            .clone();

        // Default the scene identifier to the scene file stem
        let image_id = match args.get_one::<String>("image") {
            Some(id) => id.clone(),
            None => Path::new(&background)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown-scene")
                .to_string(),
        };

        Ok(ExtractCommand {
            foreground,
            background,
            image_id,
            classes_path: args.get_one::<String>("classes").cloned(),
            output_path: args.get_one::<String>("output").cloned(),
            logger,
        })
    }

    /// Print the record field by field in schema order
    fn display_record(&self, record: &FeatureRecord) {
        info!("Feature record for {}:", record.id_poly);
        for (name, value) in crate::stats::record::HEADER.iter().zip(record.fields()) {
            info!("  {}: {}", name, value);
        }
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> StatsResult<()> {
        info!("Extracting features from {} / {}", self.foreground, self.background);

        let classes = match &self.classes_path {
            Some(path) => ClassLookup::load(path)?,
            None => ClassLookup::empty(),
        };

        let foreground = load_band(Path::new(&self.foreground))?;
        let background = load_band(Path::new(&self.background))?;

        let clip_name = Path::new(&self.foreground)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.foreground);

        let record = extract_features(&foreground, &background, &self.image_id, clip_name, &classes)?;

        self.display_record(&record);

        if let Some(output_path) = &self.output_path {
            let mut table = FeatureTable::open(Path::new(output_path))?;
            table.append(&record)?;
            info!("Record appended to {}", output_path);
        }

        self.logger.log("Extraction completed")?;

        Ok(())
    }
}
