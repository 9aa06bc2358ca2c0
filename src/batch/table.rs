//! Append-only feature table
//!
//! CSV sink for feature records. The header goes in exactly once, when
//! the file is first created; reruns against an existing table keep
//! appending rows below it. Every row is flushed as it is committed so
//! an interrupted batch leaves the table consistent up to the last
//! written record.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::stats::errors::StatsResult;
use crate::stats::record::FeatureRecord;

/// Append-only CSV sink for feature records
pub struct FeatureTable {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FeatureTable {
    /// Open a feature table for appending
    ///
    /// Creates the file and writes the header when it does not exist
    /// yet; otherwise the existing content is left untouched.
    ///
    /// # Arguments
    /// * `path` - Path to the output CSV
    ///
    /// # Returns
    /// The open table or an error
    pub fn open(path: &Path) -> StatsResult<Self> {
        let is_new = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);

        if is_new {
            info!("Creating feature table {}", path.display());
            writeln!(writer, "{}", FeatureRecord::header_row())?;
            writer.flush()?;
        } else {
            debug!("Appending to existing feature table {}", path.display());
        }

        Ok(FeatureTable {
            path: path.to_path_buf(),
            writer,
        })
    }

    /// Append one record and commit it
    ///
    /// # Arguments
    /// * `record` - The record to append
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn append(&mut self, record: &FeatureRecord) -> StatsResult<()> {
        writeln!(self.writer, "{}", record.to_csv_row())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Path of the underlying CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
