//! Progress reporting for batch runs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the regions of one batch run
///
/// The message slot shows the clip currently being processed, so a
/// stalled run points straight at the offending file.
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a tracker for a known number of regions
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"));
        bar.set_message(description.to_string());

        ProgressTracker { bar }
    }

    /// Advance the bar by a number of processed regions
    pub fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    /// Close out the bar at the end of a run
    pub fn finish(&self) {
        self.bar.finish_with_message("Batch finished");
    }

    /// Show which clip is being processed
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }
}
