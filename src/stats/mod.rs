//! Feature-extraction core
//!
//! No-data-aware statistics primitives, the two-tier adaptive threshold,
//! gradient/border analysis and record assembly for one candidate
//! region.

pub mod errors;
pub mod band;
pub mod descriptive;
pub mod threshold;
pub mod gradient;
pub mod record;
pub mod extractor;
#[cfg(test)]
mod tests;

pub use errors::{BandRole, StatsError, StatsResult};
pub use band::Band;
pub use descriptive::BandStats;
pub use record::{FeatureRecord, HEADER};
pub use extractor::extract_features;
