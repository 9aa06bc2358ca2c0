pub mod stats;
pub mod classification;
pub mod io;
pub mod batch;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::SlickStats;

pub use stats::{Band, BandStats, FeatureRecord, StatsError, StatsResult};
pub use batch::{BatchSummary, FeatureTable};
pub use classification::{ClassLookup, RegionId};
