//! Custom error types for feature extraction
//!
//! Every failure that can knock a single region out of a batch is a
//! variant here, so the aggregator can log it with the region identity
//! and keep going.

use std::fmt;
use std::io;

/// Which band of a region a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandRole {
    /// The polygon clip (candidate slick interior)
    Foreground,
    /// The full-scene surround
    Background,
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandRole::Foreground => write!(f, "foreground"),
            BandRole::Background => write!(f, "background"),
        }
    }
}

/// Feature-extraction error types
#[derive(Debug)]
pub enum StatsError {
    /// I/O error
    IoError(io::Error),
    /// A band is absent, zero-sized, or entirely no-data
    EmptyInput(BandRole),
    /// Both the mean and the Otsu threshold are undefined for a band
    DegenerateStatistics { band: BandRole },
    /// A band file could not be parsed
    InvalidBandFile(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::IoError(e) => write!(f, "I/O error: {}", e),
            StatsError::EmptyInput(band) => {
                write!(f, "{} band is empty or entirely no-data", band)
            }
            StatsError::DegenerateStatistics { band } => {
                write!(f, "degenerate {} band: mean and Otsu thresholds both undefined", band)
            }
            StatsError::InvalidBandFile(msg) => write!(f, "invalid band file: {}", msg),
            StatsError::GenericError(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for StatsError {}

impl From<io::Error> for StatsError {
    fn from(error: io::Error) -> Self {
        StatsError::IoError(error)
    }
}

impl From<String> for StatsError {
    fn from(msg: String) -> Self {
        StatsError::GenericError(msg)
    }
}

/// Result type for feature-extraction operations
pub type StatsResult<T> = Result<T, StatsError>;
