//! Band file input
//!
//! Read side of the array-export interchange produced by the upstream
//! cropping step.

pub mod band_reader;

pub use band_reader::load_band;
