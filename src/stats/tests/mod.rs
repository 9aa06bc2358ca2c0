//! Tests for the feature-extraction core

mod test_utils;
mod threshold_tests;
mod gradient_tests;
