//! CLI command implementations
//!
//! This module contains implementations of the commands supported by
//! the CLI application using the Command pattern.

pub mod command_traits;
pub mod batch_command;
pub mod extract_command;

pub use command_traits::{Command, CommandFactory};
pub use batch_command::BatchCommand;
pub use extract_command::ExtractCommand;

use clap::ArgMatches;
use crate::stats::errors::StatsResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct SlickstatsCommandFactory;

impl SlickstatsCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SlickstatsCommandFactory
    }
}

impl Default for SlickstatsCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for SlickstatsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> StatsResult<Box<dyn Command + 'a>> {
        // An explicit band pair means single-region extraction,
        // otherwise the input directory drives a batch run
        if args.get_one::<String>("foreground").is_some() {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else {
            Ok(Box::new(BatchCommand::new(args, logger)?))
        }
    }
}
