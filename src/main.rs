use clap::{Arg, ArgAction, Command as ClapCommand};
use std::process;
use log::error;

use slickstats::commands::{CommandFactory, SlickstatsCommandFactory};
use slickstats::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("SlickStats")
        .version("0.1")
        .author("Maria Paula Graziotto")
        .about("Extract statistical features from oil-slick candidate raster clips")
        .arg(
            Arg::new("input")
                .help("Directory holding <id>_background band clips and their full-scene pairs")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("classes")
                .long("classes")
                .help("Classification CSV with ID_POLY, CLASSE and SUBCLASSE columns")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output feature table, appended to when it already exists")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("image")
                .long("image")
                .help("Scene identifier recorded into every output row")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("foreground")
                .long("foreground")
                .help("Single polygon clip band file (single-pair mode)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("background")
                .long("background")
                .help("Single full-scene band file (single-pair mode)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_file = "slickstats.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("slickstats-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = SlickstatsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
