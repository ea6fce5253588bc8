//! # cubemeta CLI entry point
//!
//! Parses command-line arguments, sets up logging, loads the optional
//! configuration file and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cubemeta_cli::config::CliConfig;
use cubemeta_cli::convert::{run_convert, ConvertArgs};
use cubemeta_cli::inspect::{run_cube, run_cubes, CubeArgs, CubesArgs};
use cubemeta_cli::validate::{run_validate, ValidateArgs};

/// Model metadata toolkit.
///
/// Validates analytical model descriptions, converts them between single
/// documents and bundle directories, and prints resolved cubes.
#[derive(Parser, Debug)]
#[command(name = "cubemeta", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: $CUBEMETA_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit log events as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a model against the model, cube and dimension schemas.
    Validate(ValidateArgs),

    /// Write a model as a bundle directory.
    Convert(ConvertArgs),

    /// List the cubes of a model as JSON.
    Cubes(CubesArgs),

    /// Print a resolved cube as JSON.
    Cube(CubeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let logger = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.log_json {
        logger.json().init();
    } else {
        logger.init();
    }

    tracing::debug!("cubemeta CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Convert(args) => run_convert(&args),
        Commands::Cubes(args) => run_cubes(&args, &config),
        Commands::Cube(args) => run_cube(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
