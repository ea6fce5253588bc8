//! # Inspect Subcommands
//!
//! `cubes` lists the cubes a provider serves; `cube` prints one resolved
//! cube. Both print JSON.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::CliConfig;

/// Arguments for the `cubemeta cubes` subcommand.
#[derive(Args, Debug)]
pub struct CubesArgs {
    /// Bundle directory, JSON file or URL.
    #[arg(value_name = "SOURCE")]
    pub source: String,
}

/// Arguments for the `cubemeta cube` subcommand.
#[derive(Args, Debug)]
pub struct CubeArgs {
    /// Bundle directory, JSON file or URL.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Cube to resolve.
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Execute the cubes subcommand.
pub fn run_cubes(args: &CubesArgs, config: &CliConfig) -> Result<u8> {
    let provider = crate::build_provider(config, &crate::load_metadata(&args.source)?)?;
    print_json(&provider.list_cubes())?;
    Ok(0)
}

/// Execute the cube subcommand.
pub fn run_cube(args: &CubeArgs, config: &CliConfig) -> Result<u8> {
    let provider = crate::build_provider(config, &crate::load_metadata(&args.source)?)?;
    print_json(&provider.cube(&args.name)?)?;
    Ok(0)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
