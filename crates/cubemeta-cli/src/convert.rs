//! # Convert Subcommand
//!
//! Reads a model source and writes it as a bundle directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the `cubemeta convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Bundle directory, JSON file or URL.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Directory to write the bundle to.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Replace an existing bundle at TARGET.
    #[arg(long)]
    pub replace: bool,
}

/// Execute the convert subcommand.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let metadata = crate::load_metadata(&args.source)?;
    cubemeta_bundle::write_bundle(&args.target, &metadata, args.replace)
        .with_context(|| format!("failed to write bundle to {}", args.target.display()))?;

    println!(
        "Wrote {} cube(s) and {} dimension(s) to {}",
        metadata.cubes.len(),
        metadata.dimensions.len(),
        args.target.display()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_file_to_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("model.json");
        std::fs::write(
            &source,
            r#"{"name": "m", "cubes": [{"name": "sales"}], "dimensions": [{"name": "date"}]}"#,
        )
        .unwrap();
        let target = dir.path().join("bundle");

        let args = ConvertArgs {
            source: source.display().to_string(),
            target: target.clone(),
            replace: false,
        };
        assert_eq!(run_convert(&args).unwrap(), 0);
        assert!(target.join("cube_sales.json").is_file());
        assert!(target.join("dim_date.json").is_file());

        // A second run without --replace refuses the existing bundle.
        assert!(run_convert(&args).is_err());
        let replace = ConvertArgs {
            replace: true,
            ..args
        };
        assert_eq!(run_convert(&replace).unwrap(), 0);
    }
}
