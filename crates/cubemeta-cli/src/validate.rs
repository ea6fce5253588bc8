//! # Validate Subcommand
//!
//! Loads a model source without typing it and reports every validation
//! issue, errors first. Exit code 1 when any error is found.

use anyhow::{Context, Result};
use clap::Args;

use cubemeta_core::ValidationIssue;
use cubemeta_schema::{ModelValidator, SchemaSet};

use crate::config::CliConfig;

/// Arguments for the `cubemeta validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Bundle directory, JSON file or URL.
    #[arg(value_name = "SOURCE")]
    pub source: String,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let document = cubemeta_bundle::read_model_document(&args.source)
        .with_context(|| format!("failed to load model from {}", args.source))?;

    let validator = match &config.schema_dir {
        Some(dir) => ModelValidator::new(&SchemaSet::from_dir(dir)?)?,
        None => ModelValidator::bundled()?,
    };
    let issues = validator.validate(&document);

    for line in report_lines(&issues) {
        println!("{line}");
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    println!(
        "{}: {} error(s), {} default(s)",
        args.source,
        errors,
        issues.len() - errors
    );
    Ok(u8::from(errors > 0))
}

/// One line per issue, errors before defaults, document order otherwise.
pub fn report_lines(issues: &[ValidationIssue]) -> Vec<String> {
    let mut sorted: Vec<&ValidationIssue> = issues.iter().collect();
    sorted.sort_by_key(|i| i.severity);
    sorted.iter().map(|i| i.to_string()).collect()
}
