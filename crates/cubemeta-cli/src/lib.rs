//! # cubemeta-cli — Model Metadata Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — schema and advisory checks over a model source
//! - `convert` — write a model source as a bundle directory
//! - `cubes` — list the cubes a provider serves
//! - `cube` — print one resolved cube
//!
//! A model source is a bundle directory, a JSON file or (with the `http`
//! feature) a URL.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in their modules.
//! - Handlers return an exit code and delegate to the library crates.

pub mod config;
pub mod convert;
pub mod inspect;
pub mod validate;

use anyhow::{Context, Result};
use cubemeta_core::ModelMetadata;
use cubemeta_provider::{ModelProvider, NamedStore, ProviderRegistry, StoreBinding};
use std::sync::Arc;

use crate::config::CliConfig;

/// Load typed model metadata from a source string.
pub fn load_metadata(source: &str) -> Result<ModelMetadata> {
    cubemeta_bundle::read_model_metadata(source)
        .with_context(|| format!("failed to load model from {source}"))
}

/// Build the configured provider for `metadata`, binding the configured
/// store if there is one.
pub fn build_provider(config: &CliConfig, metadata: &ModelMetadata) -> Result<Box<dyn ModelProvider>> {
    let registry = ProviderRegistry::with_builtins();
    let mut provider = registry
        .create(&config.provider, metadata)
        .with_context(|| format!("known provider kinds: {}", registry.kinds().join(", ")))?;

    if let Some(store) = &config.store {
        provider
            .set_store(StoreBinding::new(store.clone(), Arc::new(NamedStore::new(store.clone()))))
            .with_context(|| format!("failed to bind store {store}"))?;
    } else if provider.requires_store() {
        anyhow::bail!("provider '{}' requires a store; set `store` in the config", config.provider);
    }
    Ok(provider)
}
