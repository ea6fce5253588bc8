//! Provider-kind registry.
//!
//! Maps a provider kind name to the factory that builds it. Populated
//! once at start-up and then only read.

use std::collections::BTreeMap;

use cubemeta_core::{ModelError, ModelMetadata, ModelResult};

use crate::provider::{ModelProvider, StaticModelProvider};

/// Builds a provider for the given metadata.
pub type ProviderFactory = fn(&ModelMetadata) -> ModelResult<Box<dyn ModelProvider>>;

/// Provider factories by kind.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

fn static_provider(metadata: &ModelMetadata) -> ModelResult<Box<dyn ModelProvider>> {
    Ok(Box::new(StaticModelProvider::new(metadata)))
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in kinds: `static` and its alias `default`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(StaticModelProvider::KIND, static_provider);
        registry.register("default", static_provider);
        registry
    }

    /// Register `factory` under `kind`, returning the factory it replaces.
    pub fn register(&mut self, kind: impl Into<String>, factory: ProviderFactory) -> Option<ProviderFactory> {
        self.factories.insert(kind.into(), factory)
    }

    /// Whether `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build a provider of `kind` for `metadata`.
    ///
    /// # Errors
    ///
    /// `UnknownProvider` if `kind` is not registered, otherwise any error of
    /// the factory.
    pub fn create(&self, kind: &str, metadata: &ModelMetadata) -> ModelResult<Box<dyn ModelProvider>> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ModelError::UnknownProvider(kind.to_string()))?;
        factory(metadata)
    }
}
