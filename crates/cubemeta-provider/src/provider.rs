//! # Model Providers
//!
//! A [`ModelProvider`] serves resolved metadata for one model. Concrete
//! providers own a [`ProviderBase`] (catalog plus store slot) and get every
//! lookup from the trait's default methods; they override the hooks they
//! need, such as [`ModelProvider::initialize_from_store`].

use cubemeta_core::{
    CubeMetadata, CubeSummary, DimensionMetadata, JsonMap, ModelMetadata, ModelResult,
};
use cubemeta_merge::DimensionTemplates;

use crate::catalog::MetadataCatalog;
use crate::store::{StoreBinding, StoreSlot};

// ---------------------------------------------------------------------------
// Provider state
// ---------------------------------------------------------------------------

/// State shared by every provider: its catalog and store slot.
#[derive(Debug, Clone)]
pub struct ProviderBase {
    kind: &'static str,
    catalog: MetadataCatalog,
    store: StoreSlot,
}

impl ProviderBase {
    /// Merge `defaults` ahead of `metadata` for a provider of `kind`.
    pub fn new(kind: &'static str, defaults: &ModelMetadata, metadata: &ModelMetadata) -> Self {
        tracing::debug!(kind, model = metadata.name.as_deref(), "creating model provider");
        Self {
            kind,
            catalog: MetadataCatalog::new(defaults, metadata),
            store: StoreSlot::default(),
        }
    }

    /// Provider kind.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The provider's catalog.
    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    /// The provider's store slot.
    pub fn store(&self) -> &StoreSlot {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Source of resolved model metadata.
///
/// Lookups only read the catalog, so a provider can be shared across
/// threads once it is bound.
pub trait ModelProvider: Send + Sync {
    /// Shared provider state.
    fn base(&self) -> &ProviderBase;

    /// Mutable provider state, used only while binding a store.
    fn base_mut(&mut self) -> &mut ProviderBase;

    /// Whether a store must be bound before the provider is used.
    fn requires_store(&self) -> bool {
        false
    }

    /// Hook run once, right after a store is bound.
    fn initialize_from_store(&mut self) -> ModelResult<()> {
        Ok(())
    }

    /// Provider kind.
    fn kind(&self) -> &str {
        self.base().kind()
    }

    /// The bound store, if any.
    fn store(&self) -> Option<&StoreBinding> {
        self.base().store().get()
    }

    /// Bind a store and run [`initialize_from_store`](Self::initialize_from_store).
    ///
    /// # Errors
    ///
    /// `StoreAlreadyBound` if a store is already bound; the hook does not
    /// run again. Otherwise any error of the hook.
    fn set_store(&mut self, binding: StoreBinding) -> ModelResult<()> {
        self.base_mut().store.bind(binding)?;
        self.initialize_from_store()
    }

    /// Summary rows of all cubes.
    fn list_cubes(&self) -> Vec<CubeSummary> {
        self.base().catalog().list_cubes()
    }

    /// The resolved cube `name`.
    fn cube(&self, name: &str) -> ModelResult<CubeMetadata> {
        self.base().catalog().cube(name)
    }

    /// The resolved dimension `name`; templates come from `templates`.
    fn dimension(&self, name: &str, templates: &DimensionTemplates) -> ModelResult<DimensionMetadata> {
        self.base().catalog().dimension(name, templates)
    }

    /// Merged options of the cube `name`.
    fn cube_options(&self, name: &str) -> ModelResult<JsonMap> {
        self.base().catalog().cube_options(name)
    }

    /// Stored metadata of the dimension `name`.
    fn dimension_metadata(&self, name: &str) -> ModelResult<DimensionMetadata> {
        self.base().catalog().dimension_metadata(name)
    }

    /// Names of the published dimensions.
    fn public_dimensions(&self) -> Vec<String> {
        self.base().catalog().public_dimensions()
    }
}

// ---------------------------------------------------------------------------
// Static provider
// ---------------------------------------------------------------------------

/// Provider serving metadata held in memory. Needs no store.
#[derive(Debug, Clone)]
pub struct StaticModelProvider {
    base: ProviderBase,
}

impl StaticModelProvider {
    /// Kind name of the static provider.
    pub const KIND: &'static str = "static";

    /// Baseline metadata placed ahead of user metadata. Empty.
    pub fn default_metadata() -> ModelMetadata {
        ModelMetadata::default()
    }

    /// Serve `metadata`.
    pub fn new(metadata: &ModelMetadata) -> Self {
        Self {
            base: ProviderBase::new(Self::KIND, &Self::default_metadata(), metadata),
        }
    }
}

impl ModelProvider for StaticModelProvider {
    fn base(&self) -> &ProviderBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ProviderBase {
        &mut self.base
    }
}
