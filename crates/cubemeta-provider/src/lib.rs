//! # cubemeta-provider — Provider Facade
//!
//! Serves resolved metadata of one model to consumers that build runtime
//! cube and dimension objects.
//!
//! ## Lifecycle
//!
//! A provider is created from user metadata by a factory looked up in the
//! [`ProviderRegistry`]. Construction merges the provider kind's defaults
//! ahead of the user metadata and indexes cubes and dimensions by name
//! ([`MetadataCatalog`]). A provider starts Unbound; binding a store
//! ([`ModelProvider::set_store`]) runs the initialization hook once and
//! moves it to Bound for good.
//!
//! ## Lookups
//!
//! Every `cube()` and `dimension()` call resolves again from the stored
//! metadata. Nothing is cached and nothing is mutated after bind time, so a
//! bound provider can be shared freely.
//!
//! ## Crate Policy
//!
//! - Depends on `cubemeta-core` and `cubemeta-merge` internally.
//! - No I/O; metadata arrives already loaded.

pub mod catalog;
pub mod provider;
pub mod registry;
pub mod store;

pub use catalog::MetadataCatalog;
pub use cubemeta_merge::DimensionTemplates;
pub use provider::{ModelProvider, ProviderBase, StaticModelProvider};
pub use registry::{ProviderFactory, ProviderRegistry};
pub use store::{NamedStore, Store, StoreBinding, StoreSlot};
