//! Store binding.
//!
//! A provider starts **Unbound**. Binding a store moves it to **Bound**
//! exactly once; the provider's initialization hook runs on that
//! transition and a second bind is refused.

use std::fmt;
use std::sync::Arc;

use cubemeta_core::{ModelError, ModelResult};

/// A data store a provider can be bound to.
pub trait Store: Send + Sync + fmt::Debug {
    /// Store kind (e.g. `sql`).
    fn kind(&self) -> &str;
}

/// A store known only by name, with nothing behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedStore {
    kind: String,
}

impl NamedStore {
    /// A placeholder store of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl Store for NamedStore {
    fn kind(&self) -> &str {
        &self.kind
    }
}

/// A named store handed to a provider.
#[derive(Debug, Clone)]
pub struct StoreBinding {
    /// Name the store is registered under.
    pub name: String,
    /// The store itself.
    pub store: Arc<dyn Store>,
}

impl StoreBinding {
    /// Bind `store` under `name`.
    pub fn new(name: impl Into<String>, store: Arc<dyn Store>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }
}

/// Holds the store of a provider once it is bound.
#[derive(Debug, Clone, Default)]
pub struct StoreSlot {
    binding: Option<StoreBinding>,
}

impl StoreSlot {
    /// Whether a store is bound.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The bound store, if any.
    pub fn get(&self) -> Option<&StoreBinding> {
        self.binding.as_ref()
    }

    /// Move from Unbound to Bound.
    ///
    /// # Errors
    ///
    /// Returns `StoreAlreadyBound` (naming the current store) if a store is
    /// already bound; the existing binding is kept.
    pub fn bind(&mut self, binding: StoreBinding) -> ModelResult<&StoreBinding> {
        if let Some(current) = &self.binding {
            return Err(ModelError::StoreAlreadyBound(current.name.clone()));
        }
        tracing::debug!(store = %binding.name, kind = binding.store.kind(), "binding store");
        Ok(self.binding.insert(binding))
    }
}
