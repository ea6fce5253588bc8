//! # Metadata Catalog
//!
//! The metadata a provider serves: provider defaults merged ahead of the
//! user metadata, with cubes and dimensions indexed by name.
//!
//! When two entries share a name the later one shadows the earlier one in
//! lookups, so user entries override provider defaults. Listings keep the
//! position of the first appearance. The catalog is read-only once built;
//! every lookup resolves from the stored metadata again.

use std::collections::HashMap;

use cubemeta_core::{
    CubeMetadata, CubeSummary, DimensionEntry, DimensionMetadata, JsonMap, ModelError,
    ModelMetadata, ModelResult,
};
use cubemeta_merge::{
    cube_options, merge_provider_defaults, resolve_cube_fragment, resolve_dimension,
    DimensionTemplates,
};

/// Merged, indexed provider metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    metadata: ModelMetadata,
    cube_index: NameIndex,
    dimension_index: NameIndex,
}

/// Name to position index with first-appearance ordering.
#[derive(Debug, Clone, Default)]
struct NameIndex {
    order: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NameIndex {
    fn build<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Self {
        let mut index = Self::default();
        for (position, name) in names.enumerate() {
            if index.positions.insert(name.to_string(), position).is_some() {
                tracing::debug!(kind, name, "later entry shadows earlier one");
            } else {
                index.order.push(name.to_string());
            }
        }
        index
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    fn ordered(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().filter_map(|name| self.get(name))
    }
}

impl MetadataCatalog {
    /// Merge `defaults` ahead of `user` and index the result.
    pub fn new(defaults: &ModelMetadata, user: &ModelMetadata) -> Self {
        Self::from_merged(merge_provider_defaults(defaults, user))
    }

    /// Index already merged metadata.
    pub fn from_merged(metadata: ModelMetadata) -> Self {
        let cube_index = NameIndex::build("cube", metadata.cubes.iter().map(|c| c.name.as_str()));
        let dimension_index =
            NameIndex::build("dimension", metadata.dimensions.iter().map(DimensionEntry::name));
        tracing::debug!(
            cubes = cube_index.order.len(),
            dimensions = dimension_index.order.len(),
            "metadata catalog built"
        );
        Self {
            metadata,
            cube_index,
            dimension_index,
        }
    }

    /// The merged metadata.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// The stored (unresolved) cube fragment.
    pub fn cube_fragment(&self, name: &str) -> ModelResult<&CubeMetadata> {
        self.cube_index
            .get(name)
            .and_then(|i| self.metadata.cubes.get(i))
            .ok_or_else(|| ModelError::NoSuchCube(name.to_string()))
    }

    /// The stored dimension entry.
    pub fn dimension_entry(&self, name: &str) -> ModelResult<&DimensionEntry> {
        self.dimension_index
            .get(name)
            .and_then(|i| self.metadata.dimensions.get(i))
            .ok_or_else(|| ModelError::NoSuchDimension(name.to_string()))
    }

    /// One summary row per cube, in first-appearance order.
    pub fn list_cubes(&self) -> Vec<CubeSummary> {
        self.cube_index
            .ordered()
            .filter_map(|i| self.metadata.cubes.get(i))
            .map(CubeSummary::from)
            .collect()
    }

    /// Resolve the cube `name` against the model-wide settings.
    pub fn cube(&self, name: &str) -> ModelResult<CubeMetadata> {
        resolve_cube_fragment(&self.metadata, self.cube_fragment(name)?)
    }

    /// Resolve the dimension `name`, applying its template if it has one.
    pub fn dimension(&self, name: &str, templates: &DimensionTemplates) -> ModelResult<DimensionMetadata> {
        resolve_dimension(self.dimension_entry(name)?, templates)
    }

    /// Merged options of the cube `name`.
    pub fn cube_options(&self, name: &str) -> ModelResult<JsonMap> {
        Ok(cube_options(&self.metadata, self.cube_fragment(name)?))
    }

    /// Metadata of the dimension `name` as stored; bare names become flat.
    pub fn dimension_metadata(&self, name: &str) -> ModelResult<DimensionMetadata> {
        Ok(self.dimension_entry(name)?.to_metadata())
    }

    /// Published dimension names: the explicit list, else every dimension.
    pub fn public_dimensions(&self) -> Vec<String> {
        match &self.metadata.public_dimensions {
            Some(names) => names.clone(),
            None => self.dimension_index.order.clone(),
        }
    }
}
