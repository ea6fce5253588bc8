//! # Metadata Records
//!
//! Typed representation of a composite model document and its fragments.
//!
//! Keys the resolution layer reasons about are named fields; every other key
//! lands in the `extra` bag (`#[serde(flatten)]`) and is written back
//! unchanged. Optional keys are skipped on serialization when absent, so a
//! document read and written again keeps its shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelResult;

/// A JSON object.
pub type JsonMap = Map<String, Value>;

/// The top-level model document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default locale of labels in the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Application-specific information block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<JsonMap>,
    /// Cube fragments, in declaration order.
    #[serde(default)]
    pub cubes: Vec<CubeMetadata>,
    /// Dimension entries, in declaration order.
    #[serde(default)]
    pub dimensions: Vec<DimensionEntry>,
    /// Model-level joins shared by all cubes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<JoinSpec>,
    /// Model-level logical-to-physical mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<JsonMap>,
    /// Model-wide options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<JsonMap>,
    /// Model-wide browser options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_options: Option<JsonMap>,
    /// Default data store name for cubes that do not name their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datastore: Option<String>,
    /// Explicit list of published dimension names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dimensions: Option<Vec<String>>,
    /// Unrecognized top-level keys, passed through verbatim.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl ModelMetadata {
    /// Convert a raw JSON document into typed metadata.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidMetadata` if a known key has the wrong
    /// JSON type or a fragment lacks its `name`.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert back into a raw JSON document.
    pub fn to_value(&self) -> ModelResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Build a model with one cube and flat dimensions from plain names.
    ///
    /// Every dimension becomes a bare-name entry (an implicit flat
    /// single-attribute dimension) linked to the cube; measures are stored
    /// on the cube under `measures`.
    pub fn simple(cube_name: &str, dimensions: &[&str], measures: &[&str]) -> Self {
        let mut extra = JsonMap::new();
        extra.insert(
            "measures".to_string(),
            Value::Array(
                measures
                    .iter()
                    .map(|m| Value::String((*m).to_string()))
                    .collect(),
            ),
        );

        let cube = CubeMetadata {
            dimensions: dimensions
                .iter()
                .map(|d| DimensionLink::Name((*d).to_string()))
                .collect(),
            extra,
            ..CubeMetadata::named(cube_name)
        };

        Self {
            cubes: vec![cube],
            dimensions: dimensions
                .iter()
                .map(|d| DimensionEntry::Name((*d).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Find a cube fragment by name. The last declaration wins.
    pub fn cube(&self, name: &str) -> Option<&CubeMetadata> {
        self.cubes.iter().rev().find(|c| c.name == name)
    }

    /// Find a dimension entry by name. The last declaration wins.
    pub fn dimension(&self, name: &str) -> Option<&DimensionEntry> {
        self.dimensions.iter().rev().find(|d| d.name() == name)
    }

    /// Names of all cubes in declaration order.
    pub fn cube_names(&self) -> Vec<&str> {
        self.cubes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of all dimensions in declaration order.
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name()).collect()
    }
}

/// A cube fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeMetadata {
    /// Cube name, unique within a model.
    pub name: String,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category used to group cubes in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Application-specific information block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<JsonMap>,
    /// Linked dimensions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<DimensionLink>,
    /// Cube joins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<JoinSpec>,
    /// Logical-to-physical mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<JsonMap>,
    /// Cube options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<JsonMap>,
    /// Cube browser options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_options: Option<JsonMap>,
    /// Data store name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datastore: Option<String>,
    /// Unrecognized keys (measures, aggregates, fact, ...).
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl CubeMetadata {
    /// A cube with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Names of the linked dimensions, in declaration order.
    pub fn linked_dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name()).collect()
    }

    /// Label, falling back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Category, falling back to the `category` key of the info block.
    pub fn effective_category(&self) -> Option<String> {
        self.category.clone().or_else(|| {
            self.info
                .as_ref()
                .and_then(|info| info.get("category"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
    }
}

/// A dimension reference inside a cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionLink {
    /// Reference by name.
    Name(String),
    /// Reference with cube-specific details (e.g. a hierarchy subset).
    Detailed(LinkedDimension),
}

impl DimensionLink {
    /// Name of the referenced dimension.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed(link) => &link.name,
        }
    }
}

/// Structured dimension reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedDimension {
    /// Name of the referenced dimension.
    pub name: String,
    /// Cube-specific details.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// A dimension entry of the model's dimension list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionEntry {
    /// A bare name: an implicit flat single-attribute dimension.
    Name(String),
    /// A described dimension.
    Described(DimensionMetadata),
}

impl DimensionEntry {
    /// Name of the dimension.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Described(dim) => &dim.name,
        }
    }

    /// Metadata for the entry; bare names become flat dimensions.
    pub fn to_metadata(&self) -> DimensionMetadata {
        match self {
            Self::Name(name) => DimensionMetadata::flat(name.clone()),
            Self::Described(dim) => dim.clone(),
        }
    }
}

/// A dimension fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionMetadata {
    /// Dimension name, unique within a model.
    pub name: String,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of a dimension this one is derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Levels (names or level objects).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Value>>,
    /// Attributes of a flat dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Value>>,
    /// Hierarchies over the levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchies: Option<Vec<Value>>,
    /// Hierarchy used when none is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_hierarchy_name: Option<String>,
    /// Application-specific information block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<JsonMap>,
    /// Unrecognized keys (role, cardinality, ...).
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl DimensionMetadata {
    /// A flat dimension with only a name.
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A join between the fact table and a detail table.
///
/// `master` and `detail` are optional on input so that a cube join can
/// override only part of a named model join; a resolved join always has
/// both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    /// Name used to match cube joins against model joins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Master key (`"table.column"` or a structured reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<Value>,
    /// Detail key (`"table.column"` or a structured reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    /// Other join fields (alias, method, ...).
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl JoinSpec {
    /// A join from `master` to `detail`.
    pub fn new(master: impl Into<Value>, detail: impl Into<Value>) -> Self {
        Self {
            master: Some(master.into()),
            detail: Some(detail.into()),
            ..Self::default()
        }
    }

    /// Set the join name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One row of a cube listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeSummary {
    /// Cube name.
    pub name: String,
    /// Label, defaulting to the name.
    pub label: String,
    /// Category from the cube or its info block.
    pub category: Option<String>,
    /// Info block (empty when absent).
    pub info: JsonMap,
}

impl From<&CubeMetadata> for CubeSummary {
    fn from(cube: &CubeMetadata) -> Self {
        Self {
            name: cube.name.clone(),
            label: cube.display_label().to_string(),
            category: cube.effective_category(),
            info: cube.info.clone().unwrap_or_default(),
        }
    }
}
