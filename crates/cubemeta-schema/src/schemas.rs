//! # Schema Set
//!
//! The three JSON Schema (Draft 4) documents a model is checked against:
//! `model.schema.json`, `cube.schema.json` and `dimension.schema.json`.
//!
//! The bundled set is compiled into the crate and parsed once per process.
//! A set with the same three file names can also be loaded from a
//! directory to override the bundled schemas.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};

/// Which document a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// The composite model document.
    Model,
    /// A cube fragment.
    Cube,
    /// A dimension fragment.
    Dimension,
}

impl SchemaKind {
    /// All kinds, in validation order.
    pub const ALL: [SchemaKind; 3] = [Self::Model, Self::Cube, Self::Dimension];

    /// Schema filename.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Model => "model.schema.json",
            Self::Cube => "cube.schema.json",
            Self::Dimension => "dimension.schema.json",
        }
    }

    fn bundled_source(&self) -> &'static str {
        match self {
            Self::Model => include_str!("../schemas/model.schema.json"),
            Self::Cube => include_str!("../schemas/cube.schema.json"),
            Self::Dimension => include_str!("../schemas/dimension.schema.json"),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Parsed model, cube and dimension schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSet {
    model: Value,
    cube: Value,
    dimension: Value,
}

static BUNDLED: OnceLock<Result<SchemaSet, (SchemaKind, String)>> = OnceLock::new();

impl SchemaSet {
    /// Build a set from already parsed schema documents.
    pub fn from_values(model: Value, cube: Value, dimension: Value) -> Self {
        Self {
            model,
            cube,
            dimension,
        }
    }

    /// The schemas compiled into this crate, parsed on first use.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if a bundled schema is not valid JSON.
    pub fn bundled() -> SchemaResult<&'static SchemaSet> {
        BUNDLED
            .get_or_init(|| {
                let parse = |kind: SchemaKind| -> Result<Value, (SchemaKind, String)> {
                    serde_json::from_str(kind.bundled_source()).map_err(|e| (kind, e.to_string()))
                };
                Ok(Self::from_values(
                    parse(SchemaKind::Model)?,
                    parse(SchemaKind::Cube)?,
                    parse(SchemaKind::Dimension)?,
                ))
            })
            .as_ref()
            .map_err(|(kind, reason)| SchemaError::SchemaLoad {
                schema: kind.file_name().to_string(),
                reason: format!("invalid bundled schema: {reason}"),
            })
    }

    /// Load `model.schema.json`, `cube.schema.json` and
    /// `dimension.schema.json` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaLoad` if a file is missing, unreadable or
    /// not valid JSON.
    pub fn from_dir(dir: &Path) -> SchemaResult<Self> {
        let load = |kind: SchemaKind| -> SchemaResult<Value> {
            let path = dir.join(kind.file_name());
            let load_error = |reason: String| SchemaError::SchemaLoad {
                schema: path.display().to_string(),
                reason,
            };
            let content = std::fs::read_to_string(&path)
                .map_err(|e| load_error(format!("cannot read schema file: {e}")))?;
            serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}")))
        };

        tracing::debug!(dir = %dir.display(), "loading schemas from directory");
        Ok(Self::from_values(
            load(SchemaKind::Model)?,
            load(SchemaKind::Cube)?,
            load(SchemaKind::Dimension)?,
        ))
    }

    /// The schema document of `kind`.
    pub fn get(&self, kind: SchemaKind) -> &Value {
        match kind {
            SchemaKind::Model => &self.model,
            SchemaKind::Cube => &self.cube,
            SchemaKind::Dimension => &self.dimension,
        }
    }
}
