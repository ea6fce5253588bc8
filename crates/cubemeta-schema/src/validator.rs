//! # Model Validation
//!
//! Checks a composite model document against the model, cube and dimension
//! schemas, plus advisory checks a schema can not express.
//!
//! Validation is fail-soft: every schema mismatch becomes a
//! [`ValidationIssue`] with severity `error` and every check runs regardless
//! of earlier findings. Issues are ordered model first, then each cube, then
//! each dimension, in document order.
//!
//! ## Advisory Checks
//!
//! | Finding | Severity |
//! |---------|----------|
//! | dimension given as a bare name | `default` |
//! | no `default_hierarchy_name` | `default` |
//! | neither `levels` nor `attributes` | `default` |
//! | both `levels` and `attributes` | `error` |

use cubemeta_core::{ModelMetadata, ModelResult, Scope, Severity, ValidationIssue};
use jsonschema::Validator;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::schemas::{SchemaKind, SchemaSet};

/// Compiled model, cube and dimension validators.
///
/// Compilation happens once in [`ModelValidator::new`]; a validator can then
/// check any number of documents and is `Send + Sync`.
pub struct ModelValidator {
    model: Validator,
    cube: Validator,
    dimension: Validator,
}

impl ModelValidator {
    /// Compile the schemas of `schemas`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidatorBuild` if a schema does not compile.
    pub fn new(schemas: &SchemaSet) -> SchemaResult<Self> {
        Ok(Self {
            model: compile(schemas, SchemaKind::Model)?,
            cube: compile(schemas, SchemaKind::Cube)?,
            dimension: compile(schemas, SchemaKind::Dimension)?,
        })
    }

    /// Compile the bundled schemas.
    pub fn bundled() -> SchemaResult<Self> {
        Self::new(SchemaSet::bundled()?)
    }

    /// Validate a raw model document.
    pub fn validate(&self, document: &Value) -> Vec<ValidationIssue> {
        let mut issues = self.validate_model(document);

        if let Some(cubes) = document.get("cubes").and_then(Value::as_array) {
            for cube in cubes {
                issues.extend(self.validate_cube(cube));
            }
        }
        if let Some(dimensions) = document.get("dimensions").and_then(Value::as_array) {
            for dimension in dimensions.iter().filter(|d| !d.is_string()) {
                issues.extend(self.validate_dimension(dimension));
            }
        }

        let errors = issues.iter().filter(|i| i.is_error()).count();
        tracing::info!(
            errors,
            defaults = issues.len() - errors,
            "model validation finished"
        );
        issues
    }

    /// Validate typed metadata.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidMetadata` if the metadata can not be
    /// converted to a JSON document.
    pub fn validate_metadata(&self, metadata: &ModelMetadata) -> ModelResult<Vec<ValidationIssue>> {
        Ok(self.validate(&metadata.to_value()?))
    }

    /// Model-level issues: the model schema and bare-name dimensions.
    pub fn validate_model(&self, document: &Value) -> Vec<ValidationIssue> {
        let mut issues = collect_errors(&self.model, Scope::Model, None, document);

        if let Some(dimensions) = document.get("dimensions").and_then(Value::as_array) {
            for name in dimensions.iter().filter_map(Value::as_str) {
                issues.push(ValidationIssue::new(
                    Severity::Default,
                    Scope::Model,
                    None,
                    Some("dimensions".to_string()),
                    format!(
                        "Dimension '{name}' is not described, creating flat single-attribute dimension"
                    ),
                ));
            }
        }
        issues
    }

    /// Issues of one cube fragment.
    pub fn validate_cube(&self, cube: &Value) -> Vec<ValidationIssue> {
        collect_errors(&self.cube, Scope::Cube, object_name(cube), cube)
    }

    /// Issues of one described dimension fragment.
    pub fn validate_dimension(&self, dimension: &Value) -> Vec<ValidationIssue> {
        let name = object_name(dimension);
        let mut issues = collect_errors(&self.dimension, Scope::Dimension, name.clone(), dimension);

        let Some(dim) = dimension.as_object() else {
            return issues;
        };
        let advisory = |severity, message: &str| {
            ValidationIssue::new(severity, Scope::Dimension, name.clone(), None, message)
        };

        if !dim.contains_key("default_hierarchy_name") {
            issues.push(advisory(
                Severity::Default,
                "No default hierarchy name specified, using first one",
            ));
        }
        match (dim.contains_key("levels"), dim.contains_key("attributes")) {
            (false, false) => issues.push(advisory(
                Severity::Default,
                "Neither levels nor attributes specified, creating flat dimension without details",
            )),
            (true, true) => issues.push(advisory(
                Severity::Error,
                "Both levels and attributes specified",
            )),
            _ => {}
        }
        issues
    }
}

/// Validate `document` with the bundled schemas.
///
/// # Errors
///
/// Fails only if the bundled schemas can not be loaded or compiled.
pub fn validate_model(document: &Value) -> SchemaResult<Vec<ValidationIssue>> {
    Ok(ModelValidator::bundled()?.validate(document))
}

fn compile(schemas: &SchemaSet, kind: SchemaKind) -> SchemaResult<Validator> {
    tracing::debug!(schema = kind.file_name(), "compiling schema");
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft4);
    opts.build(schemas.get(kind))
        .map_err(|e| SchemaError::ValidatorBuild {
            schema: kind.file_name().to_string(),
            reason: e.to_string(),
        })
}

fn collect_errors(
    validator: &Validator,
    scope: Scope,
    object: Option<String>,
    instance: &Value,
) -> Vec<ValidationIssue> {
    validator
        .iter_errors(instance)
        .map(|e| {
            ValidationIssue::new(
                Severity::Error,
                scope,
                object.clone(),
                property_path(&e.instance_path.to_string()),
                e.to_string(),
            )
        })
        .collect()
}

fn object_name(fragment: &Value) -> Option<String> {
    fragment
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Convert a JSON pointer (`/cubes/0/name`) to a dotted path (`cubes.0.name`).
/// The root pointer has no path.
fn property_path(pointer: &str) -> Option<String> {
    if pointer.is_empty() {
        return None;
    }
    let segments: Vec<String> = pointer
        .trim_start_matches('/')
        .split('/')
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect();
    Some(segments.join("."))
}
