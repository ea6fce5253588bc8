//! # cubemeta-schema — Model Validation
//!
//! Validates composite model documents and reports severity-tagged
//! [`ValidationIssue`](cubemeta_core::ValidationIssue)s instead of failing.
//!
//! ## Schemas (`schemas`)
//!
//! [`SchemaSet`] holds the model, cube and dimension schemas (JSON Schema
//! Draft 4). The bundled set is compiled into the crate; a directory with
//! the same three files can replace it.
//!
//! ## Validation (`validator`)
//!
//! [`ModelValidator`] compiles a schema set once and checks documents
//! against it, adding advisory checks for dimensions. Raw
//! `serde_json::Value` documents are accepted so that documents which do
//! not fit the typed records can still be reviewed.
//!
//! ## Crate Policy
//!
//! - Depends only on `cubemeta-core` internally.
//! - Content problems are issues, never errors. [`SchemaError`] is reserved
//!   for schemas that can not be loaded or compiled.

pub mod error;
pub mod schemas;
pub mod validator;

pub use error::{SchemaError, SchemaResult};
pub use schemas::{SchemaKind, SchemaSet};
pub use validator::{validate_model, ModelValidator};
