//! Validator infrastructure errors.
//!
//! Content problems in a model are never errors here; they are reported as
//! [`ValidationIssue`](cubemeta_core::ValidationIssue)s. These variants cover
//! the cases where validation can not run at all.

use thiserror::Error;

/// Error while loading schemas or building a validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema document could not be read or parsed.
    #[error("schema load error for '{schema}': {reason}")]
    SchemaLoad {
        /// Schema filename.
        schema: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// A schema could not be compiled (e.g. it is not a valid schema).
    #[error("validator build error for schema '{schema}': {reason}")]
    ValidatorBuild {
        /// Schema filename.
        schema: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
