//! # Error Types — Resolution Error Taxonomy
//!
//! Defines the errors raised while looking up and resolving metadata held
//! by a provider. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Lookup misses name the object that was asked for.
//! - Join errors carry the cube name and the join name or position.
//! - Resolution errors are fatal to one lookup call only; they never poison
//!   the stored metadata.

use thiserror::Error;

/// Errors raised by metadata lookup and resolution.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No cube with the given name is registered.
    #[error("unknown cube '{0}'")]
    NoSuchCube(String),

    /// No dimension with the given name is registered.
    #[error("unknown dimension '{0}'")]
    NoSuchDimension(String),

    /// A model-level join has no `name`, so cube joins cannot be matched
    /// against it.
    #[error("missing required 'name' in model-level join at position {position}")]
    MissingJoinName {
        /// Zero-based position in the model join list.
        position: usize,
    },

    /// Two model-level joins share a name.
    #[error("duplicate model-level join name '{name}'")]
    DuplicateJoinName {
        /// The repeated join name.
        name: String,
    },

    /// A resolved join lacks its master or detail key.
    #[error("no {missing} in join {join} of cube '{cube}'")]
    InvalidJoin {
        /// Cube being resolved.
        cube: String,
        /// Join name, or `#<position>` for unnamed joins.
        join: String,
        /// The missing field (`master` or `detail`).
        missing: &'static str,
    },

    /// A dimension refers to a template that was not supplied.
    #[error("dimension '{dimension}' requires template '{template}'")]
    TemplateRequired {
        /// Dimension being resolved.
        dimension: String,
        /// Name of the missing template.
        template: String,
    },

    /// The provider already has a store bound.
    #[error("provider already bound to store '{0}'")]
    StoreAlreadyBound(String),

    /// No provider factory is registered under the given kind.
    #[error("unable to find model provider of kind '{0}'")]
    UnknownProvider(String),

    /// A document does not fit the typed metadata records.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
}

/// Result type alias for resolution operations.
pub type ModelResult<T> = Result<T, ModelError>;
