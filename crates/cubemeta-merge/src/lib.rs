//! # cubemeta-merge — Metadata Merging
//!
//! Pure merge algorithms over borrowed metadata. Nothing here performs I/O
//! or mutates its inputs; every function returns a new value.
//!
//! ## Algorithms
//!
//! - **Provider-default merge** ([`merge_provider_defaults`]): baseline
//!   content of a provider kind placed ahead of user content.
//!
//! - **Cube resolution** ([`resolve_cube`]): a stored cube fragment combined
//!   with the model-wide datastore, browser options, mappings and joins.
//!   Named cube joins override matching model joins field by field.
//!
//! - **Cube options** ([`cube_options`]): four option layers, model first.
//!
//! - **Dimension templates** ([`resolve_dimension`]): a dimension derived
//!   from an already resolved template dimension.
//!
//! ## Precedence
//!
//! The more specific side always wins: user over provider defaults, cube
//! over model.

pub mod cube;
pub mod defaults;
pub mod dimension;

pub use cube::{cube_options, merge_join, merge_joins, merge_mappings, resolve_cube, resolve_cube_fragment};
pub use defaults::merge_provider_defaults;
pub use dimension::{resolve_dimension, DimensionTemplates};
