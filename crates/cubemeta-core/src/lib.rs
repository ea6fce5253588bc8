//! # cubemeta-core — Foundational Types for cubemeta
//!
//! This crate is the bedrock of the cubemeta workspace. It defines the typed
//! records every other crate passes around: the composite model document,
//! its cube and dimension fragments, join specifications, and the
//! severity-tagged validation issues produced by the schema validator.
//! Every other crate in the workspace depends on `cubemeta-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed records with a pass-through bag.** `ModelMetadata`,
//!    `CubeMetadata`, `DimensionMetadata` and `JoinSpec` name the keys the
//!    resolution layer reasons about. Everything else is kept verbatim in an
//!    `extra` map so a load/write cycle never drops user content.
//!
//! 2. **Presence is meaningful.** Options, mappings and browser options are
//!    `Option<JsonMap>`: "absent" and "present but empty" are different
//!    inputs to the override algorithms.
//!
//! 3. **One error taxonomy for resolution.** [`ModelError`] carries every
//!    lookup and resolution failure (unknown cube, malformed model joins,
//!    missing templates, ...). Load-time and validator errors live in their
//!    own crates.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cubemeta-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public record types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod issue;
pub mod metadata;

// Re-export primary types for ergonomic imports.
pub use error::{ModelError, ModelResult};
pub use issue::{Scope, Severity, ValidationIssue};
pub use metadata::{
    CubeMetadata, CubeSummary, DimensionEntry, DimensionLink, DimensionMetadata, JoinSpec,
    JsonMap, LinkedDimension, ModelMetadata,
};
