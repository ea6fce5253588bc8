//! # cubemeta-bundle — Model Metadata I/O
//!
//! Reads and writes model metadata:
//!
//! - **Resource fetching** ([`fetch`]): location strings to parsed JSON.
//!   Local paths and `file://` URLs are read from disk; `http(s)` URLs are
//!   fetched with a blocking client when the `http` feature is enabled.
//!
//! - **Bundle assembly** ([`assemble`]): a directory holding `model.json`
//!   plus `dim_*.json` / `dimension_*.json` / `cube_*.json` fragments is
//!   merged into one composite model document.
//!
//! - **Bundle writing** ([`write`]): the inverse of assembly.
//!
//! - **Source resolution** ([`source`]): a directory is a bundle, anything
//!   else is a single document.
//!
//! ## Error Policy
//!
//! Loading is fail-fast. The first malformed file, missing name or duplicate
//! name aborts the load with a [`BundleError`]; a partially assembled model
//! is never returned.
//!
//! ## Crate Policy
//!
//! - Depends only on `cubemeta-core` internally.
//! - All blocking I/O of the workspace happens here.

pub mod assemble;
pub mod error;
pub mod fetch;
pub mod source;
pub mod write;

// Re-export primary types.
pub use assemble::{read_bundle, read_bundle_document, read_bundle_document_with, MAIN_FILE};
pub use error::{BundleError, BundleResult, FragmentKind};
pub use fetch::{Location, LocationFetcher, ResourceFetcher};
pub use source::{read_model_document, read_model_document_with, read_model_metadata};
pub use write::write_bundle;
