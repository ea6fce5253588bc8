//! Single-document resolution.
//!
//! A model source is a location string. A local directory is read as a
//! bundle; anything else is fetched and parsed as one JSON document.

use cubemeta_core::ModelMetadata;
use serde_json::Value;

use crate::assemble::read_bundle_document_with;
use crate::error::BundleResult;
use crate::fetch::{Location, LocationFetcher, ResourceFetcher};

/// Read the raw model document from `source`.
pub fn read_model_document(source: &str) -> BundleResult<Value> {
    read_model_document_with(source, &LocationFetcher)
}

/// Read the raw model document from `source` through `fetcher`.
pub fn read_model_document_with(source: &str, fetcher: &dyn ResourceFetcher) -> BundleResult<Value> {
    match Location::parse(source) {
        Location::Local(path) if path.is_dir() => {
            tracing::debug!(bundle = %path.display(), "reading model bundle");
            read_bundle_document_with(&path, fetcher)
        }
        _ => {
            tracing::debug!(%source, "reading model document");
            fetcher.fetch(source)
        }
    }
}

/// Read typed model metadata from `source`.
pub fn read_model_metadata(source: &str) -> BundleResult<ModelMetadata> {
    let document = read_model_document(source)?;
    Ok(ModelMetadata::from_value(document)?)
}
