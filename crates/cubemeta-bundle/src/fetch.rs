//! Resource fetching.
//!
//! Obtains parsed JSON given a location string. A location is either a
//! local filesystem path (plain or `file://` URL) or a network URL.
//! Network fetching is compiled in with the `http` feature; without it a
//! network locator is rejected with [`BundleError::UnsupportedLocation`].
//!
//! Handles are scoped to a single call and closed on every exit path.

use std::path::{Path, PathBuf};

use serde_json::Value;
use url::Url;

use crate::error::{BundleError, BundleResult};

/// Where a location string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A path on the local filesystem.
    Local(PathBuf),
    /// A network resource.
    Remote(Url),
}

impl Location {
    /// Classify a location string.
    ///
    /// Strings that do not parse as absolute URLs, and single-letter schemes
    /// (Windows drive letters), are local paths.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::Local(path),
                Err(()) => Self::Local(PathBuf::from(url.path())),
            },
            Ok(url) if url.scheme().len() > 1 => Self::Remote(url),
            _ => Self::Local(PathBuf::from(location)),
        }
    }
}

/// Source of raw JSON documents.
pub trait ResourceFetcher {
    /// Read and parse a local JSON file.
    fn fetch_path(&self, path: &Path) -> BundleResult<Value>;

    /// Fetch and parse a network JSON resource.
    fn fetch_url(&self, url: &Url) -> BundleResult<Value>;

    /// Fetch and parse the JSON document at `location`.
    fn fetch(&self, location: &str) -> BundleResult<Value> {
        match Location::parse(location) {
            Location::Local(path) => self.fetch_path(&path),
            Location::Remote(url) => self.fetch_url(&url),
        }
    }
}

/// The default fetcher: `std::fs` for local paths, blocking HTTP for URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationFetcher;

impl ResourceFetcher for LocationFetcher {
    fn fetch_path(&self, path: &Path) -> BundleResult<Value> {
        let content = std::fs::read_to_string(path).map_err(|e| BundleError::io(path, e))?;
        parse_json(&content, &path.display().to_string())
    }

    #[cfg(feature = "http")]
    fn fetch_url(&self, url: &Url) -> BundleResult<Value> {
        let location = url.to_string();
        let fetch_error = |e: reqwest::Error| BundleError::Fetch {
            location: location.clone(),
            reason: e.to_string(),
        };

        tracing::debug!(%url, "fetching remote model document");
        let response = reqwest::blocking::get(url.as_str()).map_err(&fetch_error)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BundleError::NotFound {
                location: location.clone(),
            });
        }
        let body = response
            .error_for_status()
            .and_then(|r| r.text())
            .map_err(&fetch_error)?;
        parse_json(&body, &location)
    }

    #[cfg(not(feature = "http"))]
    fn fetch_url(&self, url: &Url) -> BundleResult<Value> {
        Err(BundleError::UnsupportedLocation {
            location: url.to_string(),
            reason: "network locations require the `http` feature".to_string(),
        })
    }
}

/// Parse JSON text, attributing syntax errors to `location`.
pub fn parse_json(content: &str, location: &str) -> BundleResult<Value> {
    serde_json::from_str(content).map_err(|e| BundleError::Syntax {
        location: location.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_local() {
        assert_eq!(
            Location::parse("/srv/models/sales.json"),
            Location::Local(PathBuf::from("/srv/models/sales.json"))
        );
        assert_eq!(
            Location::parse("models/sales.json"),
            Location::Local(PathBuf::from("models/sales.json"))
        );
    }

    #[test]
    fn drive_letters_are_local() {
        assert!(matches!(
            Location::parse("C:\\models\\sales.json"),
            Location::Local(_)
        ));
    }

    #[test]
    fn http_urls_are_remote() {
        assert!(matches!(
            Location::parse("https://example.com/model.json"),
            Location::Remote(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn file_urls_are_local() {
        assert_eq!(
            Location::parse("file:///srv/models/sales.json"),
            Location::Local(PathBuf::from("/srv/models/sales.json"))
        );
    }

    #[test]
    fn fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"name": "m"}"#).unwrap();

        let value = LocationFetcher.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(value["name"], "m");
    }

    #[test]
    fn fetch_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = LocationFetcher.fetch_path(&path).unwrap_err();
        assert!(matches!(err, BundleError::NotFound { .. }));
    }

    #[test]
    fn fetch_malformed_file_is_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"name\": ").unwrap();

        let err = LocationFetcher.fetch_path(&path).unwrap_err();
        match err {
            BundleError::Syntax { location, .. } => assert!(location.ends_with("broken.json")),
            other => panic!("expected Syntax, got {other}"),
        }
    }

    #[cfg(not(feature = "http"))]
    #[test]
    fn remote_without_http_feature_is_unsupported() {
        let err = LocationFetcher
            .fetch("https://example.com/model.json")
            .unwrap_err();
        assert!(matches!(err, BundleError::UnsupportedLocation { .. }));
    }
}
