//! Bundle-specific error types.
//!
//! Structured errors for fetching, assembling and writing model bundles.
//! All errors carry the location or path they refer to. Bundle loading is
//! fail-fast: the first error aborts the whole load.

use std::fmt;
use std::path::PathBuf;

use cubemeta_core::ModelError;
use thiserror::Error;

/// Kind of a bundle fragment file, decided by its filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// `dim_*.json` or `dimension_*.json`.
    Dimension,
    /// `cube_*.json`.
    Cube,
}

impl FragmentKind {
    /// Key of the model document list the fragment is appended to.
    pub fn list_key(&self) -> &'static str {
        match self {
            Self::Dimension => "dimensions",
            Self::Cube => "cubes",
        }
    }

    /// Filename prefix used when writing a bundle.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Dimension => "dim_",
            Self::Cube => "cube_",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension => f.write_str("dimension"),
            Self::Cube => f.write_str("cube"),
        }
    }
}

/// Errors that can occur while reading or writing model metadata.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The content at a location is not valid JSON.
    #[error("syntax error in {location}: {source}")]
    Syntax {
        location: String,
        source: serde_json::Error,
    },

    /// A resource, bundle directory or main model file does not exist.
    #[error("resource not found: {location}")]
    NotFound { location: String },

    /// A fragment file has no `name` key.
    #[error("{kind} file '{path}' has no name key")]
    MissingField { kind: FragmentKind, path: PathBuf },

    /// Two entries claim the same cube or dimension name.
    #[error("{kind} '{name}' defined multiple times (in '{path}')")]
    DuplicateName {
        kind: FragmentKind,
        name: String,
        path: PathBuf,
    },

    /// The write target already exists.
    #[error("target {path} already exists: {reason}")]
    TargetExists { path: PathBuf, reason: &'static str },

    /// The write target is a directory without `model.json`.
    #[error("target {path} is not a model directory, can not replace")]
    NotABundle { path: PathBuf },

    /// A document has the wrong overall shape (e.g. the main file is not an object).
    #[error("invalid document at {location}: {detail}")]
    InvalidDocument { location: String, detail: String },

    /// A cube or dimension name can not be used as a fragment filename.
    #[error("{kind} name {name:?} can not be used as a bundle file name")]
    InvalidFragmentName { kind: FragmentKind, name: String },

    /// The location uses a scheme this build can not fetch.
    #[error("unsupported location {location}: {reason}")]
    UnsupportedLocation { location: String, reason: String },

    /// A network fetch failed.
    #[error("failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// The assembled document does not fit the typed metadata records.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// I/O error at a specific path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BundleError {
    /// Wrap an I/O error, mapping `NotFound` to [`BundleError::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                location: path.display().to_string(),
            }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type alias for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;
