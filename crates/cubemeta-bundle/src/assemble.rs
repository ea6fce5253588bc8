//! Directory bundle assembly.
//!
//! A bundle is a directory holding a required `model.json` plus optional
//! fragment files:
//!
//! ```text
//! <bundle-root>/
//!   model.json              # required
//!   dim_<name>.json         # dimension fragment
//!   dimension_<name>.json   # dimension fragment
//!   cube_<name>.json        # cube fragment
//! ```
//!
//! Fragments are found by filename prefix and `.json` extension anywhere
//! below the root and appended to the `dimensions` / `cubes` lists of the
//! main document. Assembly is fail-fast: a missing `name`, a duplicate name
//! or an unreadable file aborts the whole load.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cubemeta_core::ModelMetadata;
use serde_json::{Map, Value};

use crate::error::{BundleError, BundleResult, FragmentKind};
use crate::fetch::{LocationFetcher, ResourceFetcher};

/// Name of the main model file of a bundle.
pub const MAIN_FILE: &str = "model.json";

/// Classify a file name as a bundle fragment.
///
/// The kind is decided by the text before the first `_`; only `.json`
/// files are fragments.
pub fn fragment_kind(file_name: &str) -> Option<FragmentKind> {
    let stem = file_name.strip_suffix(".json")?;
    let (prefix, _) = stem.split_once('_')?;
    match prefix {
        "dim" | "dimension" => Some(FragmentKind::Dimension),
        "cube" => Some(FragmentKind::Cube),
        _ => None,
    }
}

/// Assemble the bundle at `path` into one raw model document.
pub fn read_bundle_document(path: &Path) -> BundleResult<Value> {
    read_bundle_document_with(path, &LocationFetcher)
}

/// Assemble the bundle at `path` into typed model metadata.
pub fn read_bundle(path: &Path) -> BundleResult<ModelMetadata> {
    let document = read_bundle_document(path)?;
    Ok(ModelMetadata::from_value(document)?)
}

/// Assemble the bundle at `path`, reading files through `fetcher`.
///
/// # Errors
///
/// - `NotFound` if `path` is not a directory or has no `model.json`.
/// - `Syntax` if any file is not valid JSON.
/// - `InvalidDocument` if `model.json` is not an object or its
///   `dimensions`/`cubes` keys are not lists.
/// - `MissingField` if a fragment has no string `name`.
/// - `DuplicateName` if a fragment repeats a name already collected.
pub fn read_bundle_document_with(
    path: &Path,
    fetcher: &dyn ResourceFetcher,
) -> BundleResult<Value> {
    if !path.is_dir() {
        return Err(BundleError::NotFound {
            location: path.display().to_string(),
        });
    }

    let main_path = path.join(MAIN_FILE);
    if !main_path.is_file() {
        return Err(BundleError::NotFound {
            location: main_path.display().to_string(),
        });
    }

    let mut model = match fetcher.fetch_path(&main_path)? {
        Value::Object(map) => map,
        other => {
            return Err(BundleError::InvalidDocument {
                location: main_path.display().to_string(),
                detail: format!("expected a JSON object, found {}", json_type(&other)),
            })
        }
    };

    let mut dimensions = FragmentList::from_main(&mut model, FragmentKind::Dimension, &main_path)?;
    let mut cubes = FragmentList::from_main(&mut model, FragmentKind::Cube, &main_path)?;

    let mut files = Vec::new();
    collect_fragment_files(path, &mut files)?;

    for (kind, file) in files {
        let fragment = fetcher.fetch_path(&file)?;
        let list = match kind {
            FragmentKind::Dimension => &mut dimensions,
            FragmentKind::Cube => &mut cubes,
        };
        let name = list.push(fragment, &file)?;
        tracing::debug!(file = %file.display(), %kind, %name, "loaded bundle fragment");
    }

    tracing::info!(
        bundle = %path.display(),
        dimensions = dimensions.items.len(),
        cubes = cubes.items.len(),
        "assembled model bundle"
    );

    model.insert(
        FragmentKind::Dimension.list_key().to_string(),
        Value::Array(dimensions.items),
    );
    model.insert(
        FragmentKind::Cube.list_key().to_string(),
        Value::Array(cubes.items),
    );

    Ok(Value::Object(model))
}

/// Entries of one kind collected so far, with their names.
struct FragmentList {
    kind: FragmentKind,
    items: Vec<Value>,
    names: HashSet<String>,
}

impl FragmentList {
    /// Take the inline list of `kind` out of the main document, defaulting
    /// to an empty list.
    fn from_main(model: &mut Map<String, Value>, kind: FragmentKind, main_path: &Path) -> BundleResult<Self> {
        let items = match model.remove(kind.list_key()) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(BundleError::InvalidDocument {
                    location: main_path.display().to_string(),
                    detail: format!(
                        "'{}' must be a list, found {}",
                        kind.list_key(),
                        json_type(&other)
                    ),
                })
            }
        };

        let names = items.iter().filter_map(entry_name).map(str::to_string).collect();
        Ok(Self { kind, items, names })
    }

    /// Append a fragment, returning its name.
    fn push(&mut self, fragment: Value, file: &Path) -> BundleResult<String> {
        let name = match fragment.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => {
                return Err(BundleError::MissingField {
                    kind: self.kind,
                    path: file.to_path_buf(),
                })
            }
        };

        if !self.names.insert(name.clone()) {
            return Err(BundleError::DuplicateName {
                kind: self.kind,
                name,
                path: file.to_path_buf(),
            });
        }

        self.items.push(fragment);
        Ok(name)
    }
}

/// Name of an inline list entry: a bare string or an object's `name`.
fn entry_name(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(name) => Some(name),
        other => other.get("name").and_then(Value::as_str),
    }
}

/// Recursively collect fragment files under `dir`.
///
/// Entries are visited sorted by file name; the files of a directory come
/// before the contents of its subdirectories.
fn collect_fragment_files(dir: &Path, acc: &mut Vec<(FragmentKind, PathBuf)>) -> BundleResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| BundleError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BundleError::io(dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();

    let mut subdirs = Vec::new();
    for path in paths {
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }
        let kind = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(fragment_kind);
        if let Some(kind) = kind {
            acc.push((kind, path));
        }
    }

    for subdir in subdirs {
        collect_fragment_files(&subdir, acc)?;
    }

    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_json(dir: &Path, name: &str, value: Value) {
        std::fs::write(dir.join(name), serde_json::to_string(&value).unwrap()).unwrap();
    }

    #[test]
    fn classifies_fragment_files() {
        assert_eq!(fragment_kind("dim_time.json"), Some(FragmentKind::Dimension));
        assert_eq!(fragment_kind("dimension_time.json"), Some(FragmentKind::Dimension));
        assert_eq!(fragment_kind("cube_sales.json"), Some(FragmentKind::Cube));
        assert_eq!(fragment_kind("model.json"), None);
        assert_eq!(fragment_kind("cube_sales.yaml"), None);
        assert_eq!(fragment_kind("cubes_sales.json"), None);
        assert_eq!(fragment_kind("dim.json"), None);
    }

    #[test]
    fn assembles_minimal_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({"name": "m"}));
        write_json(dir.path(), "dim_time.json", json!({"name": "time"}));
        write_json(dir.path(), "cube_sales.json", json!({"name": "sales"}));

        let model = read_bundle(dir.path()).unwrap();
        assert_eq!(model.name.as_deref(), Some("m"));
        assert_eq!(model.dimension_names(), vec!["time"]);
        assert_eq!(model.cube_names(), vec!["sales"]);
    }

    #[test]
    fn inline_entries_come_first() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "model.json",
            json!({"dimensions": ["flag"], "cubes": [{"name": "inline"}]}),
        );
        write_json(dir.path(), "dimension_product.json", json!({"name": "product"}));
        write_json(dir.path(), "cube_sales.json", json!({"name": "sales"}));

        let doc = read_bundle_document(dir.path()).unwrap();
        assert_eq!(doc["dimensions"], json!(["flag", {"name": "product"}]));
        assert_eq!(doc["cubes"], json!([{"name": "inline"}, {"name": "sales"}]));
    }

    #[test]
    fn walks_subdirectories_and_ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({}));
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_json(&dir.path().join("nested"), "cube_deep.json", json!({"name": "deep"}));
        std::fs::write(dir.path().join("README.md"), "notes").unwrap();
        write_json(dir.path(), "other.json", json!({"name": "ignored"}));

        let doc = read_bundle_document(dir.path()).unwrap();
        assert_eq!(doc["cubes"], json!([{"name": "deep"}]));
        assert_eq!(doc["dimensions"], json!([]));
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_bundle_document(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, BundleError::NotFound { .. }));
    }

    #[test]
    fn missing_main_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "cube_sales.json", json!({"name": "sales"}));
        let err = read_bundle_document(dir.path()).unwrap_err();
        match err {
            BundleError::NotFound { location } => assert!(location.ends_with("model.json")),
            other => panic!("expected NotFound, got {other}"),
        }
    }

    #[test]
    fn fragment_without_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({}));
        write_json(dir.path(), "dim_time.json", json!({"label": "Time"}));
        let err = read_bundle_document(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            BundleError::MissingField {
                kind: FragmentKind::Dimension,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_fragment_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({}));
        write_json(dir.path(), "dim_time.json", json!({"name": "time"}));
        write_json(dir.path(), "dimension_time.json", json!({"name": "time"}));
        let err = read_bundle_document(dir.path()).unwrap_err();
        match err {
            BundleError::DuplicateName { kind, name, .. } => {
                assert_eq!(kind, FragmentKind::Dimension);
                assert_eq!(name, "time");
            }
            other => panic!("expected DuplicateName, got {other}"),
        }
    }

    #[test]
    fn fragment_duplicating_inline_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({"cubes": [{"name": "sales"}]}));
        write_json(dir.path(), "cube_sales.json", json!({"name": "sales"}));
        let err = read_bundle_document(dir.path()).unwrap_err();
        assert!(matches!(err, BundleError::DuplicateName { .. }));
    }

    #[test]
    fn same_name_in_different_kinds_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({}));
        write_json(dir.path(), "dim_sales.json", json!({"name": "sales"}));
        write_json(dir.path(), "cube_sales.json", json!({"name": "sales"}));
        assert!(read_bundle_document(dir.path()).is_ok());
    }

    #[test]
    fn malformed_fragment_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!({}));
        std::fs::write(dir.path().join("cube_bad.json"), "{").unwrap();
        let err = read_bundle_document(dir.path()).unwrap_err();
        assert!(matches!(err, BundleError::Syntax { .. }));
    }

    #[test]
    fn main_file_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "model.json", json!([1, 2]));
        let err = read_bundle_document(dir.path()).unwrap_err();
        assert!(matches!(err, BundleError::InvalidDocument { .. }));
    }
}
