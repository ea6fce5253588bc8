//! Bundle writing.
//!
//! Serializes a model into a bundle directory: one `dim_<name>.json` per
//! described dimension, one `cube_<name>.json` per cube, and `model.json`
//! with every remaining top-level key. Bare-name dimensions stay inline in
//! `model.json`. Files use four-space indentation and end with a newline.

use std::path::Path;

use cubemeta_core::{DimensionEntry, ModelMetadata};
use serde::Serialize;
use serde_json::Value;

use crate::assemble::MAIN_FILE;
use crate::error::{BundleError, BundleResult, FragmentKind};

/// Write `metadata` as a bundle directory at `path`.
///
/// An existing target is only replaced when it is a bundle directory (has
/// `model.json`) and `replace` is set; the old directory is removed first.
///
/// # Errors
///
/// - `TargetExists` if `path` is a file, or a bundle and `replace` is false.
/// - `NotABundle` if `path` is a directory without `model.json`.
/// - `InvalidFragmentName` if a cube or dimension name is not a plain file name.
pub fn write_bundle(path: &Path, metadata: &ModelMetadata, replace: bool) -> BundleResult<()> {
    prepare_target(path, replace)?;
    std::fs::create_dir_all(path).map_err(|e| BundleError::io(path, e))?;

    let mut inline_dimensions = Vec::new();
    for entry in &metadata.dimensions {
        match entry {
            DimensionEntry::Name(name) => inline_dimensions.push(Value::String(name.clone())),
            DimensionEntry::Described(dim) => {
                write_fragment(path, FragmentKind::Dimension, &dim.name, dim)?;
            }
        }
    }

    for cube in &metadata.cubes {
        write_fragment(path, FragmentKind::Cube, &cube.name, cube)?;
    }

    let mut main = match metadata.to_value()? {
        Value::Object(map) => map,
        other => {
            return Err(BundleError::InvalidDocument {
                location: path.join(MAIN_FILE).display().to_string(),
                detail: format!("model serialized to {other}, expected an object"),
            })
        }
    };
    main.remove(FragmentKind::Cube.list_key());
    main.remove(FragmentKind::Dimension.list_key());
    if !inline_dimensions.is_empty() {
        main.insert(
            FragmentKind::Dimension.list_key().to_string(),
            Value::Array(inline_dimensions),
        );
    }
    write_pretty(&path.join(MAIN_FILE), &Value::Object(main))?;

    tracing::info!(
        bundle = %path.display(),
        dimensions = metadata.dimensions.len(),
        cubes = metadata.cubes.len(),
        "wrote model bundle"
    );
    Ok(())
}

fn prepare_target(path: &Path, replace: bool) -> BundleResult<()> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(BundleError::TargetExists {
            path: path.to_path_buf(),
            reason: "target is a file, can not replace",
        });
    }
    if !path.join(MAIN_FILE).exists() {
        return Err(BundleError::NotABundle {
            path: path.to_path_buf(),
        });
    }
    if !replace {
        return Err(BundleError::TargetExists {
            path: path.to_path_buf(),
            reason: "remove it or force replacement",
        });
    }

    tracing::debug!(bundle = %path.display(), "removing existing bundle before write");
    std::fs::remove_dir_all(path).map_err(|e| BundleError::io(path, e))
}

fn write_fragment(
    dir: &Path,
    kind: FragmentKind,
    name: &str,
    fragment: &impl Serialize,
) -> BundleResult<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(BundleError::InvalidFragmentName {
            kind,
            name: name.to_string(),
        });
    }
    let file = dir.join(format!("{}{name}.json", kind.file_prefix()));
    write_pretty(&file, fragment)
}

fn write_pretty(file: &Path, value: &impl Serialize) -> BundleResult<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| BundleError::Model(e.into()))?;
    buf.push(b'\n');
    std::fs::write(file, buf).map_err(|e| BundleError::io(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubemeta_core::{CubeMetadata, DimensionMetadata};
    use serde_json::json;

    fn sample() -> ModelMetadata {
        ModelMetadata {
            name: Some("m".to_string()),
            cubes: vec![CubeMetadata::named("sales")],
            dimensions: vec![
                DimensionEntry::Name("flag".to_string()),
                DimensionEntry::Described(DimensionMetadata::flat("time")),
            ],
            ..ModelMetadata::default()
        }
    }

    #[test]
    fn writes_one_file_per_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        write_bundle(&target, &sample(), false).unwrap();

        assert!(target.join("model.json").is_file());
        assert!(target.join("dim_time.json").is_file());
        assert!(target.join("cube_sales.json").is_file());

        let main: Value =
            serde_json::from_str(&std::fs::read_to_string(target.join("model.json")).unwrap())
                .unwrap();
        assert_eq!(main, json!({"name": "m", "dimensions": ["flag"]}));
    }

    #[test]
    fn uses_four_space_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        write_bundle(&target, &sample(), false).unwrap();

        let text = std::fs::read_to_string(target.join("cube_sales.json")).unwrap();
        assert_eq!(text, "{\n    \"name\": \"sales\"\n}\n");
    }

    #[test]
    fn refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        std::fs::write(&target, "x").unwrap();
        let err = write_bundle(&target, &sample(), true).unwrap_err();
        assert!(matches!(err, BundleError::TargetExists { .. }));
    }

    #[test]
    fn refuses_directory_without_model_json() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_bundle(dir.path(), &sample(), true).unwrap_err();
        assert!(matches!(err, BundleError::NotABundle { .. }));
    }

    #[test]
    fn refuses_existing_bundle_without_replace() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        write_bundle(&target, &sample(), false).unwrap();
        let err = write_bundle(&target, &sample(), false).unwrap_err();
        assert!(matches!(err, BundleError::TargetExists { .. }));
    }

    #[test]
    fn replace_removes_stale_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        write_bundle(&target, &sample(), false).unwrap();

        let smaller = ModelMetadata {
            name: Some("m".to_string()),
            ..ModelMetadata::default()
        };
        write_bundle(&target, &smaller, true).unwrap();
        assert!(!target.join("cube_sales.json").exists());
        assert!(!target.join("dim_time.json").exists());
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let model = ModelMetadata {
            cubes: vec![CubeMetadata::named("../escape")],
            ..ModelMetadata::default()
        };
        let err = write_bundle(&dir.path().join("out"), &model, false).unwrap_err();
        assert!(matches!(err, BundleError::InvalidFragmentName { .. }));
    }
}
