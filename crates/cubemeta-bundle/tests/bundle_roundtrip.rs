//! # Bundle Round-Trip Tests
//!
//! Assembling a bundle, writing it back out and reassembling it must yield
//! an equivalent model. The walk order of fragment files is not the
//! declaration order, so cubes and dimensions are compared by name.

use std::collections::BTreeMap;
use std::path::Path;

use cubemeta_bundle::{read_bundle, read_bundle_document, write_bundle, BundleError};
use cubemeta_core::{DimensionEntry, ModelMetadata};
use serde_json::{json, Value};

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn sample_bundle(root: &Path) {
    std::fs::create_dir_all(root.join("extra")).unwrap();
    write_json(
        &root.join("model.json"),
        &json!({
            "name": "retail",
            "label": "Retail",
            "dimensions": ["flag"],
            "joins": [{"name": "product", "master": "sales.product_id", "detail": "product.id"}],
            "mappings": {"amount": "sales.amt"},
            "browser_options": {"safe_labels": true},
            "custom": {"owner": "bi-team"}
        }),
    );
    write_json(
        &root.join("dim_time.json"),
        &json!({"name": "time", "levels": ["year", "month"], "default_hierarchy_name": "ym"}),
    );
    write_json(
        &root.join("extra/dimension_product.json"),
        &json!({"name": "product", "attributes": ["code", "name"]}),
    );
    write_json(
        &root.join("cube_sales.json"),
        &json!({
            "name": "sales",
            "dimensions": ["time", "product", "flag"],
            "measures": ["amount"],
            "joins": [{"name": "product", "alias": "p"}]
        }),
    );
    write_json(
        &root.join("cube_returns.json"),
        &json!({"name": "returns", "dimensions": ["time"], "datastore": "archive"}),
    );
}

fn cubes_by_name(model: &ModelMetadata) -> BTreeMap<String, Value> {
    model
        .cubes
        .iter()
        .map(|c| (c.name.clone(), serde_json::to_value(c).unwrap()))
        .collect()
}

fn dimensions_by_name(model: &ModelMetadata) -> BTreeMap<String, Value> {
    model
        .dimensions
        .iter()
        .map(|d| (d.name().to_string(), serde_json::to_value(d).unwrap()))
        .collect()
}

fn assert_equivalent(a: &ModelMetadata, b: &ModelMetadata) {
    assert_eq!(cubes_by_name(a), cubes_by_name(b));
    assert_eq!(dimensions_by_name(a), dimensions_by_name(b));

    let strip = |m: &ModelMetadata| ModelMetadata {
        cubes: Vec::new(),
        dimensions: Vec::new(),
        ..m.clone()
    };
    assert_eq!(strip(a), strip(b));
}

#[test]
fn assemble_write_reassemble_is_equivalent() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let target = dir.path().join("target");
    sample_bundle(&source);

    let original = read_bundle(&source).unwrap();
    assert_eq!(original.cubes.len(), 2);
    assert_eq!(original.dimensions.len(), 3);

    write_bundle(&target, &original, false).unwrap();
    let reread = read_bundle(&target).unwrap();
    assert_equivalent(&original, &reread);
}

#[test]
fn written_bundle_keeps_bare_dimensions_inline() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let target = dir.path().join("target");
    sample_bundle(&source);

    let model = read_bundle(&source).unwrap();
    write_bundle(&target, &model, false).unwrap();

    assert!(target.join("dim_time.json").is_file());
    assert!(target.join("dim_product.json").is_file());
    assert!(!target.join("dim_flag.json").exists());

    let main = read_bundle_document(&target).unwrap();
    assert_eq!(main["dimensions"][0], json!("flag"));
    assert_eq!(main["custom"], json!({"owner": "bi-team"}));

    let reread = read_bundle(&target).unwrap();
    assert!(matches!(reread.dimension("flag"), Some(DimensionEntry::Name(_))));
}

#[test]
fn replace_overwrites_previous_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let target = dir.path().join("target");
    sample_bundle(&source);
    let model = read_bundle(&source).unwrap();
    write_bundle(&target, &model, false).unwrap();

    let small = ModelMetadata::simple("contracts", &["year"], &["amount"]);
    let err = write_bundle(&target, &small, false).unwrap_err();
    assert!(matches!(err, BundleError::TargetExists { .. }));

    write_bundle(&target, &small, true).unwrap();
    let reread = read_bundle(&target).unwrap();
    assert_eq!(reread.cube_names(), vec!["contracts"]);
    assert_eq!(reread.dimension_names(), vec!["year"]);
}
