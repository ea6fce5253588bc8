//! Integration test: validate complete model documents with the bundled
//! schemas and with a schema set loaded from a directory.

use cubemeta_core::{Scope, Severity};
use cubemeta_schema::{validate_model, ModelValidator, SchemaKind, SchemaSet};
use serde_json::json;

fn retail_model() -> serde_json::Value {
    json!({
        "name": "retail",
        "label": "Retail",
        "locale": "en",
        "datastore": "warehouse",
        "joins": [{"name": "product", "master": "sales.product_id", "detail": "product.id"}],
        "mappings": {"product.code": "product.sku"},
        "cubes": [
            {
                "name": "sales",
                "label": "Sales",
                "dimensions": ["date", "product", "flag"],
                "measures": [{"name": "amount", "label": "Amount"}],
                "aggregates": [{"name": "amount_sum", "function": "sum", "measure": "amount"}],
                "joins": [{"name": "product", "alias": "p", "method": "match"}]
            },
            {"name": "returns", "dimensions": ["date"], "measures": ["quantity"]}
        ],
        "dimensions": [
            {
                "name": "date",
                "role": "time",
                "levels": [
                    {"name": "year", "attributes": ["year"]},
                    {"name": "month", "attributes": ["month", "month_name"]}
                ],
                "hierarchies": [{"name": "ym", "levels": ["year", "month"]}],
                "default_hierarchy_name": "ym"
            },
            {"name": "product", "attributes": ["code", "name"]},
            "flag"
        ]
    })
}

#[test]
fn test_complete_model_only_has_advisories() {
    let issues = validate_model(&retail_model()).unwrap();
    assert!(
        issues.iter().all(|i| i.severity == Severity::Default),
        "{issues:#?}"
    );

    // "flag" is bare, "product" has no default hierarchy name.
    assert_eq!(issues.len(), 2, "{issues:#?}");
    assert_eq!(issues[0].scope, Scope::Model);
    assert_eq!(issues[1].scope, Scope::Dimension);
    assert_eq!(issues[1].object.as_deref(), Some("product"));
}

#[test]
fn test_broken_model_collects_every_finding() {
    let mut model = retail_model();
    model["cubes"][1]["name"] = json!("");
    model["cubes"][0]["joins"][0]["method"] = json!("outer");
    model["dimensions"][0]["attributes"] = json!(["year"]);
    model["public_dimensions"] = json!(["date", 3]);

    let issues = validate_model(&model).unwrap();
    let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
    assert_eq!(errors.len(), 4, "{issues:#?}");

    let paths: Vec<Option<&str>> = errors.iter().map(|i| i.property.as_deref()).collect();
    assert!(paths.contains(&Some("public_dimensions.1")));
    assert!(paths.contains(&Some("joins.0.method")));
    assert!(paths.contains(&Some("name")));
    assert!(errors
        .iter()
        .any(|i| i.scope == Scope::Dimension && i.object.as_deref() == Some("date")));
}

#[test]
fn test_schema_set_from_directory_overrides_bundled() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = SchemaSet::bundled().unwrap();
    for kind in SchemaKind::ALL {
        let mut schema = bundled.get(kind).clone();
        if kind == SchemaKind::Cube {
            schema["required"] = json!(["name", "fact"]);
        }
        std::fs::write(
            dir.path().join(kind.file_name()),
            serde_json::to_string_pretty(&schema).unwrap(),
        )
        .unwrap();
    }

    let strict = ModelValidator::new(&SchemaSet::from_dir(dir.path()).unwrap()).unwrap();
    let issues = strict.validate(&retail_model());
    let cube_errors: Vec<_> = issues
        .iter()
        .filter(|i| i.scope == Scope::Cube && i.is_error())
        .collect();
    assert_eq!(cube_errors.len(), 2, "{issues:#?}");
    assert!(cube_errors.iter().all(|i| i.message.contains("fact")));
}
