//! Dimension resolution and templates.
//!
//! A dimension may name a `template`: an already resolved dimension it is
//! derived from. The template supplies every field the fragment leaves out.
//! `levels` and `attributes` are taken as one unit, from the fragment when
//! it declares either of them, so inheritance never produces a dimension
//! with both.

use std::collections::BTreeMap;

use cubemeta_core::{DimensionEntry, DimensionMetadata, ModelError, ModelResult};

/// Resolved dimensions available as templates, by name.
pub type DimensionTemplates = BTreeMap<String, DimensionMetadata>;

/// Resolve a dimension entry.
///
/// A bare name becomes a flat dimension. A described dimension without a
/// template is returned as it is.
///
/// # Errors
///
/// `TemplateRequired` if the dimension names a template that is not in
/// `templates`.
pub fn resolve_dimension(
    entry: &DimensionEntry,
    templates: &DimensionTemplates,
) -> ModelResult<DimensionMetadata> {
    let dim = match entry {
        DimensionEntry::Name(name) => return Ok(DimensionMetadata::flat(name.clone())),
        DimensionEntry::Described(dim) => dim,
    };
    let Some(template_name) = dim.template.as_deref() else {
        return Ok(dim.clone());
    };
    let template = templates
        .get(template_name)
        .ok_or_else(|| ModelError::TemplateRequired {
            dimension: dim.name.clone(),
            template: template_name.to_string(),
        })?;

    tracing::trace!(dimension = %dim.name, template = template_name, "applying dimension template");
    Ok(apply_template(template, dim))
}

fn apply_template(template: &DimensionMetadata, dim: &DimensionMetadata) -> DimensionMetadata {
    let mut merged = template.clone();
    merged.name.clone_from(&dim.name);
    merged.template.clone_from(&dim.template);

    if dim.levels.is_some() || dim.attributes.is_some() {
        merged.levels.clone_from(&dim.levels);
        merged.attributes.clone_from(&dim.attributes);
    }
    for (target, own) in [
        (&mut merged.label, &dim.label),
        (&mut merged.description, &dim.description),
        (&mut merged.default_hierarchy_name, &dim.default_hierarchy_name),
    ] {
        if own.is_some() {
            target.clone_from(own);
        }
    }
    if dim.hierarchies.is_some() {
        merged.hierarchies.clone_from(&dim.hierarchies);
    }
    if dim.info.is_some() {
        merged.info.clone_from(&dim.info);
    }
    merged
        .extra
        .extend(dim.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn described(value: serde_json::Value) -> DimensionEntry {
        serde_json::from_value(value).unwrap()
    }

    fn templates() -> DimensionTemplates {
        let date: DimensionMetadata = serde_json::from_value(json!({
            "name": "date",
            "label": "Date",
            "levels": ["year", "month", "day"],
            "hierarchies": [{"name": "ymd", "levels": ["year", "month", "day"]}],
            "default_hierarchy_name": "ymd",
            "role": "time"
        }))
        .unwrap();
        BTreeMap::from([(date.name.clone(), date)])
    }

    #[test]
    fn bare_name_resolves_flat() {
        let dim = resolve_dimension(&DimensionEntry::Name("flag".into()), &templates()).unwrap();
        assert_eq!(dim, DimensionMetadata::flat("flag"));
    }

    #[test]
    fn dimension_without_template_is_unchanged() {
        let entry = described(json!({"name": "product", "attributes": ["code"]}));
        let dim = resolve_dimension(&entry, &DimensionTemplates::new()).unwrap();
        assert_eq!(dim, entry.to_metadata());
    }

    #[test]
    fn template_fills_missing_fields() {
        let entry = described(json!({"name": "ship_date", "template": "date", "label": "Ship Date"}));
        let dim = resolve_dimension(&entry, &templates()).unwrap();
        assert_eq!(dim.name, "ship_date");
        assert_eq!(dim.label.as_deref(), Some("Ship Date"));
        assert_eq!(dim.levels.as_ref().map(Vec::len), Some(3));
        assert_eq!(dim.default_hierarchy_name.as_deref(), Some("ymd"));
        assert_eq!(dim.extra["role"], "time");
        assert_eq!(dim.template.as_deref(), Some("date"));
    }

    #[test]
    fn own_attributes_replace_template_levels() {
        let entry = described(json!({"name": "week", "template": "date", "attributes": ["week"]}));
        let dim = resolve_dimension(&entry, &templates()).unwrap();
        assert!(dim.levels.is_none());
        assert_eq!(dim.attributes, Some(vec![json!("week")]));
    }

    #[test]
    fn missing_template_is_required() {
        let entry = described(json!({"name": "ship_date", "template": "calendar"}));
        let err = resolve_dimension(&entry, &templates()).unwrap_err();
        match err {
            ModelError::TemplateRequired { dimension, template } => {
                assert_eq!(dimension, "ship_date");
                assert_eq!(template, "calendar");
            }
            other => panic!("expected TemplateRequired, got {other}"),
        }
    }
}
