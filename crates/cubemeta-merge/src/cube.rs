//! Cube resolution.
//!
//! Combines a stored cube fragment with the model-wide settings it
//! inherits: datastore, browser options, mappings and joins. The stored
//! model is only borrowed; every call builds a new [`CubeMetadata`].

use std::collections::BTreeMap;

use cubemeta_core::{CubeMetadata, JoinSpec, JsonMap, ModelError, ModelMetadata, ModelResult};

use crate::defaults::update_map;

/// Resolve the cube `name` of `model`.
///
/// # Errors
///
/// - `NoSuchCube` if the model has no cube with that name.
/// - Any error of [`resolve_cube_fragment`].
pub fn resolve_cube(model: &ModelMetadata, name: &str) -> ModelResult<CubeMetadata> {
    let cube = model
        .cube(name)
        .ok_or_else(|| ModelError::NoSuchCube(name.to_string()))?;
    resolve_cube_fragment(model, cube)
}

/// Resolve a cube fragment against the model-wide settings of `model`.
///
/// # Errors
///
/// - `MissingJoinName` / `DuplicateJoinName` for a malformed model join list
///   (only checked when both the model and the cube declare joins).
/// - `InvalidJoin` if a resolved join lacks `master` or `detail`.
pub fn resolve_cube_fragment(model: &ModelMetadata, cube: &CubeMetadata) -> ModelResult<CubeMetadata> {
    tracing::trace!(cube = %cube.name, "resolving cube");

    let mut resolved = cube.clone();
    resolved.datastore = non_empty(&cube.datastore).or_else(|| non_empty(&model.datastore));
    resolved.browser_options =
        update_map(model.browser_options.as_ref(), cube.browser_options.as_ref());
    resolved.mappings = merge_mappings(model.mappings.as_ref(), cube.mappings.as_ref());
    resolved.joins = merge_joins(&model.joins, &cube.joins)?;
    check_joins(&cube.name, &resolved.joins)?;

    Ok(resolved)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Model mappings overwritten key-wise by cube mappings.
///
/// Without model mappings the cube mappings are used as they are.
pub fn merge_mappings(model: Option<&JsonMap>, cube: Option<&JsonMap>) -> Option<JsonMap> {
    match model {
        Some(_) => update_map(model, cube),
        None => cube.cloned(),
    }
}

/// Merge cube joins with the named model joins.
///
/// A named cube join that matches a model join starts from a copy of the
/// model join and is overwritten field by field ([`merge_join`]). Unmatched
/// and unnamed cube joins pass through. The result follows the cube's join
/// order. When either list is empty the cube joins are returned unchanged
/// and the model list is not inspected.
///
/// # Errors
///
/// `MissingJoinName` if a model join has no name, `DuplicateJoinName` if
/// two model joins share one.
pub fn merge_joins(model_joins: &[JoinSpec], cube_joins: &[JoinSpec]) -> ModelResult<Vec<JoinSpec>> {
    if model_joins.is_empty() || cube_joins.is_empty() {
        return Ok(cube_joins.to_vec());
    }

    let mut index: BTreeMap<&str, &JoinSpec> = BTreeMap::new();
    for (position, join) in model_joins.iter().enumerate() {
        let name = join
            .name
            .as_deref()
            .ok_or(ModelError::MissingJoinName { position })?;
        if index.insert(name, join).is_some() {
            return Err(ModelError::DuplicateJoinName {
                name: name.to_string(),
            });
        }
    }

    Ok(cube_joins
        .iter()
        .map(|join| {
            match join.name.as_deref().and_then(|name| index.get(name)) {
                Some(base) => merge_join(base, join),
                None => join.clone(),
            }
        })
        .collect())
}

/// Overwrite `base` with every field `over` sets.
pub fn merge_join(base: &JoinSpec, over: &JoinSpec) -> JoinSpec {
    let mut merged = base.clone();
    if over.name.is_some() {
        merged.name.clone_from(&over.name);
    }
    if over.master.is_some() {
        merged.master.clone_from(&over.master);
    }
    if over.detail.is_some() {
        merged.detail.clone_from(&over.detail);
    }
    merged
        .extra
        .extend(over.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

fn check_joins(cube: &str, joins: &[JoinSpec]) -> ModelResult<()> {
    for (position, join) in joins.iter().enumerate() {
        let missing = if join.master.is_none() {
            "master"
        } else if join.detail.is_none() {
            "detail"
        } else {
            continue;
        };
        return Err(ModelError::InvalidJoin {
            cube: cube.to_string(),
            join: join
                .name
                .clone()
                .unwrap_or_else(|| format!("#{position}")),
            missing,
        });
    }
    Ok(())
}

/// Options of a cube: model `options`, then model `browser_options`, then
/// cube `options`, then cube `browser_options`, each updating the last.
pub fn cube_options(model: &ModelMetadata, cube: &CubeMetadata) -> JsonMap {
    let mut options = JsonMap::new();
    for layer in [
        &model.options,
        &model.browser_options,
        &cube.options,
        &cube.browser_options,
    ]
    .into_iter()
    .flatten()
    {
        options.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    options
}
