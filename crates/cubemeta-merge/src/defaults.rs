//! Provider-default merge.
//!
//! Lets a provider inject baseline content ahead of user content without
//! discarding any user override.

use cubemeta_core::{JsonMap, ModelMetadata};

/// Merge a provider's `defaults` with `user` metadata.
///
/// Cube, dimension and join lists are concatenated defaults-first, without
/// duplicate checking. Mappings are merged key-wise with user keys winning.
/// Every other key present in `user` replaces the default; keys the user
/// leaves out keep their default value.
pub fn merge_provider_defaults(defaults: &ModelMetadata, user: &ModelMetadata) -> ModelMetadata {
    let mut merged = defaults.clone();

    merged.cubes.extend(user.cubes.iter().cloned());
    merged.dimensions.extend(user.dimensions.iter().cloned());
    merged.joins.extend(user.joins.iter().cloned());
    merged.mappings = update_map(defaults.mappings.as_ref(), user.mappings.as_ref());

    override_with(&mut merged.name, &user.name);
    override_with(&mut merged.label, &user.label);
    override_with(&mut merged.description, &user.description);
    override_with(&mut merged.locale, &user.locale);
    override_with(&mut merged.info, &user.info);
    override_with(&mut merged.options, &user.options);
    override_with(&mut merged.browser_options, &user.browser_options);
    override_with(&mut merged.datastore, &user.datastore);
    override_with(&mut merged.public_dimensions, &user.public_dimensions);
    merged
        .extra
        .extend(user.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    merged
}

fn override_with<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

/// Copy of `base` key-wise updated by `over`. `None` when the result is empty.
pub(crate) fn update_map(base: Option<&JsonMap>, over: Option<&JsonMap>) -> Option<JsonMap> {
    let mut map = base.cloned().unwrap_or_default();
    if let Some(over) = over {
        map.extend(over.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    (!map.is_empty()).then_some(map)
}
