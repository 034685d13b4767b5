//! Category resolution for the template and formation settings.

use indexmap::IndexMap;

use crate::config::parse_category_ids;
use crate::error::CoreError;
use crate::ports::{CatalogStore, CategoryRef};
use crate::types::DbId;

/// Resolved categories keyed by id, in configuration order.
pub type CategorySet = IndexMap<DbId, CategoryRef>;

/// Resolve a raw comma-separated setting value.
///
/// An empty value resolves to an empty set.
pub async fn resolve_categories(
    catalog: &dyn CatalogStore,
    config_value: &str,
) -> Result<CategorySet, CoreError> {
    resolve_category_ids(catalog, &parse_category_ids(config_value)).await
}

/// Look up each id; ids without a category record are left out.
pub async fn resolve_category_ids(
    catalog: &dyn CatalogStore,
    ids: &[DbId],
) -> Result<CategorySet, CoreError> {
    let mut resolved = CategorySet::with_capacity(ids.len());
    for &id in ids {
        if let Some(category) = catalog.find_category(id).await? {
            resolved.entry(category.id).or_insert(category);
        }
    }
    Ok(resolved)
}
