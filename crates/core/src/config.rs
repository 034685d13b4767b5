//! Plugin settings as stored by Moodle administrators.
//!
//! The settings live in `config_plugins` under the `enrol_coursepilot`
//! component and are read once per operation; the core never writes them.

use crate::error::CoreError;
use crate::ports::ConfigStore;
use crate::types::DbId;

/// Moodle component name the settings are stored under.
pub const PLUGIN_NAME: &str = "enrol_coursepilot";

/// Feature flag key.
pub const KEY_ENABLE: &str = "enable";

/// Comma-separated ids of the template categories.
pub const KEY_TEMPLATE_CATEGORIES: &str = "templatecategories";

/// Comma-separated ids of the formation categories.
pub const KEY_FORMATION_CATEGORIES: &str = "formationcategories";

/// Snapshot of the plugin settings for a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    pub enabled: bool,
    pub template_category_ids: Vec<DbId>,
    pub formation_category_ids: Vec<DbId>,
}

impl PluginConfig {
    /// Read every setting from `store`.
    pub async fn load(store: &dyn ConfigStore) -> Result<Self, CoreError> {
        let enabled = store
            .get_config(PLUGIN_NAME, KEY_ENABLE)
            .await?
            .is_some_and(|v| parse_flag(&v));
        let templates = store.get_config(PLUGIN_NAME, KEY_TEMPLATE_CATEGORIES).await?;
        let formations = store.get_config(PLUGIN_NAME, KEY_FORMATION_CATEGORIES).await?;

        Ok(Self {
            enabled,
            template_category_ids: parse_category_ids(templates.as_deref().unwrap_or_default()),
            formation_category_ids: parse_category_ids(formations.as_deref().unwrap_or_default()),
        })
    }
}

/// Interpret a stored checkbox value.
///
/// Moodle stores `"1"`/`"0"`; the textual forms are accepted for settings
/// written by hand.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Split a comma-separated id list.
///
/// Tokens are trimmed; empty or non-numeric tokens are dropped, as are
/// repeats. The first occurrence keeps its position.
pub fn parse_category_ids(value: &str) -> Vec<DbId> {
    let mut ids: Vec<DbId> = Vec::new();
    for id in value.split(',').filter_map(|token| token.trim().parse::<DbId>().ok()) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
