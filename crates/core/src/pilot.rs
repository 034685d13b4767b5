//! The Course Pilot service object.

use std::sync::Arc;

use crate::categories::{resolve_category_ids, CategorySet};
use crate::config::PluginConfig;
use crate::error::CoreError;
use crate::ports::{
    CapabilityChecker, CatalogStore, CategoryRef, ConfigStore, CourseCopier, EnrolmentService,
    RestoreRecords,
};
use crate::types::DbId;

/// The collaborators a [`CoursePilot`] is built from.
pub struct PilotPorts {
    pub config: Arc<dyn ConfigStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub capabilities: Arc<dyn CapabilityChecker>,
    pub copier: Arc<dyn CourseCopier>,
    pub restores: Arc<dyn RestoreRecords>,
    pub enrolments: Arc<dyn EnrolmentService>,
}

/// Entry point for the four public operations.
///
/// Cheap to clone; every collaborator sits behind an `Arc`. The plugin
/// settings are re-read on every call, so configuration changes made in
/// Moodle take effect without a restart.
#[derive(Clone)]
pub struct CoursePilot {
    pub(crate) config: Arc<dyn ConfigStore>,
    pub(crate) catalog: Arc<dyn CatalogStore>,
    pub(crate) capabilities: Arc<dyn CapabilityChecker>,
    pub(crate) copier: Arc<dyn CourseCopier>,
    pub(crate) restores: Arc<dyn RestoreRecords>,
    pub(crate) enrolments: Arc<dyn EnrolmentService>,
}

impl CoursePilot {
    pub fn new(ports: PilotPorts) -> Self {
        Self {
            config: ports.config,
            catalog: ports.catalog,
            capabilities: ports.capabilities,
            copier: ports.copier,
            restores: ports.restores,
            enrolments: ports.enrolments,
        }
    }

    /// Categories whose courses may be cloned. Empty while disabled.
    pub async fn template_categories(&self) -> Result<Vec<CategoryRef>, CoreError> {
        let config = self.load_config().await?;
        if !config.enabled {
            return Ok(Vec::new());
        }
        let set = self.resolve(&config.template_category_ids).await?;
        Ok(set.into_values().collect())
    }

    /// Categories whose courses accept enrolments. Empty while disabled.
    pub async fn formation_categories(&self) -> Result<Vec<CategoryRef>, CoreError> {
        let config = self.load_config().await?;
        if !config.enabled {
            return Ok(Vec::new());
        }
        let set = self.resolve(&config.formation_category_ids).await?;
        Ok(set.into_values().collect())
    }

    pub(crate) async fn load_config(&self) -> Result<PluginConfig, CoreError> {
        PluginConfig::load(self.config.as_ref()).await
    }

    pub(crate) async fn resolve(&self, ids: &[DbId]) -> Result<CategorySet, CoreError> {
        resolve_category_ids(self.catalog.as_ref(), ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KEY_ENABLE, KEY_FORMATION_CATEGORIES, KEY_TEMPLATE_CATEGORIES};
    use crate::memory::InMemoryMoodle;

    async fn seeded() -> Arc<InMemoryMoodle> {
        let moodle = Arc::new(InMemoryMoodle::new());
        for id in 1..=10 {
            moodle.add_category(id, &format!("Category {id}")).await;
        }
        moodle.set_config(KEY_TEMPLATE_CATEGORIES, "2,4,6").await;
        moodle.set_config(KEY_FORMATION_CATEGORIES, "7, 8").await;
        moodle
    }

    #[tokio::test]
    async fn disabled_plugin_lists_nothing() {
        let moodle = seeded().await;
        moodle.set_config(KEY_ENABLE, "0").await;
        let pilot = moodle.pilot();

        assert!(pilot.template_categories().await.unwrap().is_empty());
        assert!(pilot.formation_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn enabled_plugin_lists_configured_categories() {
        let moodle = seeded().await;
        moodle.set_config(KEY_ENABLE, "1").await;
        let pilot = moodle.pilot();

        let templates = pilot.template_categories().await.unwrap();
        let ids: Vec<_> = templates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
        assert_eq!(templates[0].name, "Category 2");

        let formations = pilot.formation_categories().await.unwrap();
        assert_eq!(formations.len(), 2);
    }

    #[tokio::test]
    async fn template_and_formation_sets_may_overlap() {
        let moodle = seeded().await;
        moodle.set_config(KEY_ENABLE, "1").await;
        moodle.set_config(KEY_FORMATION_CATEGORIES, "2,4").await;
        let pilot = moodle.pilot();

        let templates = pilot.template_categories().await.unwrap();
        let formations = pilot.formation_categories().await.unwrap();
        assert!(formations.iter().all(|f| templates.contains(f)));
    }
}
