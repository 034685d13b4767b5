//! [`MoodleStore`]: the read-side ports backed by the Moodle database.

use async_trait::async_trait;
use coursepilot_core::error::CoreError;
use coursepilot_core::ports::{
    CapabilityChecker, CatalogStore, CategoryRef, ConfigStore, CourseRef, RestoreRecords, Scope,
    UserRef,
};
use coursepilot_core::types::DbId;

use crate::repositories::capability_repo::is_granted;
use crate::repositories::{
    BackupControllerRepo, CapabilityRepo, CategoryRepo, ConfigRepo, ContextRepo, CourseRepo,
    RoleAssignmentRepo, UserRepo,
};
use crate::MoodleDb;

/// Core setting listing site administrator ids, comma separated.
const CFG_SITEADMINS: &str = "siteadmins";

/// Core setting naming the role every authenticated user implicitly holds.
const CFG_DEFAULT_USER_ROLE: &str = "defaultuserroleid";

/// Implements [`ConfigStore`], [`CatalogStore`], [`CapabilityChecker`] and
/// [`RestoreRecords`] over a [`MoodleDb`].
#[derive(Debug, Clone)]
pub struct MoodleStore {
    db: MoodleDb,
}

impl MoodleStore {
    pub fn new(db: MoodleDb) -> Self {
        Self { db }
    }

    async fn is_site_admin(&self, user_id: DbId) -> Result<bool, sqlx::Error> {
        let admins = ConfigRepo::core_value(&self.db, CFG_SITEADMINS).await?;
        Ok(admins
            .as_deref()
            .map(|list| parse_id_list(list).contains(&user_id))
            .unwrap_or(false))
    }

    async fn default_user_role(&self) -> Result<Option<DbId>, sqlx::Error> {
        let value = ConfigRepo::core_value(&self.db, CFG_DEFAULT_USER_ROLE).await?;
        Ok(value.and_then(|v| v.trim().parse().ok()))
    }

    async fn check_capability(
        &self,
        capability: &str,
        scope: Scope,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        if self.is_site_admin(user_id).await? {
            return Ok(true);
        }

        let Some(system_ctx) = ContextRepo::system_id(&self.db).await? else {
            tracing::warn!("System context missing from the context table");
            return Ok(false);
        };
        let mut contexts = vec![system_ctx];
        if let Scope::Course(course_id) = scope {
            if let Some(course_ctx) = ContextRepo::course_id(&self.db, course_id).await? {
                contexts.push(course_ctx);
            }
        }

        let mut roles = RoleAssignmentRepo::roles_in_contexts(&self.db, user_id, &contexts).await?;
        if let Some(default_role) = self.default_user_role().await? {
            if !roles.contains(&default_role) {
                roles.push(default_role);
            }
        }

        let permissions =
            CapabilityRepo::permissions(&self.db, capability, &roles, &contexts).await?;
        Ok(is_granted(&permissions))
    }
}

/// Parse a comma separated id list, skipping anything that is not an id.
fn parse_id_list(list: &str) -> Vec<DbId> {
    list.split(',')
        .filter_map(|token| token.trim().parse().ok())
        .collect()
}

#[async_trait]
impl ConfigStore for MoodleStore {
    async fn get_config(&self, plugin: &str, key: &str) -> Result<Option<String>, CoreError> {
        ConfigRepo::plugin_value(&self.db, plugin, key)
            .await
            .map_err(CoreError::backend)
    }
}

#[async_trait]
impl CatalogStore for MoodleStore {
    async fn find_category(&self, id: DbId) -> Result<Option<CategoryRef>, CoreError> {
        let row = CategoryRepo::find_by_id(&self.db, id)
            .await
            .map_err(CoreError::backend)?;
        Ok(row.map(Into::into))
    }

    async fn find_course(&self, id: DbId) -> Result<Option<CourseRef>, CoreError> {
        let row = CourseRepo::find_by_id(&self.db, id)
            .await
            .map_err(CoreError::backend)?;
        Ok(row.map(Into::into))
    }

    async fn find_user(&self, id: DbId) -> Result<Option<UserRef>, CoreError> {
        let row = UserRepo::find_active_by_id(&self.db, id)
            .await
            .map_err(CoreError::backend)?;
        Ok(row.map(Into::into))
    }

    async fn course_context_id(&self, course_id: DbId) -> Result<Option<DbId>, CoreError> {
        ContextRepo::course_id(&self.db, course_id)
            .await
            .map_err(CoreError::backend)
    }
}

#[async_trait]
impl CapabilityChecker for MoodleStore {
    async fn has_capability(
        &self,
        capability: &str,
        scope: Scope,
        user_id: DbId,
    ) -> Result<bool, CoreError> {
        self.check_capability(capability, scope, user_id)
            .await
            .map_err(CoreError::backend)
    }
}

#[async_trait]
impl RestoreRecords for MoodleStore {
    async fn restored_course_id(&self, restore_id: &str) -> Result<Option<DbId>, CoreError> {
        BackupControllerRepo::restore_target(&self.db, restore_id)
            .await
            .map_err(CoreError::backend)
    }
}
