//! Collaborator traits the workflows are written against, plus the plain
//! value types that cross them.
//!
//! Every trait is object safe (via [`async_trait`]) so a [`crate::CoursePilot`]
//! can hold `Arc<dyn ...>` handles and be wired to the Postgres/REST adapters
//! in production or to [`crate::memory::InMemoryMoodle`] in tests.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Value types
-------------------------------------------------------------------------- */

/// A course category, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub id: DbId,
    pub name: String,
}

/// The subset of a course record the workflows read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRef {
    pub id: DbId,
    /// `None` for courses outside any category (the site course has 0).
    pub category_id: Option<DbId>,
    pub fullname: String,
    pub shortname: String,
    pub summary: Option<String>,
    pub idnumber: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: DbId,
    pub username: String,
}

/// A manual enrolment method attached to a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolInstance {
    pub id: DbId,
    pub course_id: DbId,
}

/// Where a capability is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    System,
    Course(DbId),
}

/// Everything the course-copy service needs to clone a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub source_course_id: DbId,
    pub target_category_id: DbId,
    pub fullname: String,
    pub shortname: String,
    /// Moodle's copy form has no summary field, so the REST copier does not
    /// apply it; the copy keeps the source course's summary.
    pub summary: Option<String>,
    pub idnumber: Option<String>,
    /// Role ids whose enrolments are carried into the copy.
    pub kept_roles: Vec<DbId>,
    pub copy_user_data: bool,
}

/// Handles for an asynchronous copy, as issued by the copy service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyIds {
    #[serde(rename = "backupid")]
    pub backup_id: String,
    #[serde(rename = "restoreid")]
    pub restore_id: String,
}

/* --------------------------------------------------------------------------
Ports
-------------------------------------------------------------------------- */

/// Plugin settings storage (Moodle's `config_plugins`).
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Raw stored value of `plugin/key`, `None` when unset.
    async fn get_config(&self, plugin: &str, key: &str) -> Result<Option<String>, CoreError>;
}

/// Point lookups for categories, courses and users.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_category(&self, id: DbId) -> Result<Option<CategoryRef>, CoreError>;

    async fn find_course(&self, id: DbId) -> Result<Option<CourseRef>, CoreError>;

    /// Deleted accounts are reported as absent.
    async fn find_user(&self, id: DbId) -> Result<Option<UserRef>, CoreError>;

    /// Id of the course's context record.
    async fn course_context_id(&self, course_id: DbId) -> Result<Option<DbId>, CoreError>;
}

#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    async fn has_capability(
        &self,
        capability: &str,
        scope: Scope,
        user_id: DbId,
    ) -> Result<bool, CoreError>;
}

/// The backup/restore based course copy service.
#[async_trait]
pub trait CourseCopier: Send + Sync {
    /// Queue a copy. `Ok(None)` means the service refused or failed to
    /// queue it; `Err` is reserved for integration faults.
    async fn create_copy(&self, request: &CopyRequest) -> Result<Option<CopyIds>, CoreError>;
}

/// Lookup of restore controller records created by a copy.
#[async_trait]
pub trait RestoreRecords: Send + Sync {
    /// Course id the restore writes into, if the record exists yet.
    async fn restored_course_id(&self, restore_id: &str) -> Result<Option<DbId>, CoreError>;
}

/// Manual enrolment plumbing.
#[async_trait]
pub trait EnrolmentService: Send + Sync {
    async fn manual_instance(&self, course_id: DbId) -> Result<Option<EnrolInstance>, CoreError>;

    async fn enrol(
        &self,
        instance: &EnrolInstance,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<(), CoreError>;

    async fn unenrol(&self, instance: &EnrolInstance, user_id: DbId) -> Result<(), CoreError>;

    async fn has_role_assignment(
        &self,
        user_id: DbId,
        role_id: DbId,
        context_id: DbId,
    ) -> Result<bool, CoreError>;
}
