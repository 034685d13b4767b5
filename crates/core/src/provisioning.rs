//! Course provisioning: clone a template course into a formation category.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. plugin enabled
//! 2. caller may back up courses site-wide
//! 3. template course exists, has a category, template set is not empty
//! 4. template course sits in a template category
//! 5. target category is a formation category
//!
//! Only then is the copy service called, exactly once. The copy completes
//! out of band; the new course id is reported when the restore record
//! already knows it and is `0` otherwise.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::capabilities::CAP_BACKUP_COURSE;
use crate::error::CoreError;
use crate::messages::Message;
use crate::outcome::Status;
use crate::pilot::CoursePilot;
use crate::ports::{CopyIds, CopyRequest, Scope};
use crate::types::DbId;

/// Name reported in the `process` field of every outcome.
pub const PROCESS_CREATE_COURSE: &str = "create_course";

/// Input of a course copy, as received from the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseParams {
    /// Course to clone.
    #[serde(rename = "templatecourseid")]
    pub template_course_id: DbId,
    /// Formation category the copy is created in.
    #[serde(rename = "categoryid")]
    pub target_category_id: DbId,
    #[validate(length(min = 1, max = 254))]
    pub fullname: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_alphanumeric"))]
    pub shortname: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100), custom(function = "validate_alphanumeric"))]
    pub idnumber: Option<String>,
}

/// Result of [`CoursePilot::create_course`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCopyOutcome {
    pub status: Status,
    pub message: Message,
    /// Id of the new course; `0` on error or while the restore is pending.
    pub course_id: DbId,
    /// Only set once the copy has been queued.
    pub copy_ids: Option<CopyIds>,
}

impl CourseCopyOutcome {
    fn error(message: Message) -> Self {
        Self {
            status: Status::Error,
            message,
            course_id: 0,
            copy_ids: None,
        }
    }
}

/// Moodle `PARAM_ALPHANUM`: ASCII letters and digits only.
fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

impl CoursePilot {
    /// Queue a copy of a template course into a formation category on
    /// behalf of `actor_id`.
    pub async fn create_course(
        &self,
        actor_id: DbId,
        params: &CreateCourseParams,
    ) -> Result<CourseCopyOutcome, CoreError> {
        let config = self.load_config().await?;
        if !config.enabled {
            return Ok(CourseCopyOutcome::error(Message::PluginDisabled));
        }

        if !self
            .capabilities
            .has_capability(CAP_BACKUP_COURSE, Scope::System, actor_id)
            .await?
        {
            tracing::warn!(actor_id, capability = CAP_BACKUP_COURSE, "Course copy denied");
            return Ok(CourseCopyOutcome::error(Message::NoPermission));
        }

        let invalid_template = || {
            CourseCopyOutcome::error(Message::InvalidTemplateCourse {
                course_id: params.template_course_id,
            })
        };

        let templates = self.resolve(&config.template_category_ids).await?;
        let source = self.catalog.find_course(params.template_course_id).await?;
        let Some(source_category) = source.as_ref().and_then(|c| c.category_id) else {
            return Ok(invalid_template());
        };
        if templates.is_empty() || !templates.contains_key(&source_category) {
            return Ok(invalid_template());
        }

        let formations = self.resolve(&config.formation_category_ids).await?;
        if !formations.contains_key(&params.target_category_id) {
            return Ok(CourseCopyOutcome::error(Message::InvalidFormation {
                category_id: params.target_category_id,
            }));
        }

        let request = CopyRequest {
            source_course_id: params.template_course_id,
            target_category_id: params.target_category_id,
            fullname: params.fullname.clone(),
            shortname: params.shortname.clone(),
            summary: params.summary.clone(),
            idnumber: params.idnumber.clone(),
            kept_roles: Vec::new(),
            copy_user_data: false,
        };

        let Some(copy_ids) = self.copier.create_copy(&request).await? else {
            tracing::warn!(
                template_course_id = params.template_course_id,
                category_id = params.target_category_id,
                "Course copy was not queued"
            );
            return Ok(CourseCopyOutcome::error(Message::CourseNotCopied));
        };

        let course_id = self
            .restores
            .restored_course_id(&copy_ids.restore_id)
            .await?
            .unwrap_or(0);

        tracing::info!(
            actor_id,
            template_course_id = params.template_course_id,
            category_id = params.target_category_id,
            course_id,
            backup_id = %copy_ids.backup_id,
            restore_id = %copy_ids.restore_id,
            "Course copy queued"
        );

        Ok(CourseCopyOutcome {
            status: Status::Queued,
            message: Message::CopyQueued,
            course_id,
            copy_ids: Some(copy_ids),
        })
    }
}
