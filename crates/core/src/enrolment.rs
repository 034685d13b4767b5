//! Enrolment toggling for courses in formation categories.
//!
//! A `(course, user, role)` tuple is either enrolled or not. `enroll` moves
//! it to enrolled and `unenroll` back; asking for the state the tuple is
//! already in is reported as an error and leaves the store untouched.
//!
//! The check-then-act in [`CoursePilot::edit_enrollment`] is not guarded
//! against two concurrent requests for the same tuple; the enrolment
//! service's own behaviour decides what the second write does.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::messages::Message;
use crate::outcome::Status;
use crate::pilot::CoursePilot;
use crate::roles::is_allowed_role;
use crate::types::DbId;

/// What the caller wants done with the enrolment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrolmentAction {
    Enroll,
    Unenroll,
}

impl EnrolmentAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrolmentAction::Enroll => "enroll",
            EnrolmentAction::Unenroll => "unenroll",
        }
    }
}

impl FromStr for EnrolmentAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enroll" => Ok(EnrolmentAction::Enroll),
            "unenroll" => Ok(EnrolmentAction::Unenroll),
            other => Err(format!("Unknown enrolment action: '{other}'")),
        }
    }
}

impl fmt::Display for EnrolmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`CoursePilot::edit_enrollment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentOutcome {
    /// The action as the caller sent it, even when it was not understood.
    pub action: String,
    pub status: Status,
    pub message: Message,
}

impl CoursePilot {
    /// Enrol `user_id` into, or unenrol them from, `course_id`.
    ///
    /// `role_id` is only validated on the enrol path; on the unenrol path it
    /// selects which role assignment must currently exist.
    pub async fn edit_enrollment(
        &self,
        course_id: DbId,
        user_id: DbId,
        action: &str,
        role_id: DbId,
    ) -> Result<EnrollmentOutcome, CoreError> {
        let reply = |status: Status, message: Message| EnrollmentOutcome {
            action: action.to_string(),
            status,
            message,
        };

        let config = self.load_config().await?;
        if !config.enabled {
            return Ok(reply(Status::Error, Message::PluginDisabled));
        }

        let parsed = action.parse::<EnrolmentAction>();
        let (true, true, Ok(parsed)) = (course_id > 0, user_id > 0, parsed) else {
            return Ok(reply(Status::Error, Message::InvalidParameters { course_id }));
        };

        if parsed == EnrolmentAction::Enroll && !is_allowed_role(role_id) {
            return Ok(reply(Status::Error, Message::InvalidRoleId));
        }

        let Some(course) = self.catalog.find_course(course_id).await? else {
            return Ok(reply(Status::Error, Message::CourseNotFound { course_id }));
        };

        let formations = self.resolve(&config.formation_category_ids).await?;
        let category_id = course.category_id.unwrap_or(0);
        if !formations.contains_key(&category_id) {
            return Ok(reply(Status::Error, Message::InvalidFormation { category_id }));
        }

        let Some(user) = self.catalog.find_user(user_id).await? else {
            return Ok(reply(Status::Error, Message::InvalidUser { user_id }));
        };

        let Some(instance) = self.enrolments.manual_instance(course_id).await? else {
            tracing::warn!(course_id, "Course has no manual enrolment instance");
            return Ok(reply(Status::Error, Message::NoEnrolmentMethod { course_id }));
        };

        let context_id = self
            .catalog
            .course_context_id(course_id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Course {course_id} has no context")))?;
        let enrolled = self
            .enrolments
            .has_role_assignment(user_id, role_id, context_id)
            .await?;

        match (parsed, enrolled) {
            (EnrolmentAction::Enroll, true) => {
                return Ok(reply(Status::Error, Message::AlreadyEnrolled { course_id }));
            }
            (EnrolmentAction::Unenroll, false) => {
                return Ok(reply(
                    Status::Error,
                    Message::AlreadyUnenrolled { course_id },
                ));
            }
            (EnrolmentAction::Enroll, false) => {
                self.enrolments.enrol(&instance, user_id, role_id).await?;
            }
            (EnrolmentAction::Unenroll, true) => {
                self.enrolments.unenrol(&instance, user_id).await?;
            }
        }

        tracing::info!(course_id, user_id, role_id, action = %parsed, "Enrolment updated");

        Ok(reply(
            Status::Success,
            Message::EnrolmentUpdated {
                username: user.username,
                action: parsed,
                course_id,
            },
        ))
    }
}
