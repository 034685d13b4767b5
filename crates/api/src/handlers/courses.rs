//! Handlers for the `/courses` resource.

use axum::extract::State;
use axum::Json;
use coursepilot_core::outcome::Status;
use coursepilot_core::ports::CopyIds;
use coursepilot_core::provisioning::{CreateCourseParams, PROCESS_CREATE_COURSE};
use coursepilot_core::types::DbId;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::lang::Lang;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a course copy request.
#[derive(Debug, Serialize)]
pub struct CreateCourseResponse {
    pub process: &'static str,
    pub status: Status,
    pub message: String,
    pub courseid: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyids: Option<CopyIds>,
}

/// POST /api/v1/courses
///
/// Queue a copy of a template course into a formation category. Workflow
/// failures are reported with `status: "error"` and HTTP 200; malformed
/// input is rejected with 400 before the workflow runs.
pub async fn create_course(
    user: AuthUser,
    Lang(lang): Lang,
    State(state): State<AppState>,
    Json(params): Json<CreateCourseParams>,
) -> AppResult<Json<DataResponse<CreateCourseResponse>>> {
    params.validate()?;

    let outcome = state.pilot.create_course(user.user_id, &params).await?;

    tracing::info!(
        user_id = user.user_id,
        template_course_id = params.template_course_id,
        status = outcome.status.as_str(),
        "Course copy requested",
    );

    Ok(Json(DataResponse {
        data: CreateCourseResponse {
            process: PROCESS_CREATE_COURSE,
            status: outcome.status,
            message: outcome.message.render(lang),
            courseid: outcome.course_id,
            copyids: outcome.copy_ids,
        },
    }))
}
