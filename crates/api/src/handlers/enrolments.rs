//! Handlers for the `/enrolments` resource.

use axum::extract::State;
use axum::Json;
use coursepilot_core::outcome::Status;
use coursepilot_core::roles::DEFAULT_ROLE;
use coursepilot_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::lang::Lang;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for an enrolment change.
///
/// Missing ids default to `0`, which the workflow reports as invalid
/// parameters rather than the transport rejecting the request.
#[derive(Debug, Deserialize)]
pub struct EditEnrollmentRequest {
    #[serde(default)]
    pub courseid: DbId,
    #[serde(default)]
    pub userid: DbId,
    #[serde(default)]
    pub action: String,
    #[serde(default = "default_role")]
    pub roleid: DbId,
}

fn default_role() -> DbId {
    DEFAULT_ROLE
}

/// Result of an enrolment change.
#[derive(Debug, Serialize)]
pub struct EditEnrollmentResponse {
    pub action: String,
    pub status: Status,
    pub message: String,
}

/// POST /api/v1/enrolments
///
/// Enrol a user into, or unenrol them from, a course in a formation
/// category. Workflow failures are reported with `status: "error"`.
pub async fn edit_enrollment(
    user: AuthUser,
    Lang(lang): Lang,
    State(state): State<AppState>,
    Json(input): Json<EditEnrollmentRequest>,
) -> AppResult<Json<DataResponse<EditEnrollmentResponse>>> {
    let outcome = state
        .pilot
        .edit_enrollment(input.courseid, input.userid, &input.action, input.roleid)
        .await?;

    tracing::info!(
        actor_id = user.user_id,
        course_id = input.courseid,
        user_id = input.userid,
        action = %input.action,
        status = outcome.status.as_str(),
        "Enrolment change requested",
    );

    Ok(Json(DataResponse {
        data: EditEnrollmentResponse {
            action: outcome.action,
            status: outcome.status,
            message: outcome.message.render(lang),
        },
    }))
}
