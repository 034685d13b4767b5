//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use coursepilot_core::ports::CategoryRef;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories/templates
///
/// Categories whose courses may be used as copy templates, in configuration
/// order. Empty while the plugin is disabled.
pub async fn list_templates(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryRef>>>> {
    let categories = state.pilot.template_categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/formations
///
/// Categories whose courses accept enrolments. Empty while the plugin is
/// disabled.
pub async fn list_formations(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryRef>>>> {
    let categories = state.pilot.formation_categories().await?;
    Ok(Json(DataResponse { data: categories }))
}
