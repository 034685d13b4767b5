//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /templates    -> list_templates
/// GET    /formations   -> list_formations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/templates", get(categories::list_templates))
        .route("/formations", get(categories::list_formations))
}
