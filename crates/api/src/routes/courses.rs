//! Route definitions for the `/courses` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// POST   /    -> create_course
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(courses::create_course))
}
