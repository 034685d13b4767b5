//! Route definitions for the `/enrolments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::enrolments;
use crate::state::AppState;

/// Routes mounted at `/enrolments`.
///
/// ```text
/// POST   /    -> edit_enrollment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(enrolments::edit_enrollment))
}
