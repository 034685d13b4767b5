pub mod categories;
pub mod courses;
pub mod enrolments;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories/templates          template categories (GET)
/// /categories/formations         formation categories (GET)
/// /courses                       copy a template course (POST)
/// /enrolments                    enrol or unenrol a user (POST)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/courses", courses::router())
        .nest("/enrolments", enrolments::router())
}
