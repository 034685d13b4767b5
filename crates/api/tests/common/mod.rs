#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use coursepilot_api::auth::jwt::{generate_access_token, JwtConfig};
use coursepilot_api::config::ServerConfig;
use coursepilot_api::router::build_app_router;
use coursepilot_api::state::AppState;
use coursepilot_core::capabilities::CAP_BACKUP_COURSE;
use coursepilot_core::config::{KEY_ENABLE, KEY_FORMATION_CATEGORIES, KEY_TEMPLATE_CATEGORIES};
use coursepilot_core::memory::InMemoryMoodle;
use coursepilot_core::messages::Language;
use coursepilot_core::types::DbId;
use http_body_util::BodyExt;
use tower::ServiceExt;

/* --------------------------------------------------------------------------
Seeded site
-------------------------------------------------------------------------- */

pub const TEMPLATE_CATEGORY: DbId = 2;
pub const ARCHIVE_CATEGORY: DbId = 3;
pub const FORMATION_CATEGORY: DbId = 4;

pub const TEMPLATE_COURSE: DbId = 20;
pub const FORMATION_COURSE: DbId = 40;
pub const ARCHIVED_COURSE: DbId = 30;

pub const MANAGER: DbId = 100;
pub const STUDENT: DbId = 200;

/// Build a small site: templates in category 2 (and 3), formations in 4.
///
/// The manager may back up courses; the formation course has a manual
/// enrolment instance.
pub async fn seeded_site() -> Arc<InMemoryMoodle> {
    let moodle = Arc::new(InMemoryMoodle::new());
    moodle.set_config(KEY_ENABLE, "1").await;
    moodle
        .set_config(KEY_TEMPLATE_CATEGORIES, &format!("{TEMPLATE_CATEGORY},{ARCHIVE_CATEGORY}"))
        .await;
    moodle
        .set_config(KEY_FORMATION_CATEGORIES, &FORMATION_CATEGORY.to_string())
        .await;

    moodle.add_category(TEMPLATE_CATEGORY, "Templates").await;
    moodle.add_category(ARCHIVE_CATEGORY, "Archive").await;
    moodle.add_category(FORMATION_CATEGORY, "Formations").await;

    moodle.add_course(TEMPLATE_COURSE, Some(TEMPLATE_CATEGORY), "TPL20").await;
    moodle.add_course(ARCHIVED_COURSE, Some(ARCHIVE_CATEGORY), "OLD30").await;
    moodle.add_course(FORMATION_COURSE, Some(FORMATION_CATEGORY), "FRM40").await;
    moodle.add_manual_instance(FORMATION_COURSE).await;

    moodle.add_user(MANAGER, "manager").await;
    moodle.add_user(STUDENT, "jdoe").await;
    moodle.grant_capability(MANAGER, CAP_BACKUP_COURSE).await;
    moodle
}

/* --------------------------------------------------------------------------
App construction
-------------------------------------------------------------------------- */

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        default_lang: Language::En,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over the in-memory site, with the same
/// middleware stack production uses.
pub fn build_test_app(moodle: &Arc<InMemoryMoodle>) -> Router {
    build_test_app_with(moodle, test_config())
}

pub fn build_test_app_with(moodle: &Arc<InMemoryMoodle>, config: ServerConfig) -> Router {
    let state = AppState {
        pilot: moodle.pilot(),
        pool: None,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/* --------------------------------------------------------------------------
Request helpers
-------------------------------------------------------------------------- */

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    post_json_auth_lang(app, uri, body, token, None).await
}

/// Authenticated JSON POST with an optional `Accept-Language` header.
pub async fn post_json_auth_lang(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
    accept_language: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"));
    if let Some(lang) = accept_language {
        builder = builder.header(ACCEPT_LANGUAGE, lang);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
