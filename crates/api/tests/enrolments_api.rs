//! HTTP-level tests for `POST /api/v1/enrolments`.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{
    body_json, post_json, post_json_auth, post_json_auth_lang, token_for, FORMATION_COURSE,
    MANAGER, STUDENT, TEMPLATE_COURSE,
};
use coursepilot_core::config::KEY_ENABLE;
use coursepilot_core::enrolment::EnrolmentAction;
use coursepilot_core::roles::{ROLE_STUDENT, ROLE_TEACHER};
use serde_json::json;

const URI: &str = "/api/v1/enrolments";

async fn send(
    app: axum::Router,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(app, URI, body, &token_for(MANAGER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[tokio::test]
async fn enrol_then_unenrol() {
    let moodle = common::seeded_site().await;

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "enroll" }),
    )
    .await;
    assert_eq!(data["action"], "enroll");
    assert_eq!(data["status"], "success");
    assert_eq!(
        data["message"],
        format!("The user jdoe has been successfully enrolled in the course {FORMATION_COURSE}.")
    );
    assert!(moodle.is_enrolled(FORMATION_COURSE, STUDENT, ROLE_STUDENT).await);

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "unenroll" }),
    )
    .await;
    assert_eq!(data["status"], "success");
    assert!(!moodle.is_enrolled(FORMATION_COURSE, STUDENT, ROLE_STUDENT).await);

    let log = moodle.enrolment_log().await;
    assert_eq!(log.len(), 2);
    assert_matches!(log[0].action, EnrolmentAction::Enroll);
    assert_eq!(log[0].role_id, Some(ROLE_STUDENT));
    assert_matches!(log[1].action, EnrolmentAction::Unenroll);
}

#[tokio::test]
async fn enrolling_twice_is_an_error_without_a_write() {
    let moodle = common::seeded_site().await;
    let body = json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "enroll", "roleid": ROLE_TEACHER });

    send(common::build_test_app(&moodle), body.clone()).await;
    let data = send(common::build_test_app(&moodle), body).await;

    assert_eq!(data["status"], "error");
    assert_eq!(
        data["message"],
        format!("The user is already enrolled in the course {FORMATION_COURSE}.")
    );
    assert_eq!(moodle.enrolment_log().await.len(), 1);
}

#[tokio::test]
async fn unenrolling_a_stranger_is_an_error() {
    let moodle = common::seeded_site().await;

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "unenroll" }),
    )
    .await;
    assert_eq!(data["status"], "error");
    assert_eq!(
        data["message"],
        format!("The user is not currently enrolled in the course {FORMATION_COURSE}.")
    );
    assert!(moodle.enrolment_log().await.is_empty());
}

#[tokio::test]
async fn unknown_action_is_invalid_parameters() {
    let moodle = common::seeded_site().await;

    for action in ["ENROLL", "delete", ""] {
        let data = send(
            common::build_test_app(&moodle),
            json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": action }),
        )
        .await;
        assert_eq!(data["status"], "error");
        assert_eq!(data["action"], action);
        assert_eq!(
            data["message"],
            "Invalid parameters, please check the values and try again."
        );
    }
    assert!(moodle.enrolment_log().await.is_empty());
}

#[tokio::test]
async fn missing_ids_are_invalid_parameters() {
    let moodle = common::seeded_site().await;

    let data = send(common::build_test_app(&moodle), json!({ "action": "enroll" })).await;
    assert_eq!(data["status"], "error");
    assert_eq!(
        data["message"],
        "Invalid parameters, please check the values and try again."
    );
}

#[tokio::test]
async fn role_outside_allow_list_is_rejected_on_enrol() {
    let moodle = common::seeded_site().await;

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "enroll", "roleid": 1 }),
    )
    .await;
    assert_eq!(data["status"], "error");
    assert_eq!(
        data["message"],
        "Invalid roleid parameter, please check the value and try again."
    );
    assert!(moodle.enrolment_log().await.is_empty());
}

#[tokio::test]
async fn course_outside_formations_is_rejected() {
    let moodle = common::seeded_site().await;

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": TEMPLATE_COURSE, "userid": STUDENT, "action": "enroll" }),
    )
    .await;
    assert_eq!(data["status"], "error");
    assert!(data["message"].as_str().unwrap().contains("formation course category 2"));
}

#[tokio::test]
async fn unknown_course_and_user_are_reported() {
    let moodle = common::seeded_site().await;

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": 999, "userid": STUDENT, "action": "enroll" }),
    )
    .await;
    assert_eq!(data["message"], "The course 999 does not exist.");

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": FORMATION_COURSE, "userid": 999, "action": "enroll" }),
    )
    .await;
    assert_eq!(data["message"], "The user 999 does not exist.");
}

#[tokio::test]
async fn disabled_plugin_is_an_error_result() {
    let moodle = common::seeded_site().await;
    moodle.set_config(KEY_ENABLE, "off").await;

    let data = send(
        common::build_test_app(&moodle),
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "enroll" }),
    )
    .await;
    assert_eq!(data["status"], "error");
    assert_eq!(data["message"], "The Course Pilot plugin is disabled.");
}

#[tokio::test]
async fn spanish_action_label() {
    let moodle = common::seeded_site().await;

    let response = post_json_auth_lang(
        common::build_test_app(&moodle),
        URI,
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "enroll" }),
        &token_for(MANAGER),
        Some("es"),
    )
    .await;
    let message = body_json(response).await["data"]["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.contains("jdoe"));
    assert!(message.contains("Inscrito"));
}

#[tokio::test]
async fn mistyped_fields_are_rejected_by_the_transport() {
    let moodle = common::seeded_site().await;

    let response = post_json_auth(
        common::build_test_app(&moodle),
        URI,
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": 3 }),
        &token_for(MANAGER),
    )
    .await;
    assert!(response.status().is_client_error());
    assert!(moodle.enrolment_log().await.is_empty());
}

#[tokio::test]
async fn token_is_required() {
    let moodle = common::seeded_site().await;

    let response = post_json(
        common::build_test_app(&moodle),
        URI,
        json!({ "courseid": FORMATION_COURSE, "userid": STUDENT, "action": "enroll" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
