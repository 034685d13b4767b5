//! Adapters implementing the write-side ports over [`MoodleApi`].

use async_trait::async_trait;
use coursepilot_core::error::CoreError;
use coursepilot_core::ports::{CopyIds, CopyRequest, CourseCopier, EnrolInstance, EnrolmentService};
use coursepilot_core::types::DbId;
use coursepilot_db::repositories::{EnrolRepo, RoleAssignmentRepo};
use coursepilot_db::MoodleDb;

use crate::api::{MoodleApi, MoodleApiError};

/// [`CourseCopier`] backed by Moodle's asynchronous course copy.
#[derive(Clone)]
pub struct MoodleCopier {
    api: MoodleApi,
}

impl MoodleCopier {
    pub fn new(api: MoodleApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CourseCopier for MoodleCopier {
    async fn create_copy(&self, request: &CopyRequest) -> Result<Option<CopyIds>, CoreError> {
        if request.summary.is_some() {
            tracing::info!(
                source_course_id = request.source_course_id,
                "Summary not applied; the copy keeps the source course summary",
            );
        }
        match self.api.submit_copy_form(request).await {
            Ok(ids) => Ok(Some(ids)),
            Err(MoodleApiError::Exception {
                errorcode, message, ..
            }) => {
                tracing::warn!(
                    source_course_id = request.source_course_id,
                    %errorcode,
                    %message,
                    "Moodle refused the course copy",
                );
                Ok(None)
            }
            Err(e) => Err(CoreError::backend(e)),
        }
    }
}

/// [`EnrolmentService`] reading enrolment state from the database and
/// writing it through the manual enrolment web services.
#[derive(Clone)]
pub struct MoodleEnrolments {
    api: MoodleApi,
    db: MoodleDb,
}

impl MoodleEnrolments {
    pub fn new(api: MoodleApi, db: MoodleDb) -> Self {
        Self { api, db }
    }
}

#[async_trait]
impl EnrolmentService for MoodleEnrolments {
    async fn manual_instance(&self, course_id: DbId) -> Result<Option<EnrolInstance>, CoreError> {
        let row = EnrolRepo::find_manual_instance(&self.db, course_id)
            .await
            .map_err(CoreError::backend)?;
        Ok(row.map(Into::into))
    }

    async fn enrol(
        &self,
        instance: &EnrolInstance,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<(), CoreError> {
        self.api
            .enrol_users(instance.course_id, user_id, role_id)
            .await
            .map_err(CoreError::backend)
    }

    async fn unenrol(&self, instance: &EnrolInstance, user_id: DbId) -> Result<(), CoreError> {
        self.api
            .unenrol_users(instance.course_id, user_id)
            .await
            .map_err(CoreError::backend)
    }

    async fn has_role_assignment(
        &self,
        user_id: DbId,
        role_id: DbId,
        context_id: DbId,
    ) -> Result<bool, CoreError> {
        RoleAssignmentRepo::exists(&self.db, user_id, role_id, context_id)
            .await
            .map_err(CoreError::backend)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::api::WS_SUBMIT_COPY_FORM;

    /// Fake REST endpoint: refuses copies into category 99, rejects bad
    /// tokens, returns fixed ids otherwise.
    async fn rest_server(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
        if form.get("wstoken").map(String::as_str) != Some("secret") {
            return Json(json!({
                "exception": "moodle_exception",
                "errorcode": "invalidtoken",
                "message": "Invalid token - token not found",
            }));
        }
        match form.get("wsfunction").map(String::as_str) {
            Some(WS_SUBMIT_COPY_FORM) => {
                let raw = form.get("jsonformdata").cloned().unwrap_or_default();
                let inner: String = serde_json::from_str(&raw).unwrap_or_default();
                if inner.contains("category=99") {
                    Json(json!({
                        "exception": "moodle_exception",
                        "errorcode": "invalidcategoryid",
                        "message": "Category not known",
                    }))
                } else {
                    // Moodle returns the ids JSON-encoded as a string.
                    Json(Value::String(
                        json!({ "backupid": "b1", "restoreid": "r1" }).to_string(),
                    ))
                }
            }
            _ => Json(Value::Null),
        }
    }

    async fn spawn_server() -> String {
        let app = Router::new().route("/webservice/rest/server.php", post(rest_server));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request(category: DbId) -> CopyRequest {
        CopyRequest {
            source_course_id: 20,
            target_category_id: category,
            fullname: "Copy".into(),
            shortname: "COPY1".into(),
            summary: None,
            idnumber: None,
            kept_roles: Vec::new(),
            copy_user_data: false,
        }
    }

    #[tokio::test]
    async fn copy_returns_ids() {
        let url = spawn_server().await;
        let api = MoodleApi::with_client(reqwest::Client::new(), url, "secret".into());
        let ids = MoodleCopier::new(api).create_copy(&request(4)).await.unwrap();
        assert_eq!(
            ids,
            Some(CopyIds {
                backup_id: "b1".into(),
                restore_id: "r1".into()
            })
        );
    }

    #[tokio::test]
    async fn refused_copy_is_not_a_fault() {
        let url = spawn_server().await;
        let api = MoodleApi::with_client(reqwest::Client::new(), url, "secret".into());
        let ids = MoodleCopier::new(api).create_copy(&request(99)).await.unwrap();
        assert_eq!(ids, None);
    }

    #[tokio::test]
    async fn enrol_calls_accept_null_results() {
        let url = spawn_server().await;
        let api = MoodleApi::with_client(reqwest::Client::new(), url, "secret".into());
        api.enrol_users(20, 7, 5).await.unwrap();
        api.unenrol_users(20, 7).await.unwrap();
    }

    #[tokio::test]
    async fn bad_token_surfaces_as_exception() {
        let url = spawn_server().await;
        let api = MoodleApi::with_client(reqwest::Client::new(), url, "wrong".into());
        let err = api.enrol_users(20, 7, 5).await.unwrap_err();
        assert_matches!(err, MoodleApiError::Exception { errorcode, .. } if errorcode == "invalidtoken");
    }

    #[tokio::test]
    async fn unreachable_site_is_a_fault() {
        let api = MoodleApi::with_client(
            reqwest::Client::new(),
            "http://127.0.0.1:1".into(),
            "secret".into(),
        );
        let err = MoodleCopier::new(api).create_copy(&request(4)).await.unwrap_err();
        assert_matches!(err, CoreError::Backend(_));
    }
}
