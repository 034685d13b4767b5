//! REST API client for Moodle web services.
//!
//! Every call is a `POST {url}/webservice/rest/server.php` with the token,
//! the function name and `moodlewsrestformat=json`, plus the function's
//! parameters as form fields.

use std::time::Duration;

use coursepilot_core::ports::{CopyIds, CopyRequest};
use coursepilot_core::types::DbId;
use serde::Deserialize;

use crate::config::MoodleConfig;
use crate::forms;

/// Path of the REST server script, relative to the site root.
const REST_ENDPOINT: &str = "/webservice/rest/server.php";

pub const WS_SUBMIT_COPY_FORM: &str = "core_backup_submit_copy_form";
pub const WS_ENROL_USERS: &str = "enrol_manual_enrol_users";
pub const WS_UNENROL_USERS: &str = "enrol_manual_unenrol_users";

/// HTTP client for a single Moodle site.
#[derive(Clone)]
pub struct MoodleApi {
    client: reqwest::Client,
    url: String,
    token: String,
}

/// Errors from the Moodle REST layer.
#[derive(Debug, thiserror::Error)]
pub enum MoodleApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Moodle returned a non-2xx status code.
    #[error("Moodle API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// Moodle answered 200 with an exception payload.
    #[error("Moodle exception {errorcode} ({exception}): {message}")]
    Exception {
        exception: String,
        errorcode: String,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected Moodle response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The copy form could not be encoded.
    #[error("Form encoding failed: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),
}

/// Failure payload Moodle sends in place of a function result.
#[derive(Debug, Deserialize)]
struct ExceptionBody {
    exception: String,
    errorcode: String,
    #[serde(default)]
    message: String,
}

/// Result of `core_backup_submit_copy_form`.
#[derive(Debug, Deserialize)]
struct CopyFormResponse {
    backupid: String,
    restoreid: String,
}

impl MoodleApi {
    /// Create a client from [`MoodleConfig`], applying its timeout.
    pub fn new(config: &MoodleConfig) -> Result<Self, MoodleApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.url.clone(), config.ws_token.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, url: String, token: String) -> Self {
        Self { client, url, token }
    }

    /// Invoke `wsfunction` with form `params` and return the decoded body.
    pub async fn call(
        &self,
        wsfunction: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, MoodleApiError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("wstoken", self.token.as_str()),
            ("wsfunction", wsfunction),
            ("moodlewsrestformat", "json"),
        ];
        form.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        tracing::debug!(wsfunction, "Calling Moodle web service");
        let response = self
            .client
            .post(format!("{}{}", self.url, REST_ENDPOINT))
            .form(&form)
            .send()
            .await?;

        let body = Self::parse_response(response).await?;
        Self::check_exception(body)
    }

    /// Queue an asynchronous course copy.
    pub async fn submit_copy_form(&self, request: &CopyRequest) -> Result<CopyIds, MoodleApiError> {
        let startdate = chrono::Utc::now().timestamp();
        let jsonformdata = forms::copy_form_json(request, startdate)?;
        let body = self
            .call(WS_SUBMIT_COPY_FORM, &[("jsonformdata".into(), jsonformdata)])
            .await?;
        Self::decode_copy_ids(body)
    }

    /// Enrol `user_id` into `course_id` with `role_id` through the manual
    /// enrolment plugin.
    pub async fn enrol_users(
        &self,
        course_id: DbId,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<(), MoodleApiError> {
        let params = forms::enrolment_params(course_id, user_id, Some(role_id));
        self.call(WS_ENROL_USERS, &params).await?;
        Ok(())
    }

    /// Remove `user_id`'s manual enrolment from `course_id`.
    pub async fn unenrol_users(&self, course_id: DbId, user_id: DbId) -> Result<(), MoodleApiError> {
        let params = forms::enrolment_params(course_id, user_id, None);
        self.call(WS_UNENROL_USERS, &params).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, MoodleApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MoodleApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body.
    ///
    /// Functions without a return value answer with an empty body or
    /// `null`; both decode to [`serde_json::Value::Null`].
    async fn parse_response(response: reqwest::Response) -> Result<serde_json::Value, MoodleApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Decode the copy ids. The function's return type is `PARAM_RAW`, so
    /// Moodle sends the ids object JSON-encoded inside a string; a bare
    /// object is accepted too.
    fn decode_copy_ids(body: serde_json::Value) -> Result<CopyIds, MoodleApiError> {
        let ids: CopyFormResponse = match body {
            serde_json::Value::String(raw) => serde_json::from_str(&raw)?,
            other => serde_json::from_value(other)?,
        };
        Ok(CopyIds {
            backup_id: ids.backupid,
            restore_id: ids.restoreid,
        })
    }

    /// Turn an exception payload into [`MoodleApiError::Exception`].
    fn check_exception(body: serde_json::Value) -> Result<serde_json::Value, MoodleApiError> {
        if body.get("exception").is_none() {
            return Ok(body);
        }
        let ex: ExceptionBody = serde_json::from_value(body)?;
        Err(MoodleApiError::Exception {
            exception: ex.exception,
            errorcode: ex.errorcode,
            message: ex.message,
        })
    }
}
