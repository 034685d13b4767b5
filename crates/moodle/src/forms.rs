//! Encoders for the parameter shapes Moodle web services expect.

use coursepilot_core::ports::CopyRequest;
use coursepilot_core::types::DbId;

/// Build the `jsonformdata` argument of `core_backup_submit_copy_form`.
///
/// Moodle expects the copy form's fields URL-encoded as if the HTML form had
/// been submitted, then wrapped in a JSON string. Each kept role becomes a
/// `role_{id}` field; roles without one lose their enrolments in the copy.
/// The form has no summary field, so `request.summary` is not sent.
pub fn copy_form_json(
    request: &CopyRequest,
    startdate: i64,
) -> Result<String, serde_urlencoded::ser::Error> {
    let mut fields: Vec<(String, String)> = [
        ("courseid", request.source_course_id.to_string()),
        ("fullname", request.fullname.clone()),
        ("shortname", request.shortname.clone()),
        ("category", request.target_category_id.to_string()),
        ("visible", "1".into()),
        ("startdate", startdate.to_string()),
        ("enddate", "0".into()),
        ("idnumber", request.idnumber.clone().unwrap_or_default()),
        ("userdata", u8::from(request.copy_user_data).to_string()),
        ("_qf__core_backup_output_copy_form", "1".into()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();
    fields.extend(
        request
            .kept_roles
            .iter()
            .map(|role| (format!("role_{role}"), role.to_string())),
    );

    let encoded = serde_urlencoded::to_string(&fields)?;
    Ok(serde_json::Value::String(encoded).to_string())
}

/// Parameters of `enrol_manual_enrol_users` / `enrol_manual_unenrol_users`
/// for a single user.
pub fn enrolment_params(
    course_id: DbId,
    user_id: DbId,
    role_id: Option<DbId>,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("enrolments[0][courseid]".to_string(), course_id.to_string()),
        ("enrolments[0][userid]".to_string(), user_id.to_string()),
    ];
    if let Some(role_id) = role_id {
        params.push(("enrolments[0][roleid]".to_string(), role_id.to_string()));
    }
    params
}
