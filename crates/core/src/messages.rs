//! Translated result messages.
//!
//! Workflows report a typed [`Message`]; the HTTP edge renders it in the
//! caller's [`Language`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enrolment::EnrolmentAction;
use crate::types::DbId;

/// Languages the catalogue is translated into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// Pick the first supported language from an `Accept-Language` value.
    ///
    /// Quality weights are ignored; tags are tried in the order given.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .find_map(|tag| tag.trim().parse().ok())
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts bare codes and regional tags (`es`, `es-CO`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            _ => Err(format!("Unsupported language: '{s}'")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every message an operation outcome can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    PluginDisabled,
    NoPermission,
    InvalidTemplateCourse { course_id: DbId },
    InvalidFormation { category_id: DbId },
    CourseNotCopied,
    CopyQueued,
    InvalidParameters { course_id: DbId },
    InvalidRoleId,
    CourseNotFound { course_id: DbId },
    InvalidUser { user_id: DbId },
    NoEnrolmentMethod { course_id: DbId },
    AlreadyEnrolled { course_id: DbId },
    AlreadyUnenrolled { course_id: DbId },
    EnrolmentUpdated {
        username: String,
        action: EnrolmentAction,
        course_id: DbId,
    },
}

impl Message {
    /// Render the message in `lang`.
    pub fn render(&self, lang: Language) -> String {
        match lang {
            Language::En => self.render_en(),
            Language::Es => self.render_es(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Message::PluginDisabled => "The Course Pilot plugin is disabled.".into(),
            Message::NoPermission => "You do not have permission to perform this action.".into(),
            Message::InvalidTemplateCourse { course_id } => format!(
                "The template course {course_id} does not exist or the category is not set to be used as a template."
            ),
            Message::InvalidFormation { category_id } => format!(
                "The formation course category {category_id} does not exist or is not set to be used as a formation."
            ),
            Message::CourseNotCopied => "The course was not copied.".into(),
            Message::CopyQueued => {
                "The course copy has been queued and will be created shortly".into()
            }
            Message::InvalidParameters { .. } => {
                "Invalid parameters, please check the values and try again.".into()
            }
            Message::InvalidRoleId => {
                "Invalid roleid parameter, please check the value and try again.".into()
            }
            Message::CourseNotFound { course_id } => {
                format!("The course {course_id} does not exist.")
            }
            Message::InvalidUser { user_id } => format!("The user {user_id} does not exist."),
            Message::NoEnrolmentMethod { course_id } => format!(
                "An error occurred while trying to enrol the user in the course {course_id}."
            ),
            Message::AlreadyEnrolled { course_id } => {
                format!("The user is already enrolled in the course {course_id}.")
            }
            Message::AlreadyUnenrolled { course_id } => {
                format!("The user is not currently enrolled in the course {course_id}.")
            }
            Message::EnrolmentUpdated {
                username,
                action,
                course_id,
            } => format!(
                "The user {username} has been successfully {} in the course {course_id}.",
                action_label(*action, Language::En)
            ),
        }
    }

    fn render_es(&self) -> String {
        match self {
            Message::PluginDisabled => "El plugin Course Pilot está deshabilitado.".into(),
            Message::NoPermission => "No tienes permiso para realizar esta acción.".into(),
            Message::InvalidTemplateCourse { course_id } => format!(
                "El curso plantilla {course_id} no existe o la categoría no está configurada como plantilla."
            ),
            Message::InvalidFormation { category_id } => format!(
                "La categoría del curso de formación {category_id} no existe o no está configurada como formación."
            ),
            Message::CourseNotCopied => "No se pudo copiar el curso.".into(),
            Message::CopyQueued => {
                "La copia del curso ha sido puesta en cola y se creará en breve.".into()
            }
            Message::InvalidParameters { .. } => {
                "Parámetros inválidos, por favor verifica los valores e intenta nuevamente.".into()
            }
            Message::InvalidRoleId => {
                "Parámetro roleid inválido, por favor verifica el valor e intenta nuevamente."
                    .into()
            }
            Message::CourseNotFound { course_id } => {
                format!("El curso {course_id} no existe.")
            }
            Message::InvalidUser { user_id } => format!("El usuario {user_id} no existe."),
            Message::NoEnrolmentMethod { course_id } => format!(
                "Ocurrió un error al intentar inscribir al usuario en el curso {course_id}."
            ),
            Message::AlreadyEnrolled { course_id } => {
                format!("El usuario ya está inscrito en el curso {course_id}.")
            }
            Message::AlreadyUnenrolled { course_id } => {
                format!("El usuario actualmente no está inscrito en el curso {course_id}.")
            }
            Message::EnrolmentUpdated {
                username,
                action,
                course_id,
            } => format!(
                "El usuario {username} ha sido {} exitosamente en el curso {course_id}.",
                action_label(*action, Language::Es)
            ),
        }
    }
}

/// Past-tense label for an enrolment action.
pub fn action_label(action: EnrolmentAction, lang: Language) -> &'static str {
    match (action, lang) {
        (EnrolmentAction::Enroll, Language::En) => "enrolled",
        (EnrolmentAction::Unenroll, Language::En) => "unenrolled",
        (EnrolmentAction::Enroll, Language::Es) => "Inscrito",
        (EnrolmentAction::Unenroll, Language::Es) => "Desinscrito",
    }
}
