use coursepilot_core::ports::EnrolInstance;
use coursepilot_core::types::DbId;
use sqlx::FromRow;

/// Enrolment method name of the manual plugin.
pub const ENROL_MANUAL: &str = "manual";

/// A row from `enrol`.
#[derive(Debug, Clone, FromRow)]
pub struct Enrol {
    pub id: DbId,
    pub courseid: DbId,
}

impl From<Enrol> for EnrolInstance {
    fn from(row: Enrol) -> Self {
        EnrolInstance {
            id: row.id,
            course_id: row.courseid,
        }
    }
}
