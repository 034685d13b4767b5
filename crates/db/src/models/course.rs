use coursepilot_core::ports::CourseRef;
use coursepilot_core::types::DbId;
use sqlx::FromRow;

/// A row from `course`.
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: DbId,
    /// `0` for the site course.
    pub category: DbId,
    pub fullname: String,
    pub shortname: String,
    pub summary: Option<String>,
    /// Moodle stores "no idnumber" as an empty string.
    pub idnumber: String,
}

impl From<Course> for CourseRef {
    fn from(row: Course) -> Self {
        CourseRef {
            id: row.id,
            category_id: (row.category > 0).then_some(row.category),
            fullname: row.fullname,
            shortname: row.shortname,
            summary: row.summary,
            idnumber: (!row.idnumber.is_empty()).then_some(row.idnumber),
        }
    }
}
