use coursepilot_core::ports::CategoryRef;
use coursepilot_core::types::DbId;
use sqlx::FromRow;

/// A row from `course_categories` (only the columns we read).
#[derive(Debug, Clone, FromRow)]
pub struct CourseCategory {
    pub id: DbId,
    pub name: String,
}

impl From<CourseCategory> for CategoryRef {
    fn from(row: CourseCategory) -> Self {
        CategoryRef {
            id: row.id,
            name: row.name,
        }
    }
}
