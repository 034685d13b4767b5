//! Repository for the `course` table.

use coursepilot_core::types::DbId;

use crate::models::course::Course;
use crate::MoodleDb;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category, fullname, shortname, summary, idnumber";

pub struct CourseRepo;

impl CourseRepo {
    pub async fn find_by_id(db: &MoodleDb, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", db.table("course"));
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(db.pool())
            .await
    }
}
