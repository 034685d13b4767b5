//! Repository for the `course_categories` table.

use coursepilot_core::types::DbId;

use crate::models::category::CourseCategory;
use crate::MoodleDb;

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn find_by_id(
        db: &MoodleDb,
        id: DbId,
    ) -> Result<Option<CourseCategory>, sqlx::Error> {
        let query = format!(
            "SELECT id, name FROM {} WHERE id = $1",
            db.table("course_categories")
        );
        sqlx::query_as::<_, CourseCategory>(&query)
            .bind(id)
            .fetch_optional(db.pool())
            .await
    }
}
