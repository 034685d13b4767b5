//! Repository for the `enrol` table.

use coursepilot_core::types::DbId;

use crate::models::enrol::{Enrol, ENROL_MANUAL};
use crate::MoodleDb;

pub struct EnrolRepo;

impl EnrolRepo {
    /// First manual enrolment instance of a course, in the course's
    /// enrolment method order.
    pub async fn find_manual_instance(
        db: &MoodleDb,
        course_id: DbId,
    ) -> Result<Option<Enrol>, sqlx::Error> {
        let query = format!(
            "SELECT id, courseid FROM {}
             WHERE courseid = $1 AND enrol = $2
             ORDER BY sortorder, id
             LIMIT 1",
            db.table("enrol")
        );
        sqlx::query_as::<_, Enrol>(&query)
            .bind(course_id)
            .bind(ENROL_MANUAL)
            .fetch_optional(db.pool())
            .await
    }
}
