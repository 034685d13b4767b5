//! Repository for the `context` table.

use coursepilot_core::types::DbId;

use crate::MoodleDb;

/// `contextlevel` of the single system context.
pub const CONTEXT_SYSTEM: i64 = 10;

/// `contextlevel` of course contexts.
pub const CONTEXT_COURSE: i64 = 50;

pub struct ContextRepo;

impl ContextRepo {
    /// Id of the context at `level` for `instance_id`.
    pub async fn find_id(
        db: &MoodleDb,
        level: i64,
        instance_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT id FROM {} WHERE contextlevel = $1 AND instanceid = $2",
            db.table("context")
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(level)
            .bind(instance_id)
            .fetch_optional(db.pool())
            .await
    }

    /// Id of the system context (instance `0`).
    pub async fn system_id(db: &MoodleDb) -> Result<Option<DbId>, sqlx::Error> {
        Self::find_id(db, CONTEXT_SYSTEM, 0).await
    }

    pub async fn course_id(db: &MoodleDb, course_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        Self::find_id(db, CONTEXT_COURSE, course_id).await
    }
}
