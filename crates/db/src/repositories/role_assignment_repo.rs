//! Repository for the `role_assignments` table.

use coursepilot_core::types::DbId;

use crate::MoodleDb;

pub struct RoleAssignmentRepo;

impl RoleAssignmentRepo {
    /// Whether `user_id` holds `role_id` directly in `context_id`.
    pub async fn exists(
        db: &MoodleDb,
        user_id: DbId,
        role_id: DbId,
        context_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS (
                SELECT 1 FROM {} WHERE userid = $1 AND roleid = $2 AND contextid = $3
             )",
            db.table("role_assignments")
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(user_id)
            .bind(role_id)
            .bind(context_id)
            .fetch_one(db.pool())
            .await
    }

    /// Distinct roles `user_id` holds in any of `context_ids`.
    pub async fn roles_in_contexts(
        db: &MoodleDb,
        user_id: DbId,
        context_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT roleid FROM {} WHERE userid = $1 AND contextid = ANY($2)",
            db.table("role_assignments")
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(user_id)
            .bind(context_ids)
            .fetch_all(db.pool())
            .await
    }
}
