//! Repository for the `backup_controllers` table.

use coursepilot_core::types::DbId;

use crate::MoodleDb;

pub struct BackupControllerRepo;

impl BackupControllerRepo {
    /// Course a restore controller writes into.
    ///
    /// Restore controllers store their target course in `itemid`.
    pub async fn restore_target(
        db: &MoodleDb,
        restore_id: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT itemid FROM {} WHERE backupid = $1 AND operation = 'restore'",
            db.table("backup_controllers")
        );
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(restore_id)
            .fetch_optional(db.pool())
            .await
    }
}
