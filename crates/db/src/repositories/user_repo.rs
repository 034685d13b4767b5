//! Repository for the `user` table.

use coursepilot_core::types::DbId;

use crate::models::user::User;
use crate::MoodleDb;

pub struct UserRepo;

impl UserRepo {
    /// Find a user that has not been deleted.
    ///
    /// `user` is a reserved word in Postgres, hence the quoting.
    pub async fn find_active_by_id(db: &MoodleDb, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT id, username FROM \"{}\" WHERE id = $1 AND deleted = 0",
            db.table("user")
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db.pool())
            .await
    }
}
