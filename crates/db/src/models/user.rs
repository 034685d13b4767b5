use coursepilot_core::ports::UserRef;
use coursepilot_core::types::DbId;
use sqlx::FromRow;

/// A row from `user`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
}

impl From<User> for UserRef {
    fn from(row: User) -> Self {
        UserRef {
            id: row.id,
            username: row.username,
        }
    }
}
