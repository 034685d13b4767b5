//! Repository for the `config` and `config_plugins` tables.

use crate::MoodleDb;

/// Reads site and plugin settings.
pub struct ConfigRepo;

impl ConfigRepo {
    /// Value of `plugin/name` from `config_plugins`.
    pub async fn plugin_value(
        db: &MoodleDb,
        plugin: &str,
        name: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!(
            "SELECT value FROM {} WHERE plugin = $1 AND name = $2",
            db.table("config_plugins")
        );
        sqlx::query_scalar::<_, String>(&query)
            .bind(plugin)
            .bind(name)
            .fetch_optional(db.pool())
            .await
    }

    /// Value of a core setting from `config`.
    pub async fn core_value(db: &MoodleDb, name: &str) -> Result<Option<String>, sqlx::Error> {
        let query = format!("SELECT value FROM {} WHERE name = $1", db.table("config"));
        sqlx::query_scalar::<_, String>(&query)
            .bind(name)
            .fetch_optional(db.pool())
            .await
    }
}
