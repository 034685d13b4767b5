//! Read access to a Moodle site's Postgres database.
//!
//! Moodle owns the schema; nothing here migrates or writes it. Table names
//! carry the site's prefix (`mdl_` unless the site was installed otherwise),
//! so every query goes through [`MoodleDb::table`].

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::MoodleStore;

pub type DbPool = sqlx::PgPool;

/// Table prefix of a default Moodle install.
pub const DEFAULT_PREFIX: &str = "mdl_";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// The configured table prefix is not a plain identifier fragment.
#[derive(Debug, thiserror::Error)]
#[error("Invalid Moodle table prefix: '{0}' (expected [a-z0-9_]+)")]
pub struct InvalidPrefix(pub String);

/// A pool plus the table prefix of the Moodle site behind it.
#[derive(Debug, Clone)]
pub struct MoodleDb {
    pool: DbPool,
    prefix: String,
}

impl MoodleDb {
    /// The prefix is spliced into SQL text, so only `[a-z0-9_]` is allowed.
    pub fn new(pool: DbPool, prefix: &str) -> Result<Self, InvalidPrefix> {
        let valid = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(InvalidPrefix(prefix.to_string()));
        }
        Ok(Self {
            pool,
            prefix: prefix.to_string(),
        })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Prefixed name of a Moodle table, e.g. `course` -> `mdl_course`.
    pub fn table(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}
