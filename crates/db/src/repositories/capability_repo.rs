//! Repository for the `role_capabilities` table.

use coursepilot_core::types::DbId;

use crate::MoodleDb;

/// `permission` value granting a capability.
pub const CAP_ALLOW: i64 = 1;

/// `permission` value that overrides every allow.
pub const CAP_PROHIBIT: i64 = -1000;

pub struct CapabilityRepo;

impl CapabilityRepo {
    /// Every permission defined for `capability` for any of `role_ids` in any
    /// of `context_ids`.
    pub async fn permissions(
        db: &MoodleDb,
        capability: &str,
        role_ids: &[DbId],
        context_ids: &[DbId],
    ) -> Result<Vec<i64>, sqlx::Error> {
        if role_ids.is_empty() || context_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT permission FROM {}
             WHERE capability = $1 AND roleid = ANY($2) AND contextid = ANY($3)",
            db.table("role_capabilities")
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(capability)
            .bind(role_ids)
            .bind(context_ids)
            .fetch_all(db.pool())
            .await
    }
}

/// Combine permission rows: a prohibit anywhere wins, otherwise a single
/// allow is enough.
pub fn is_granted(permissions: &[i64]) -> bool {
    if permissions.contains(&CAP_PROHIBIT) {
        return false;
    }
    permissions.contains(&CAP_ALLOW)
}
