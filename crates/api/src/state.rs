use std::sync::Arc;

use coursepilot_core::CoursePilot;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// The four Course Pilot operations, wired to their backends.
    pub pilot: CoursePilot,
    /// Moodle database pool, probed by `/health`. `None` when the pilot runs
    /// on the in-memory backend.
    pub pool: Option<coursepilot_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
