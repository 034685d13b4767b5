//! Role identifiers accepted by the enrolment workflow.
//!
//! These match the ids Moodle seeds for the standard archetypes on a fresh
//! install (`editingteacher`, `teacher`, `student`).

use crate::types::DbId;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Role id of the `editingteacher` archetype.
pub const ROLE_EDITING_TEACHER: DbId = 3;

/// Role id of the `teacher` (non-editing) archetype.
pub const ROLE_TEACHER: DbId = 4;

/// Role id of the `student` archetype.
pub const ROLE_STUDENT: DbId = 5;

/// Role used when the caller does not pass one.
pub const DEFAULT_ROLE: DbId = ROLE_STUDENT;

/// All role ids a user may be enrolled with.
pub const ALLOWED_ROLES: &[DbId] = &[ROLE_EDITING_TEACHER, ROLE_TEACHER, ROLE_STUDENT];

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Whether `role_id` is one of [`ALLOWED_ROLES`].
pub fn is_allowed_role(role_id: DbId) -> bool {
    ALLOWED_ROLES.contains(&role_id)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
