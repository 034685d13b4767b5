//! Capability names checked by the workflows.

/// Required (system-wide) to clone a template course.
pub const CAP_BACKUP_COURSE: &str = "moodle/backup:backupcourse";
