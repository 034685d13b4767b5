/// Moodle primary keys are BIGINT columns.
pub type DbId = i64;
