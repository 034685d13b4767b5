//! Row types for the Moodle tables the service reads.

pub mod category;
pub mod course;
pub mod enrol;
pub mod user;
