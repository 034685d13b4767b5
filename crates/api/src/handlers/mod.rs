pub mod categories;
pub mod courses;
pub mod enrolments;
