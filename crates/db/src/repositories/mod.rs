//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async lookups that take
//! `&MoodleDb` as the first argument.

pub mod backup_controller_repo;
pub mod capability_repo;
pub mod category_repo;
pub mod config_repo;
pub mod context_repo;
pub mod course_repo;
pub mod enrol_repo;
pub mod role_assignment_repo;
pub mod user_repo;

pub use backup_controller_repo::BackupControllerRepo;
pub use capability_repo::CapabilityRepo;
pub use category_repo::CategoryRepo;
pub use config_repo::ConfigRepo;
pub use context_repo::ContextRepo;
pub use course_repo::CourseRepo;
pub use enrol_repo::EnrolRepo;
pub use role_assignment_repo::RoleAssignmentRepo;
pub use user_repo::UserRepo;
