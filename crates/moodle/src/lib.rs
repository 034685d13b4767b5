//! Moodle REST web-service client.
//!
//! Provides the HTTP wrapper for the `webservice/rest/server.php` endpoint,
//! the course copy form encoding, and the adapters implementing the
//! write-side ports of `coursepilot-core` on top of them.

pub mod api;
pub mod config;
pub mod forms;
pub mod services;

pub use api::{MoodleApi, MoodleApiError};
pub use config::MoodleConfig;
pub use services::{MoodleCopier, MoodleEnrolments};
