//! Course Pilot domain core.
//!
//! Holds the plugin configuration model, the collaborator traits the
//! workflows are written against, the three workflows themselves (category
//! resolution, course provisioning, enrolment toggling), the translated
//! message catalogue and an in-memory backend. Nothing in here performs I/O
//! directly; database and web-service access live in the adapter crates.

pub mod capabilities;
pub mod categories;
pub mod config;
pub mod enrolment;
pub mod error;
pub mod memory;
pub mod messages;
pub mod outcome;
pub mod pilot;
pub mod ports;
pub mod provisioning;
pub mod roles;
pub mod types;

pub use pilot::{CoursePilot, PilotPorts};
