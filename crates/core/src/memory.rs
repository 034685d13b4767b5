//! In-process implementation of every collaborator port.
//!
//! Backs the unit and HTTP integration tests and lets the API run without a
//! Moodle site for local demos. State sits behind a single [`RwLock`]; each
//! port call takes the lock once, so calls are atomic with respect to one
//! another but a workflow's check-then-act sequence is not.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::PLUGIN_NAME;
use crate::enrolment::EnrolmentAction;
use crate::error::CoreError;
use crate::pilot::{CoursePilot, PilotPorts};
use crate::ports::{
    CapabilityChecker, CatalogStore, CategoryRef, ConfigStore, CopyIds, CopyRequest,
    CourseCopier, CourseRef, EnrolInstance, EnrolmentService, RestoreRecords, Scope, UserRef,
};
use crate::types::DbId;

/// Context ids are allocated from here up, away from course ids.
const FIRST_CONTEXT_ID: DbId = 5_000;

/// Courses created by copies are allocated from here up.
const FIRST_COPIED_COURSE_ID: DbId = 10_000;

/// One write performed through [`EnrolmentService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolmentWrite {
    pub action: EnrolmentAction,
    pub course_id: DbId,
    pub user_id: DbId,
    pub role_id: Option<DbId>,
}

#[derive(Default)]
struct State {
    config: HashMap<(String, String), String>,
    categories: HashMap<DbId, CategoryRef>,
    courses: HashMap<DbId, CourseRef>,
    contexts: HashMap<DbId, DbId>,
    users: HashMap<DbId, UserRef>,
    /// Capabilities granted site-wide, which also apply in every course.
    system_caps: HashSet<(DbId, String)>,
    course_caps: HashSet<(DbId, DbId, String)>,
    manual_instances: HashMap<DbId, EnrolInstance>,
    /// `(instance_id, user_id)`
    enrolments: HashSet<(DbId, DbId)>,
    /// `(user_id, role_id, context_id)`
    role_assignments: HashSet<(DbId, DbId, DbId)>,
    restores: HashMap<String, DbId>,
    copy_requests: Vec<CopyRequest>,
    enrolment_log: Vec<EnrolmentWrite>,
    fail_copies: bool,
    restores_pending: bool,
    next_context_id: DbId,
    next_instance_id: DbId,
    next_copy_seq: DbId,
}

/// A miniature Moodle site held in memory.
#[derive(Default)]
pub struct InMemoryMoodle {
    state: RwLock<State>,
}

impl InMemoryMoodle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a [`CoursePilot`] whose every port is this store.
    pub fn pilot(self: &Arc<Self>) -> CoursePilot {
        CoursePilot::new(PilotPorts {
            config: self.clone(),
            catalog: self.clone(),
            capabilities: self.clone(),
            copier: self.clone(),
            restores: self.clone(),
            enrolments: self.clone(),
        })
    }

    // ---- seeding ----

    /// Store a Course Pilot setting.
    pub async fn set_config(&self, key: &str, value: &str) {
        self.state
            .write()
            .await
            .config
            .insert((PLUGIN_NAME.to_string(), key.to_string()), value.to_string());
    }

    pub async fn add_category(&self, id: DbId, name: &str) {
        self.state.write().await.categories.insert(
            id,
            CategoryRef {
                id,
                name: name.to_string(),
            },
        );
    }

    /// Add a course (and its context). `category_id = None` models the site
    /// course.
    pub async fn add_course(&self, id: DbId, category_id: Option<DbId>, shortname: &str) {
        let mut state = self.state.write().await;
        state.insert_course(CourseRef {
            id,
            category_id,
            fullname: format!("Course {shortname}"),
            shortname: shortname.to_string(),
            summary: None,
            idnumber: None,
        });
    }

    pub async fn add_user(&self, id: DbId, username: &str) {
        self.state.write().await.users.insert(
            id,
            UserRef {
                id,
                username: username.to_string(),
            },
        );
    }

    /// Attach a manual enrolment instance to `course_id`.
    pub async fn add_manual_instance(&self, course_id: DbId) -> EnrolInstance {
        let mut state = self.state.write().await;
        state.next_instance_id += 1;
        let instance = EnrolInstance {
            id: state.next_instance_id,
            course_id,
        };
        state.manual_instances.insert(course_id, instance.clone());
        instance
    }

    /// Grant `capability` to `user_id` in the system context.
    pub async fn grant_capability(&self, user_id: DbId, capability: &str) {
        self.state
            .write()
            .await
            .system_caps
            .insert((user_id, capability.to_string()));
    }

    /// Grant `capability` to `user_id` in a single course.
    pub async fn grant_course_capability(&self, user_id: DbId, course_id: DbId, capability: &str) {
        self.state
            .write()
            .await
            .course_caps
            .insert((user_id, course_id, capability.to_string()));
    }

    /// Make every subsequent copy fail to queue.
    pub async fn set_copy_failure(&self, fail: bool) {
        self.state.write().await.fail_copies = fail;
    }

    /// Queue copies without recording the restore target yet.
    pub async fn set_restores_pending(&self, pending: bool) {
        self.state.write().await.restores_pending = pending;
    }

    // ---- inspection ----

    /// Every request received by the copy service, in order.
    pub async fn copy_requests(&self) -> Vec<CopyRequest> {
        self.state.read().await.copy_requests.clone()
    }

    /// Every enrol/unenrol write, in order.
    pub async fn enrolment_log(&self) -> Vec<EnrolmentWrite> {
        self.state.read().await.enrolment_log.clone()
    }

    /// Whether `user_id` holds `role_id` in `course_id`.
    pub async fn is_enrolled(&self, course_id: DbId, user_id: DbId, role_id: DbId) -> bool {
        let state = self.state.read().await;
        state
            .contexts
            .get(&course_id)
            .is_some_and(|ctx| state.role_assignments.contains(&(user_id, role_id, *ctx)))
    }
}

impl State {
    fn insert_course(&mut self, course: CourseRef) {
        if !self.contexts.contains_key(&course.id) {
            let context_id = FIRST_CONTEXT_ID + self.next_context_id;
            self.next_context_id += 1;
            self.contexts.insert(course.id, context_id);
        }
        self.courses.insert(course.id, course);
    }
}

#[async_trait]
impl ConfigStore for InMemoryMoodle {
    async fn get_config(&self, plugin: &str, key: &str) -> Result<Option<String>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .config
            .get(&(plugin.to_string(), key.to_string()))
            .cloned())
    }
}

#[async_trait]
impl CatalogStore for InMemoryMoodle {
    async fn find_category(&self, id: DbId) -> Result<Option<CategoryRef>, CoreError> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn find_course(&self, id: DbId) -> Result<Option<CourseRef>, CoreError> {
        Ok(self.state.read().await.courses.get(&id).cloned())
    }

    async fn find_user(&self, id: DbId) -> Result<Option<UserRef>, CoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn course_context_id(&self, course_id: DbId) -> Result<Option<DbId>, CoreError> {
        Ok(self.state.read().await.contexts.get(&course_id).copied())
    }
}

#[async_trait]
impl CapabilityChecker for InMemoryMoodle {
    async fn has_capability(
        &self,
        capability: &str,
        scope: Scope,
        user_id: DbId,
    ) -> Result<bool, CoreError> {
        let state = self.state.read().await;
        let site_wide = state
            .system_caps
            .contains(&(user_id, capability.to_string()));
        Ok(match scope {
            Scope::System => site_wide,
            Scope::Course(course_id) => {
                site_wide
                    || state
                        .course_caps
                        .contains(&(user_id, course_id, capability.to_string()))
            }
        })
    }
}

#[async_trait]
impl CourseCopier for InMemoryMoodle {
    async fn create_copy(&self, request: &CopyRequest) -> Result<Option<CopyIds>, CoreError> {
        let mut state = self.state.write().await;
        state.copy_requests.push(request.clone());
        if state.fail_copies {
            return Ok(None);
        }

        state.next_copy_seq += 1;
        let seq = state.next_copy_seq;
        let ids = CopyIds {
            backup_id: format!("{:032x}", seq * 2),
            restore_id: format!("{:032x}", seq * 2 + 1),
        };

        if !state.restores_pending {
            let course_id = FIRST_COPIED_COURSE_ID + seq;
            state.insert_course(CourseRef {
                id: course_id,
                category_id: Some(request.target_category_id),
                fullname: request.fullname.clone(),
                shortname: request.shortname.clone(),
                summary: request.summary.clone(),
                idnumber: request.idnumber.clone(),
            });
            state.restores.insert(ids.restore_id.clone(), course_id);
        }

        Ok(Some(ids))
    }
}

#[async_trait]
impl RestoreRecords for InMemoryMoodle {
    async fn restored_course_id(&self, restore_id: &str) -> Result<Option<DbId>, CoreError> {
        Ok(self.state.read().await.restores.get(restore_id).copied())
    }
}

#[async_trait]
impl EnrolmentService for InMemoryMoodle {
    async fn manual_instance(&self, course_id: DbId) -> Result<Option<EnrolInstance>, CoreError> {
        Ok(self
            .state
            .read()
            .await
            .manual_instances
            .get(&course_id)
            .cloned())
    }

    async fn enrol(
        &self,
        instance: &EnrolInstance,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        let context_id = *state.contexts.get(&instance.course_id).ok_or_else(|| {
            CoreError::Internal(format!("Course {} has no context", instance.course_id))
        })?;
        state.enrolments.insert((instance.id, user_id));
        state.role_assignments.insert((user_id, role_id, context_id));
        state.enrolment_log.push(EnrolmentWrite {
            action: EnrolmentAction::Enroll,
            course_id: instance.course_id,
            user_id,
            role_id: Some(role_id),
        });
        Ok(())
    }

    /// Drops the enrolment and every role the user holds in the course.
    async fn unenrol(&self, instance: &EnrolInstance, user_id: DbId) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        let context_id = state.contexts.get(&instance.course_id).copied();
        state.enrolments.remove(&(instance.id, user_id));
        if let Some(context_id) = context_id {
            state
                .role_assignments
                .retain(|(uid, _, ctx)| !(*uid == user_id && *ctx == context_id));
        }
        state.enrolment_log.push(EnrolmentWrite {
            action: EnrolmentAction::Unenroll,
            course_id: instance.course_id,
            user_id,
            role_id: None,
        });
        Ok(())
    }

    async fn has_role_assignment(
        &self,
        user_id: DbId,
        role_id: DbId,
        context_id: DbId,
    ) -> Result<bool, CoreError> {
        Ok(self
            .state
            .read()
            .await
            .role_assignments
            .contains(&(user_id, role_id, context_id)))
    }
}
