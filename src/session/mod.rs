//! Session facade over the repository.
//!
//! Holds which demo identity is active, gates mutations by role, and raises the
//! notifications that accompany successful actions. Gated operations take the
//! acting user explicitly; the session only remembers the current selection.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    AssignmentGroup, CreateGroupRequest, CreateSemesterRequest, GroupOverview,
    NotificationMessage, Semester, User, UserRole,
};

/// Bounds enforced on new groups.
const MIN_ASSIGNMENT_NAME_LEN: usize = 3;
const MIN_GROUP_SIZE: usize = 1;
const MAX_GROUP_SIZE: usize = 10;

/// Bounds enforced on new semester names.
const MIN_SEMESTER_NAME_LEN: usize = 3;
const MAX_SEMESTER_NAME_LEN: usize = 50;

/// What the UI needs to render its shell.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_user: User,
    pub role: UserRole,
    pub semesters: Vec<Semester>,
}

struct SessionState {
    current_user: User,
    semesters: Vec<Semester>,
}

pub struct Session {
    repo: Arc<Repository>,
    state: RwLock<SessionState>,
}

impl Session {
    /// Start a session as the demo identity for `role`, caching the semester list.
    pub async fn new(repo: Arc<Repository>, role: UserRole) -> Self {
        let semesters = repo.get_semesters().await;
        Self {
            repo,
            state: RwLock::new(SessionState {
                current_user: User::for_role(role),
                semesters,
            }),
        }
    }

    pub async fn current_user(&self) -> User {
        self.state.read().await.current_user.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            role: state.current_user.role,
            current_user: state.current_user.clone(),
            semesters: state.semesters.clone(),
        }
    }

    /// Switch the active identity to the demo user holding `role`.
    pub async fn set_role(&self, role: UserRole) -> User {
        let user = User::for_role(role);
        self.state.write().await.current_user = user.clone();
        tracing::info!(user_id = %user.id, role = role.as_str(), "Active role switched");
        user
    }

    pub async fn create_notification(
        &self,
        title: &str,
        description: &str,
        link: Option<&str>,
    ) -> NotificationMessage {
        self.repo.add_notification(title, description, link).await
    }

    /// Create a group on behalf of a class representative.
    pub async fn create_group(
        &self,
        actor: &User,
        details: CreateGroupRequest,
    ) -> Result<AssignmentGroup, AppError> {
        require_role(actor, UserRole::ClassRepresentative, "create groups")?;
        let (semester_id, unit_id) = self.validate_group(&details).await?;
        let details = CreateGroupRequest {
            assignment_name: details.assignment_name.trim().to_string(),
            ..details
        };

        let group = self.repo.add_group(&details, actor).await;
        tracing::info!(group_id = %group.id, created_by = %actor.id, "Group created");

        let link = format!("/rooms/{}/{}", semester_id, unit_id);
        self.create_notification(
            "New Group Created",
            &format!("Group \"{}\" is now available.", group.assignment_name),
            Some(&link),
        )
        .await;

        Ok(group)
    }

    /// Join a group on behalf of a student. Returns the group as updated.
    pub async fn join_group(&self, actor: &User, group_id: &str) -> Result<AssignmentGroup, AppError> {
        require_role(actor, UserRole::Student, "join groups")?;

        if !self.repo.join_group(group_id, actor).await {
            return match self.repo.get_group_by_id(group_id).await {
                None => Err(AppError::NotFound(format!("Group {} not found", group_id))),
                Some(_) => Err(AppError::Conflict(
                    "Could not join the group. It might be full, or you may already be a member."
                        .to_string(),
                )),
            };
        }

        tracing::info!(group_id, user_id = %actor.id, "Group joined");
        self.create_notification(
            "Joined Group",
            "You have successfully joined a group.",
            Some("/groups"),
        )
        .await;

        self.repo
            .get_group_by_id(group_id)
            .await
            .ok_or_else(|| AppError::Internal(format!("Group {} vanished after join", group_id)))
    }

    /// Create a semester on behalf of a class representative and refresh the cached list.
    pub async fn create_semester(
        &self,
        actor: &User,
        request: CreateSemesterRequest,
    ) -> Result<Semester, AppError> {
        require_role(actor, UserRole::ClassRepresentative, "create semesters")?;

        let name = request.name.trim();
        let len = name.chars().count();
        if len < MIN_SEMESTER_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Semester name must be at least {} characters.",
                MIN_SEMESTER_NAME_LEN
            )));
        }
        if len > MAX_SEMESTER_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Semester name must be at most {} characters.",
                MAX_SEMESTER_NAME_LEN
            )));
        }

        let semester = self.repo.add_semester(name, request.is_public, actor).await;
        tracing::info!(semester_id = %semester.id, created_by = %actor.id, "Semester created");

        self.create_notification(
            "New Semester Created",
            &format!("Semester \"{}\" is now available.", semester.name),
            Some(&format!("/rooms/{}", semester.id)),
        )
        .await;
        self.refresh_semesters().await;

        Ok(semester)
    }

    /// Search groups, then split them into the actor's own and the ones still open to them.
    pub async fn group_overview(&self, actor: &User, term: &str) -> GroupOverview {
        let groups = self.repo.search_groups(term).await;
        GroupOverview::partition(groups, &actor.id)
    }

    /// The groups of one unit room, filtered by assignment name and split for `actor`.
    pub async fn unit_room(
        &self,
        actor: &User,
        semester_id: &str,
        unit_id: &str,
        term: &str,
    ) -> Result<GroupOverview, AppError> {
        if self.repo.get_semester_by_id(semester_id).await.is_none() {
            return Err(AppError::NotFound(format!("Semester {} not found", semester_id)));
        }
        if self.repo.get_unit_by_id(unit_id).await.is_none() {
            return Err(AppError::NotFound(format!("Unit {} not found", unit_id)));
        }

        let needle = term.trim().to_lowercase();
        let groups = self
            .repo
            .get_groups_by_unit(semester_id, unit_id)
            .await
            .into_iter()
            .filter(|g| g.assignment_name.to_lowercase().contains(&needle))
            .collect();
        Ok(GroupOverview::partition(groups, &actor.id))
    }

    async fn refresh_semesters(&self) {
        // Read under the guard so refreshes land in order.
        let mut state = self.state.write().await;
        state.semesters = self.repo.get_semesters().await;
    }

    /// Check the group form and that its unit lives in its semester.
    async fn validate_group(&self, details: &CreateGroupRequest) -> Result<(String, String), AppError> {
        if details.assignment_name.trim().chars().count() < MIN_ASSIGNMENT_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Assignment name must be at least {} characters.",
                MIN_ASSIGNMENT_NAME_LEN
            )));
        }
        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&details.max_size) {
            return Err(AppError::Validation(format!(
                "Group size must be between {} and {}.",
                MIN_GROUP_SIZE, MAX_GROUP_SIZE
            )));
        }

        let semester_id = non_blank(details.semester_id.as_deref())
            .ok_or_else(|| AppError::Validation("Please select a semester.".to_string()))?;
        let unit_id = non_blank(details.unit_id.as_deref())
            .ok_or_else(|| AppError::Validation("Please select a unit.".to_string()))?;

        if self.repo.get_semester_by_id(semester_id).await.is_none() {
            return Err(AppError::Validation(format!(
                "Semester {} does not exist",
                semester_id
            )));
        }
        match self.repo.get_unit_by_id(unit_id).await {
            Some(unit) if unit.semester_id == semester_id => {}
            Some(_) => {
                return Err(AppError::Validation(format!(
                    "Unit {} does not belong to semester {}",
                    unit_id, semester_id
                )))
            }
            None => {
                return Err(AppError::Validation(format!(
                    "Unit {} does not exist",
                    unit_id
                )))
            }
        }

        Ok((semester_id.to_string(), unit_id.to_string()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_role(actor: &User, role: UserRole, action: &str) -> Result<(), AppError> {
    if actor.role == role {
        return Ok(());
    }
    let who = match role {
        UserRole::Student => "students",
        UserRole::ClassRepresentative => "class representatives",
    };
    tracing::warn!(user_id = %actor.id, role = actor.role.as_str(), "Only {} can {}", who, action);
    Err(AppError::Forbidden(format!("Only {} can {}.", who, action)))
}
