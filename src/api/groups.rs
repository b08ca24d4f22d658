//! Assignment group API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, success, ApiResult, AppJson};
use crate::errors::AppError;
use crate::models::{AssignmentGroup, CreateGroupRequest, GroupOverview};
use crate::AppState;

/// Group search parameters.
#[derive(Debug, Deserialize)]
pub struct GroupQuery {
    /// Case-insensitive term matched against assignment and unit names.
    #[serde(default)]
    pub q: String,
}

/// GET /api/groups - List groups, optionally filtered by `q`.
pub async fn list_groups(
    State(state): State<AppState>,
    Query(params): Query<GroupQuery>,
) -> ApiResult<Vec<AssignmentGroup>> {
    let revision_id = state.repo.get_revision_id().await;

    let groups = if params.q.trim().is_empty() {
        state.repo.get_groups().await
    } else {
        state.repo.search_groups(&params.q).await
    };
    success(groups, revision_id)
}

/// GET /api/groups/overview - The current user's groups and the ones open to them.
pub async fn group_overview(
    State(state): State<AppState>,
    Query(params): Query<GroupQuery>,
) -> ApiResult<GroupOverview> {
    let revision_id = state.repo.get_revision_id().await;
    let actor = state.session.current_user().await;
    success(state.session.group_overview(&actor, &params.q).await, revision_id)
}

/// GET /api/semesters/:id/units/:unit_id/groups - A unit room's groups for the current user.
pub async fn unit_room_groups(
    State(state): State<AppState>,
    Path((semester_id, unit_id)): Path<(String, String)>,
    Query(params): Query<GroupQuery>,
) -> ApiResult<GroupOverview> {
    let revision_id = state.repo.get_revision_id().await;
    let actor = state.session.current_user().await;

    match state
        .session
        .unit_room(&actor, &semester_id, &unit_id, &params.q)
        .await
    {
        Ok(overview) => success(overview, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/groups/:id - Get a single group.
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AssignmentGroup> {
    let revision_id = state.repo.get_revision_id().await;

    match state.repo.get_group_by_id(&id).await {
        Some(group) => success(group, revision_id),
        None => error(
            AppError::NotFound(format!("Group {} not found", id)),
            revision_id,
        ),
    }
}

/// POST /api/groups - Create a group as the current user.
pub async fn create_group(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateGroupRequest>,
) -> ApiResult<AssignmentGroup> {
    let revision_id = state.repo.get_revision_id().await;
    let actor = state.session.current_user().await;

    match state.session.create_group(&actor, request).await {
        Ok(group) => {
            let new_revision = state.repo.get_revision_id().await;
            success(group, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/groups/:id/join - Join a group as the current user.
pub async fn join_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AssignmentGroup> {
    let revision_id = state.repo.get_revision_id().await;
    let actor = state.session.current_user().await;

    match state.session.join_group(&actor, &id).await {
        Ok(group) => {
            let new_revision = state.repo.get_revision_id().await;
            success(group, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
