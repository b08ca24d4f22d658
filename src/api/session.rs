//! Session API endpoints.

use axum::extract::State;

use super::{success, ApiResult, AppJson};
use crate::models::{SetRoleRequest, User};
use crate::session::SessionSnapshot;
use crate::AppState;

/// GET /api/session - Current user, role and cached semesters.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionSnapshot> {
    let revision_id = state.repo.get_revision_id().await;
    success(state.session.snapshot().await, revision_id)
}

/// PUT /api/session/role - Switch the active demo identity.
pub async fn set_role(
    State(state): State<AppState>,
    AppJson(request): AppJson<SetRoleRequest>,
) -> ApiResult<User> {
    let revision_id = state.repo.get_revision_id().await;
    success(state.session.set_role(request.role).await, revision_id)
}
