//! Semester and unit API endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult, AppJson};
use crate::errors::AppError;
use crate::models::{CreateSemesterRequest, DocumentFile, Semester, Unit};
use crate::AppState;

/// GET /api/semesters - List all semesters.
pub async fn list_semesters(State(state): State<AppState>) -> ApiResult<Vec<Semester>> {
    let revision_id = state.repo.get_revision_id().await;
    success(state.repo.get_semesters().await, revision_id)
}

/// GET /api/semesters/:id - Get a single semester.
pub async fn get_semester(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Semester> {
    let revision_id = state.repo.get_revision_id().await;

    match state.repo.get_semester_by_id(&id).await {
        Some(semester) => success(semester, revision_id),
        None => error(
            AppError::NotFound(format!("Semester {} not found", id)),
            revision_id,
        ),
    }
}

/// POST /api/semesters - Create a semester as the current user.
pub async fn create_semester(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateSemesterRequest>,
) -> ApiResult<Semester> {
    let revision_id = state.repo.get_revision_id().await;
    let actor = state.session.current_user().await;

    match state.session.create_semester(&actor, request).await {
        Ok(semester) => {
            let new_revision = state.repo.get_revision_id().await;
            success(semester, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/semesters/:id/units - Units of a semester.
///
/// An unknown semester is a 404 rather than an empty list.
pub async fn list_units(
    State(state): State<AppState>,
    Path(semester_id): Path<String>,
) -> ApiResult<Vec<Unit>> {
    let revision_id = state.repo.get_revision_id().await;

    if state.repo.get_semester_by_id(&semester_id).await.is_none() {
        return error(
            AppError::NotFound(format!("Semester {} not found", semester_id)),
            revision_id,
        );
    }

    success(state.repo.get_units_by_semester(&semester_id).await, revision_id)
}

/// GET /api/semesters/:id/units/:unit_id/documents - Documents of a unit.
pub async fn list_unit_documents(
    State(state): State<AppState>,
    Path((semester_id, unit_id)): Path<(String, String)>,
) -> ApiResult<Vec<DocumentFile>> {
    let revision_id = state.repo.get_revision_id().await;
    success(
        state.repo.get_documents_by_unit(&semester_id, &unit_id).await,
        revision_id,
    )
}

/// GET /api/units/:id - Get a single unit.
pub async fn get_unit(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Unit> {
    let revision_id = state.repo.get_revision_id().await;

    match state.repo.get_unit_by_id(&id).await {
        Some(unit) => success(unit, revision_id),
        None => error(
            AppError::NotFound(format!("Unit {} not found", id)),
            revision_id,
        ),
    }
}
