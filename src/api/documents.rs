//! Document API endpoints.

use axum::extract::{Path, State};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::DocumentFile;
use crate::AppState;

/// GET /api/documents/:id - Get a single document.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DocumentFile> {
    let revision_id = state.repo.get_revision_id().await;

    match state.repo.get_document_by_id(&id).await {
        Some(document) => success(document, revision_id),
        None => error(
            AppError::NotFound(format!("Document {} not found", id)),
            revision_id,
        ),
    }
}
