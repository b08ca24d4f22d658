//! REST API module.
//!
//! Contains all API routes and handlers following the web client's contract.

mod datastore;
mod documents;
mod groups;
mod notifications;
mod semesters;
mod session;

pub use datastore::*;
pub use documents::*;
pub use groups::*;
pub use notifications::*;
pub use semesters::*;
pub use session::*;

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{AppError, AppErrorWithRevision};
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// JSON body extractor whose rejections use the error envelope.
///
/// Malformed or mistyped bodies become `BAD_REQUEST` (400) tagged with the
/// current revision instead of axum's plain-text 422.
pub struct AppJson<T>(pub T);

impl<T> FromRequest<AppState> for AppJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppErrorWithRevision;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                tracing::debug!(%message, "Rejected request body");
                Err(AppErrorWithRevision {
                    error: AppError::BadRequest(message),
                    revision_id: state.repo.get_revision_id().await,
                })
            }
        }
    }
}
