//! Notification API endpoints.

use axum::extract::{Path, State};
use chrono::Utc;

use super::{error, success, ApiResult, AppJson};
use crate::errors::AppError;
use crate::models::{
    CreateNotificationRequest, MarkedAllRead, NotificationMessage, NotificationView, UnreadCount,
};
use crate::AppState;

/// GET /api/notifications - Newest first, each with its rendered age.
pub async fn list_notifications(State(state): State<AppState>) -> ApiResult<Vec<NotificationView>> {
    let revision_id = state.repo.get_revision_id().await;
    let now = Utc::now();

    let views = state
        .repo
        .get_notifications()
        .await
        .into_iter()
        .map(|n| NotificationView::new(n, now))
        .collect();
    success(views, revision_id)
}

/// POST /api/notifications - Raise a notification.
pub async fn create_notification(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateNotificationRequest>,
) -> ApiResult<NotificationMessage> {
    let revision_id = state.repo.get_revision_id().await;

    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            revision_id,
        );
    }

    let notification = state
        .session
        .create_notification(&request.title, &request.description, request.link.as_deref())
        .await;
    let new_revision = state.repo.get_revision_id().await;
    success(notification, new_revision)
}

/// GET /api/notifications/unread-count - Number of unread notifications.
pub async fn unread_count(State(state): State<AppState>) -> ApiResult<UnreadCount> {
    let revision_id = state.repo.get_revision_id().await;
    let unread = state.repo.unread_notification_count().await;
    success(UnreadCount { unread }, revision_id)
}

/// PUT /api/notifications/:id/read - Mark one notification as read. Unknown ids are ignored.
pub async fn mark_read(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.mark_notification_as_read(&id).await;
    let revision_id = state.repo.get_revision_id().await;
    success((), revision_id)
}

/// PUT /api/notifications/read-all - Mark every notification as read and report how many changed.
pub async fn mark_all_read(State(state): State<AppState>) -> ApiResult<MarkedAllRead> {
    let marked = state.repo.mark_all_notifications_as_read().await;
    tracing::debug!(marked, "Marked all notifications as read");
    let unread = state.repo.unread_notification_count().await;
    let revision_id = state.repo.get_revision_id().await;
    success(MarkedAllRead { marked, unread }, revision_id)
}
