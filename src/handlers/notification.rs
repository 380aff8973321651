use axum::{extract::State, Extension};

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::notification::{self, NotificationView};
use crate::utils::jwt::Claims;
use crate::AppState;

/// The caller's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<ApiResponse<Vec<NotificationView>>> {
    let notifications =
        notification::list_notifications(state.store.as_ref(), &claims.actor()).await?;
    Ok(ApiResponse::ok("Notifications", notifications))
}
