use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::account::{self, AuthResponse, LoginRequest, RegisterRequest};
use crate::AppState;

/// Register a new end-user account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let auth = account::register(state.store.as_ref(), &state.config, payload).await?;
    Ok(ApiResponse::created("Registered", auth))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let auth = account::login(state.store.as_ref(), &state.config, payload).await?;
    Ok(ApiResponse::ok("Logged in", auth))
}
