/// Authentication API routes
use crate::{
    api::extract::JsonBody,
    error::Result,
    services::auth::TokenPair,
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<TokenPair>> {
    let user = app_state.users.authenticate(&req.email, &req.password).await?;
    let tokens = app_state.auth_service.issue_pair(&user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(tokens))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    Ok(Json(RefreshResponse {
        access_token: app_state.auth_service.refresh(&req.refresh_token)?,
        token_type: "Bearer",
    }))
}
