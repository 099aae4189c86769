/// User API routes
use crate::{
    api::extract::{JsonBody, PathParam, QueryParams},
    error::{Result, ServerError},
    services::{
        user_directory::{UserPayload, UserSearch, UserSearchParams, UserView},
        Caller, SearchResult,
    },
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use viking_core::UserId;

#[derive(Debug, Serialize)]
pub struct SaveUserResponse {
    pub message: String,
    pub id: UserId,
}

#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub permission: String,
}

/// GET /api/user/search?query=...
pub async fn search(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<UserSearchParams>,
) -> Result<Json<SearchResult<UserView>>> {
    let criteria = UserSearch::try_from(params)?;
    Ok(Json(app_state.users.search(criteria).await?))
}

/// POST /api/user/save
pub async fn save(
    State(app_state): State<AppState>,
    caller: Caller,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<SaveUserResponse>> {
    let view = app_state.users.create(&caller, payload).await?;

    Ok(Json(SaveUserResponse {
        message: "User created successfully".to_string(),
        id: view.user.id,
    }))
}

/// PUT /api/user/update/:id
pub async fn update(
    State(app_state): State<AppState>,
    caller: Caller,
    PathParam(id): PathParam<String>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<UserView>> {
    let view = app_state
        .users
        .update(&caller, &UserId::new(id), payload)
        .await?;
    Ok(Json(view))
}

/// DELETE /api/user/delete/:id
pub async fn delete(
    State(app_state): State<AppState>,
    caller: Caller,
    PathParam(id): PathParam<String>,
) -> Result<StatusCode> {
    let id = UserId::new(id);

    if app_state.users.delete(&caller, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(format!("User with ID {id} not found")))
    }
}

/// GET /api/user/permission
/// Permission label of the authenticated caller's role
pub async fn permission(
    State(app_state): State<AppState>,
    caller: Caller,
) -> Result<Json<PermissionResponse>> {
    let permission = app_state.users.permission_of(&caller).await?;
    Ok(Json(PermissionResponse { permission }))
}
