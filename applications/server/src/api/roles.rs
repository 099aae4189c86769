/// Role API routes
use crate::{
    api::extract::{JsonBody, QueryParams},
    error::Result,
    services::{
        role_directory::{RoleSearch, RoleSearchParams},
        SearchResult,
    },
    state::AppState,
};
use axum::{extract::State, Json};
use viking_core::{CreateRole, Role};

/// POST /api/role/save
pub async fn save(
    State(app_state): State<AppState>,
    JsonBody(role): JsonBody<CreateRole>,
) -> Result<Json<Role>> {
    Ok(Json(app_state.roles.create(role).await?))
}

/// GET /api/role/search?query=all|by-id
pub async fn search(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<RoleSearchParams>,
) -> Result<Json<SearchResult<Role>>> {
    let criteria = RoleSearch::try_from(params)?;
    Ok(Json(app_state.roles.search(criteria).await?))
}
