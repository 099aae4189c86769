/// Diagnostic point API routes
use crate::{
    api::extract::{JsonBody, QueryParams},
    error::Result,
    services::{
        diagnostic_directory::{DiagnosticPointSearch, DiagnosticPointSearchParams},
        SearchResult,
    },
    state::AppState,
};
use axum::{extract::State, Json};
use viking_core::{CreateDiagnosticPoint, DiagnosticPoint};

/// POST /diagnostic-point/save
pub async fn save(
    State(app_state): State<AppState>,
    JsonBody(point): JsonBody<CreateDiagnosticPoint>,
) -> Result<Json<DiagnosticPoint>> {
    Ok(Json(app_state.diagnostic_points.create(point).await?))
}

/// GET /diagnostic-point/search?query=all|by-id|by-work-order
pub async fn search(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<DiagnosticPointSearchParams>,
) -> Result<Json<SearchResult<DiagnosticPoint>>> {
    let criteria = DiagnosticPointSearch::try_from(params)?;
    Ok(Json(app_state.diagnostic_points.search(criteria).await?))
}
