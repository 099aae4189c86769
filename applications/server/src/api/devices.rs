/// Device API routes
use crate::{
    api::extract::{JsonBody, QueryParams},
    error::Result,
    services::{
        device_directory::{DeviceSearch, DeviceSearchParams},
        SearchResult,
    },
    state::AppState,
};
use axum::{extract::State, Json};
use viking_core::{CreateDevice, Device};

/// GET /device/search?query=all|by-id|by-serial-number|by-brand
pub async fn search(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<DeviceSearchParams>,
) -> Result<Json<SearchResult<Device>>> {
    let criteria = DeviceSearch::try_from(params)?;
    Ok(Json(app_state.devices.search(criteria).await?))
}

/// POST /device/save
pub async fn save(
    State(app_state): State<AppState>,
    JsonBody(device): JsonBody<CreateDevice>,
) -> Result<Json<Device>> {
    Ok(Json(app_state.devices.create(device).await?))
}
