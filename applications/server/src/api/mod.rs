/// API route modules
pub mod auth;
pub mod devices;
pub mod diagnostic_points;
pub mod extract;
pub mod health;
pub mod roles;
pub mod users;

use crate::{middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// Health, login and token refresh are public; every other route requires a
/// Bearer access token. Creating users additionally needs the admin permission.
pub fn create_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh));

    let protected_routes = Router::new()
        // Users
        .route("/api/user/save", post(users::save))
        .route("/api/user/search", get(users::search))
        .route("/api/user/update/:id", put(users::update))
        .route("/api/user/delete/:id", delete(users::delete))
        .route("/api/user/permission", get(users::permission))
        // Roles
        .route("/api/role/save", post(roles::save))
        .route("/api/role/search", get(roles::search))
        // Devices
        .route("/device/save", post(devices::save))
        .route("/device/search", get(devices::search))
        // Diagnostic points
        .route("/diagnostic-point/save", post(diagnostic_points::save))
        .route("/diagnostic-point/search", get(diagnostic_points::search))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
