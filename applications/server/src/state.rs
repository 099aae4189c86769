/// Shared application state
use crate::services::{
    AuthService, DeviceDirectory, DiagnosticPointDirectory, PasswordEncoder, RoleDirectory,
    UserDirectory,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub users: Arc<UserDirectory>,
    pub roles: Arc<RoleDirectory>,
    pub devices: Arc<DeviceDirectory>,
    pub diagnostic_points: Arc<DiagnosticPointDirectory>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        auth_service: Arc<AuthService>,
        encoder: Arc<dyn PasswordEncoder>,
        admin_permission: &str,
    ) -> Self {
        Self {
            users: Arc::new(UserDirectory::new(pool.clone(), encoder, admin_permission)),
            roles: Arc::new(RoleDirectory::new(pool.clone())),
            devices: Arc::new(DeviceDirectory::new(pool.clone())),
            diagnostic_points: Arc::new(DiagnosticPointDirectory::new(pool.clone())),
            pool,
            auth_service,
        }
    }
}
