//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use viking_core::{CreateRole, Role, RoleId, UserId, UserType};
use viking_server::{
    services::{
        auth::TokenKind, user_directory::UserPayload, AuthService, BcryptPasswordEncoder,
    },
    state::AppState,
};

/// A fully wired application over a throwaway SQLite file
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = viking_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        viking_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let auth_service = Arc::new(AuthService::new(
            fixtures::JWT_SECRET,
            1, // 1 hour access
            1, // 1 day refresh
        ));
        // Minimum bcrypt cost keeps tests fast
        let encoder = Arc::new(BcryptPasswordEncoder::new(4));

        let state = AppState::new(pool, auth_service, encoder, fixtures::ADMIN_PERMISSION);
        let router = viking_server::create_router(state.clone());

        Self {
            state,
            router,
            _temp_dir: temp_dir,
        }
    }

    /// Create a role whose permission label is the upper-cased name, so a
    /// role called "admin" grants the admin permission
    pub async fn create_role(&self, name: &str) -> Role {
        self.state
            .roles
            .create(CreateRole {
                name: name.to_string(),
                permission: name.to_uppercase(),
            })
            .await
            .expect("Failed to create role")
    }

    /// Seed a user directly through the directory and return its id
    pub async fn create_user(&self, dni: i64, email: &str, role_id: &RoleId) -> UserId {
        self.state
            .users
            .provision(user_payload(dni, email, role_id))
            .await
            .expect("Failed to create user")
            .user
            .id
    }

    pub fn bearer(&self, user_id: &UserId) -> String {
        let token = self
            .state
            .auth_service
            .issue(user_id, TokenKind::Access)
            .expect("Failed to create token");
        format!("Bearer {token}")
    }
}

/// A valid user payload for `POST /api/user/save`
pub fn user_payload(dni: i64, email: &str, role_id: &RoleId) -> UserPayload {
    UserPayload {
        id: None,
        name: format!("User {dni}"),
        dni,
        user_type: UserType::Individual,
        address: "Av. Siempre Viva 742".to_string(),
        phone_number: "1155550000".to_string(),
        secondary_phone_number: "1155550001".to_string(),
        email: email.to_string(),
        password: Some(fixtures::TEST_PASSWORD.to_string()),
        cuit: None,
        role_id: Some(role_id.clone()),
    }
}

/// JSON body for the same user, as a client would send it
pub fn user_json(dni: i64, email: &str, role_id: &RoleId) -> Value {
    serde_json::json!({
        "name": format!("User {dni}"),
        "dni": dni,
        "userType": "individual",
        "address": "Av. Siempre Viva 742",
        "phoneNumber": "1155550000",
        "secondaryPhoneNumber": "1155550001",
        "email": email,
        "password": fixtures::TEST_PASSWORD,
        "roleId": role_id,
    })
}

pub fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn send_json(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test credentials
pub mod fixtures {
    pub const JWT_SECRET: &str = "test-secret-key";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
    pub const ADMIN_PERMISSION: &str = "ADMIN";
}
