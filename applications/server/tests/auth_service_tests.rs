/// Authentication service tests
/// Tests JWT generation, token validation and the bcrypt password encoder
mod common;

use common::{fixtures, TestApp};
use viking_core::UserId;
use viking_server::{
    error::ServerError,
    services::{
        auth::{AuthService, TokenKind},
        BcryptPasswordEncoder, PasswordEncoder,
    },
};

fn create_test_auth_service() -> AuthService {
    AuthService::new(fixtures::JWT_SECRET, 1, 7)
}

/// Test password hashing produces valid bcrypt hashes
#[test]
fn test_password_hashing() {
    let encoder = BcryptPasswordEncoder::new(4);

    let hash = encoder.encode("MySecurePassword123!").unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));

    // Verify the hash is different each time (salt is random)
    let hash2 = encoder.encode("MySecurePassword123!").unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// Test password verification with correct and incorrect passwords
#[test]
fn test_password_verification() {
    let encoder = BcryptPasswordEncoder::new(4);
    let hash = encoder.encode("MySecurePassword123!").unwrap();

    assert!(encoder.matches("MySecurePassword123!", &hash).unwrap());
    assert!(!encoder.matches("WrongPassword", &hash).unwrap());
}

/// Test password verification with invalid hash format
#[test]
fn test_password_verification_invalid_hash() {
    let encoder = BcryptPasswordEncoder::new(4);

    let result = encoder.matches("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

/// Test JWT access token generation and validation
#[test]
fn test_access_token_generation_and_validation() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::new("user123");

    let token = auth_service.issue(&user_id, TokenKind::Access).unwrap();
    assert!(!token.is_empty(), "Token should not be empty");

    let caller = auth_service.authorize(&token).unwrap();
    assert_eq!(caller.user_id, user_id, "Decoded user ID should match original");
}

/// Test that token kinds are not interchangeable
#[test]
fn test_token_type_enforcement() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::new("user123");

    let pair = auth_service.issue_pair(&user_id).unwrap();

    assert!(matches!(
        auth_service.refresh(&pair.access_token),
        Err(ServerError::Auth(_))
    ));
    assert!(matches!(
        auth_service.authorize(&pair.refresh_token),
        Err(ServerError::Auth(_))
    ));

    let renewed = auth_service.refresh(&pair.refresh_token).unwrap();
    assert_eq!(auth_service.authorize(&renewed).unwrap().user_id, user_id);
}

/// Test token validation with malformed and empty tokens
#[test]
fn test_token_validation_malformed() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.authorize("not.a.valid.jwt.token").is_err());
    assert!(auth_service.authorize("").is_err());
}

/// Test complete authentication flow with database
#[tokio::test]
async fn test_complete_authentication_flow() {
    let app = TestApp::new().await;
    let role = app.create_role("admin").await;
    let user_id = app.create_user(111, "a@x.com", &role.id).await;

    // Valid credentials resolve to the stored user
    let user = app
        .state
        .users
        .authenticate("a@x.com", fixtures::TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.id, user_id);

    // Tokens issued for that user round-trip
    let pair = app.state.auth_service.issue_pair(&user.id).unwrap();
    let caller = app.state.auth_service.authorize(&pair.access_token).unwrap();
    assert_eq!(caller.user_id, user_id);

    // Wrong password and unknown email are both rejected
    assert!(app.state.users.authenticate("a@x.com", "nope").await.is_err());
    assert!(app
        .state
        .users
        .authenticate("ghost@x.com", fixtures::TEST_PASSWORD)
        .await
        .is_err());
}
