//! Viking Server Library
//!
//! Service-ticket backend: users and their roles, devices and diagnostic
//! points behind a JWT-protected HTTP API.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, BcryptPasswordEncoder, PasswordEncoder};
pub use state::AppState;
