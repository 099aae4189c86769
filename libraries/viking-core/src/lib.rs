//! Viking Core
//!
//! Domain types and error handling shared by the Viking service-ticket
//! backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Role`, `UserRole`, `Device`, `DiagnosticPoint`
//! - **Identifiers**: opaque string ids for users and roles, row ids for
//!   devices and diagnostic points
//! - **Error Handling**: Unified `VikingError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use viking_core::types::{UserId, UserType};
//!
//! let id = UserId::generate();
//! assert!(!id.as_str().is_empty());
//! assert_eq!(UserType::from_str("business"), Some(UserType::Business));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error taxonomy shared by storage and server
pub mod error;
/// Records, request types and identifiers
pub mod types;

// Re-export commonly used types
pub use error::{Result, VikingError};

pub use types::{
    CreateDevice, CreateDiagnosticPoint, CreateRole, Device, DeviceId, DiagnosticPoint,
    DiagnosticPointId, NewUser, Role, RoleId, User, UserId, UserRole, UserRoleId, UserType,
    WorkOrderId,
};
