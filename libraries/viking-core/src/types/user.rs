/// User domain types
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Kind of customer a user represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A private customer
    Individual,
    /// A company, usually with a tax id
    Business,
}

impl UserType {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Business => "business",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(Self::Individual),
            "business" => Some(Self::Business),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted user
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Full name or business name
    pub name: String,

    /// National id number (unique)
    pub dni: i64,

    /// Tax id (unique when present)
    pub cuit: Option<String>,

    /// Customer kind
    pub user_type: UserType,

    /// Postal address
    pub address: String,

    /// Primary phone number
    pub phone_number: String,

    /// Secondary phone number
    pub secondary_phone_number: String,

    /// Email address (unique)
    pub email: String,

    /// Hashed credential
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,

    /// Last modification timestamp (Unix epoch seconds)
    pub updated_at: i64,
}

/// User fields written on insert, and overwritten wholesale on update
///
/// Field meanings match [`User`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub dni: i64,
    pub cuit: Option<String>,
    pub user_type: UserType,
    pub address: String,
    pub phone_number: String,
    pub secondary_phone_number: String,
    pub email: String,
    /// Already hashed; raw passwords never reach storage
    pub password_hash: String,
}
