/// Role and user-role link types
use serde::{Deserialize, Serialize};

use super::ids::{RoleId, UserId, UserRoleId};

/// A role users can be linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Immutable role identifier
    pub id: RoleId,

    /// Role name (e.g. "admin")
    pub name: String,

    /// Permission label granted by the role
    pub permission: String,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

/// Request to create a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Unique role name
    pub name: String,
    /// Permission label granted by the role
    pub permission: String,
}

/// Join record tying one user to one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    /// Link identifier
    pub id: UserRoleId,
    /// Linked user (at most one link each)
    pub user_id: UserId,
    /// Role the user holds
    pub role_id: RoleId,
}
