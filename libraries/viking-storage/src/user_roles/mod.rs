//! User-to-role links
//!
//! The `user_roles.user_id` column is unique, so a user has zero or one link
//! and [`find_by_user`] is unambiguous. Reassigning a role rewrites the
//! existing row with [`set_role`] instead of inserting a second one.

use crate::StorageError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use viking_core::types::{RoleId, UserId, UserRole, UserRoleId};

type Result<T> = std::result::Result<T, StorageError>;

fn from_row(row: &SqliteRow) -> Result<UserRole> {
    Ok(UserRole {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        role_id: row.try_get("role_id")?,
    })
}

/// Link a user to a role
///
/// Fails with [`StorageError::Duplicate`] if the user already has a link.
pub async fn insert<'e, E>(executor: E, user_id: &UserId, role_id: &RoleId) -> Result<UserRole>
where
    E: SqliteExecutor<'e>,
{
    let id = UserRoleId::generate();

    sqlx::query("INSERT INTO user_roles (id, user_id, role_id) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;

    Ok(UserRole {
        id,
        user_id: user_id.clone(),
        role_id: role_id.clone(),
    })
}

/// Get the link for a user, if any
pub async fn find_by_user<'e, E>(executor: E, user_id: &UserId) -> Result<Option<UserRole>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query("SELECT id, user_id, role_id FROM user_roles WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get every link pointing at a role
pub async fn find_by_role<'e, E>(executor: E, role_id: &RoleId) -> Result<Vec<UserRole>>
where
    E: SqliteExecutor<'e>,
{
    let rows =
        sqlx::query("SELECT id, user_id, role_id FROM user_roles WHERE role_id = ? ORDER BY id")
            .bind(role_id)
            .fetch_all(executor)
            .await?;

    rows.iter().map(from_row).collect()
}

/// Get all links
pub async fn get_all<'e, E>(executor: E) -> Result<Vec<UserRole>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("SELECT id, user_id, role_id FROM user_roles")
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Point an existing link at a different role
///
/// Returns `false` when the link does not exist.
pub async fn set_role<'e, E>(executor: E, id: &UserRoleId, role_id: &RoleId) -> Result<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE user_roles SET role_id = ? WHERE id = ?")
        .bind(role_id)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a user's link
///
/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_user<'e, E>(executor: E, user_id: &UserId) -> Result<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
