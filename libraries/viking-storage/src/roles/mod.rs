//! Role records

use crate::StorageError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use viking_core::types::{CreateRole, Role, RoleId};

type Result<T> = std::result::Result<T, StorageError>;

fn from_row(row: &SqliteRow) -> Result<Role> {
    Ok(Role {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        permission: row.try_get("permission")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Create a role with a freshly generated id
pub async fn insert<'e, E>(executor: E, role: &CreateRole) -> Result<Role>
where
    E: SqliteExecutor<'e>,
{
    let id = RoleId::generate();
    let now = crate::now();

    sqlx::query("INSERT INTO roles (id, name, permission, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&role.name)
        .bind(&role.permission)
        .bind(now)
        .execute(executor)
        .await?;

    Ok(Role {
        id,
        name: role.name.clone(),
        permission: role.permission.clone(),
        created_at: now,
    })
}

/// Get a role by ID
pub async fn get_by_id<'e, E>(executor: E, id: &RoleId) -> Result<Option<Role>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query("SELECT id, name, permission, created_at FROM roles WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a role by its unique name
pub async fn get_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Role>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query("SELECT id, name, permission, created_at FROM roles WHERE name = ?")
        .bind(name)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all roles, ordered by name
pub async fn get_all<'e, E>(executor: E) -> Result<Vec<Role>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("SELECT id, name, permission, created_at FROM roles ORDER BY name")
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}
