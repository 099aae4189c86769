//! User records

use crate::StorageError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use viking_core::types::{NewUser, User, UserId, UserType};

type Result<T> = std::result::Result<T, StorageError>;

const USER_COLUMNS: &str = "id, name, dni, cuit, user_type, address, phone_number, \
     secondary_phone_number, email, password_hash, created_at, updated_at";

fn from_row(row: &SqliteRow) -> Result<User> {
    let user_type: String = row.try_get("user_type")?;
    let user_type = UserType::from_str(&user_type).ok_or_else(|| {
        StorageError::SerializationError(format!("unknown user type: {user_type}"))
    })?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        dni: row.try_get("dni")?,
        cuit: row.try_get("cuit")?,
        user_type,
        address: row.try_get("address")?,
        phone_number: row.try_get("phone_number")?,
        secondary_phone_number: row.try_get("secondary_phone_number")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Insert a new user
///
/// # Arguments
///
/// * `executor` - Pool or open transaction
/// * `id` - Identifier for the new user
/// * `user` - Field values; the password must already be hashed
pub async fn insert<'e, E>(executor: E, id: &UserId, user: &NewUser) -> Result<User>
where
    E: SqliteExecutor<'e>,
{
    let now = crate::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, dni, cuit, user_type, address, phone_number,
                           secondary_phone_number, email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&user.name)
    .bind(user.dni)
    .bind(&user.cuit)
    .bind(user.user_type.as_str())
    .bind(&user.address)
    .bind(&user.phone_number)
    .bind(&user.secondary_phone_number)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(User {
        id: id.clone(),
        name: user.name.clone(),
        dni: user.dni,
        cuit: user.cuit.clone(),
        user_type: user.user_type,
        address: user.address.clone(),
        phone_number: user.phone_number.clone(),
        secondary_phone_number: user.secondary_phone_number.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Overwrite every mutable field of an existing user
///
/// Returns `false` when no user has the given id.
pub async fn update<'e, E>(executor: E, id: &UserId, user: &NewUser) -> Result<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET name = ?, dni = ?, cuit = ?, user_type = ?, address = ?, phone_number = ?,
            secondary_phone_number = ?, email = ?, password_hash = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.name)
    .bind(user.dni)
    .bind(&user.cuit)
    .bind(user.user_type.as_str())
    .bind(&user.address)
    .bind(&user.phone_number)
    .bind(&user.secondary_phone_number)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(crate::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Get a user by ID
pub async fn get_by_id<'e, E>(executor: E, id: &UserId) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a user by national id number
pub async fn get_by_dni<'e, E>(executor: E, dni: i64) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE dni = ?"))
        .bind(dni)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a user by email address
pub async fn get_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a user by tax id
pub async fn get_by_cuit<'e, E>(executor: E, cuit: &str) -> Result<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE cuit = ?"))
        .bind(cuit)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all users, ordered by name
pub async fn get_all<'e, E>(executor: E) -> Result<Vec<User>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Delete a user
///
/// Returns `false` when no user has the given id. The user's role link is
/// removed with it by the `ON DELETE CASCADE` constraint.
pub async fn delete<'e, E>(executor: E, id: &UserId) -> Result<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
