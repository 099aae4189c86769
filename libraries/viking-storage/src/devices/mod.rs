//! Device records

use crate::StorageError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use viking_core::types::{Device, DeviceId};

type Result<T> = std::result::Result<T, StorageError>;

fn from_row(row: &SqliteRow) -> Result<Device> {
    Ok(Device {
        id: row.try_get("id")?,
        serial_number: row.try_get("serial_number")?,
        brand: row.try_get("brand")?,
        model: row.try_get("model")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Register a new device
///
/// # Arguments
///
/// * `executor` - Pool or open transaction
/// * `serial_number` - Manufacturer serial number (must be unique)
/// * `brand` - Manufacturer brand
/// * `model` - Model name
pub async fn insert<'e, E>(
    executor: E,
    serial_number: &str,
    brand: &str,
    model: &str,
) -> Result<Device>
where
    E: SqliteExecutor<'e>,
{
    let now = crate::now();

    let result = sqlx::query(
        "INSERT INTO devices (serial_number, brand, model, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(serial_number)
    .bind(brand)
    .bind(model)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(Device {
        id: result.last_insert_rowid(),
        serial_number: serial_number.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        created_at: now,
    })
}

/// Get a device by ID
pub async fn get_by_id<'e, E>(executor: E, id: DeviceId) -> Result<Option<Device>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        "SELECT id, serial_number, brand, model, created_at FROM devices WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a device by serial number
pub async fn get_by_serial_number<'e, E>(executor: E, serial_number: &str) -> Result<Option<Device>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        "SELECT id, serial_number, brand, model, created_at FROM devices WHERE serial_number = ?",
    )
    .bind(serial_number)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get all devices of a brand
pub async fn get_by_brand<'e, E>(executor: E, brand: &str) -> Result<Vec<Device>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        r#"
        SELECT id, serial_number, brand, model, created_at
        FROM devices
        WHERE brand = ?
        ORDER BY id
        "#,
    )
    .bind(brand)
    .fetch_all(executor)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Get all devices
pub async fn get_all<'e, E>(executor: E) -> Result<Vec<Device>>
where
    E: SqliteExecutor<'e>,
{
    let rows =
        sqlx::query("SELECT id, serial_number, brand, model, created_at FROM devices ORDER BY id")
            .fetch_all(executor)
            .await?;

    rows.iter().map(from_row).collect()
}
